//! GPU renderer for the particle cloud
//!
//! Instanced point-sprite pipeline drawing directly into egui's render pass
//! via CallbackTrait. The instance buffer and the sprite texture are uploaded
//! once at construction and never rewritten; only the per-frame uniforms
//! change.

use bytemuck::{Pod, Zeroable};
use egui_wgpu::wgpu::{self, util::DeviceExt};
use glam::{Mat4, Vec3};

use super::geometry::ParticleVertex;
use crate::camera::Camera;
use crate::motion::Pose;

/// Uniform buffer layout for the shader.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct Uniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    /// rgb = live tint, a = global opacity
    pub tint: [f32; 4],
    /// x = point scale, yzw unused
    pub params: [f32; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            tint: [1.0, 1.0, 1.0, 1.0],
            params: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl Uniforms {
    /// Compose this frame's uniforms from the camera, the cloud's pose, and
    /// the live tint.
    pub fn compose(
        camera: &Camera,
        pose: &Pose,
        tint: Vec3,
        opacity: f32,
        point_scale: f32,
    ) -> Self {
        Self {
            model_view: camera.view() * pose.model_matrix(),
            projection: camera.projection(),
            tint: [tint.x, tint.y, tint.z, opacity],
            params: [point_scale, 0.0, 0.0, 0.0],
        }
    }
}

/// GPU renderer for the torus-knot cloud.
pub struct KnotRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    #[allow(dead_code)] // Kept alive for the bind group's texture view
    sprite_texture: wgpu::Texture,
}

impl KnotRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        cloud: &[ParticleVertex],
        sprite: &[u8],
        sprite_size: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("knot_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("knot_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("knot_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("knot_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3, // position
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3, // color
                        },
                        wgpu::VertexAttribute {
                            offset: 24,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32, // size
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    // Additive glow; depth writes stay off so overlapping
                    // sprites accumulate instead of occluding
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // TriangleList with 6 vertices per instance (2 triangles = 1
            // quad). PointList point size is capped at 1px on many GPUs, so
            // the sprite is a screen-space quad textured with the gradient.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knot_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::default()),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
        });

        // The cloud is immutable: one upload at creation, no COPY_DST
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knot_instances"),
            contents: bytemuck::cast_slice(cloud),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let sprite_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("knot_sprite"),
            size: wgpu::Extent3d {
                width: sprite_size,
                height: sprite_size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &sprite_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            sprite,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(sprite_size * 4),
                rows_per_image: Some(sprite_size),
            },
            wgpu::Extent3d {
                width: sprite_size,
                height: sprite_size,
                depth_or_array_layers: 1,
            },
        );
        let sprite_view = sprite_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sprite_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("knot_sprite_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("knot_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&sprite_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sprite_sampler),
                },
            ],
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer,
            instance_count: cloud.len() as u32,
            sprite_texture,
        }
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

/// Per-frame callback for egui integration.
pub struct KnotCallback {
    pub uniforms: Uniforms,
}

impl egui_wgpu::CallbackTrait for KnotCallback {
    fn prepare(
        &self,
        _device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _encoder: &mut wgpu::CommandEncoder,
        callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        if let Some(renderer) = callback_resources.get::<KnotRenderer>() {
            renderer.update_uniforms(queue, &self.uniforms);
        }
        vec![]
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        callback_resources: &egui_wgpu::CallbackResources,
    ) {
        let Some(renderer) = callback_resources.get::<KnotRenderer>() else {
            return;
        };
        if renderer.instance_count == 0 {
            return;
        }

        render_pass.set_pipeline(&renderer.pipeline);
        render_pass.set_bind_group(0, &renderer.bind_group, &[]);
        render_pass.set_vertex_buffer(0, renderer.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..renderer.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn compose_carries_tint_and_opacity() {
        let camera = Camera::default();
        let pose = Pose {
            rotation: Vec3::ZERO,
            scale: 1.0,
        };
        let u = Uniforms::compose(&camera, &pose, Vec3::new(0.2, 0.4, 0.6), 0.8, 0.4);
        assert_eq!(u.tint, [0.2, 0.4, 0.6, 0.8]);
        assert_eq!(u.params[0], 0.4);
    }

    #[test]
    fn compose_produces_finite_matrices() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        let pose = Pose {
            rotation: Vec3::new(1.0, 2.0, 3.0),
            scale: 0.85,
        };
        let u = Uniforms::compose(&camera, &pose, Vec3::ONE, 0.8, 0.4);
        assert!(u.model_view.to_cols_array().iter().all(|v| v.is_finite()));
        assert!(u.projection.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn compose_scales_the_model() {
        let camera = Camera::default();
        let half = Uniforms::compose(
            &camera,
            &Pose { rotation: Vec3::ZERO, scale: 0.5 },
            Vec3::ONE,
            1.0,
            1.0,
        );
        let p = half.model_view.transform_point3(Vec3::new(2.0, 0.0, 0.0));
        let q = half.model_view.transform_point3(Vec3::ZERO);
        assert!(((p - q).length() - 1.0).abs() < 1e-5);
    }
}
