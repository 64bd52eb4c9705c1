//! Fixed color palette for the visual

use egui::Color32;
use glam::Vec3;

/// Section palette and particle gradient colors.
/// One section color per scroll-derived page section, in page order.
pub mod palette {
    use super::Color32;

    // === Scroll sections (top of page to bottom) ===
    pub const INTRO: Color32 = Color32::from_rgb(0x6e, 0x46, 0xbe); // #6E46BE - purple
    pub const EXPERIENCE: Color32 = Color32::from_rgb(0x17, 0x72, 0xd0); // #1772D0 - blue
    pub const RESEARCH: Color32 = Color32::from_rgb(0xf0, 0x92, 0x28); // #F09228 - orange
    pub const REFLECTIONS: Color32 = Color32::from_rgb(0x44, 0x44, 0x44); // #444444 - dark grey

    /// Target tint per section, indexed by section number.
    pub const SECTIONS: [Color32; 4] = [INTRO, EXPERIENCE, RESEARCH, REFLECTIONS];

    // === Per-particle gradient endpoints ===
    pub const GRADIENT_A: Color32 = Color32::from_rgb(0x6e, 0x46, 0xbe); // #6E46BE - purple
    pub const GRADIENT_B: Color32 = Color32::from_rgb(0x44, 0x44, 0xff); // #4444FF - sci-fi blue

    // === Background ===
    pub const BG: Color32 = Color32::from_rgb(0, 0, 0); // #000000 - pure black
}

/// Number of scroll sections the page is divided into.
pub const SECTION_COUNT: usize = palette::SECTIONS.len();

/// Convert a palette entry to linear-ish [0,1] RGB for blending and uniforms.
pub fn to_rgb_f32(color: Color32) -> Vec3 {
    Vec3::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_palette_has_one_color_per_section() {
        assert_eq!(palette::SECTIONS.len(), SECTION_COUNT);
        assert_eq!(palette::SECTIONS[0], palette::INTRO);
        assert_eq!(palette::SECTIONS[3], palette::REFLECTIONS);
    }

    #[test]
    fn to_rgb_f32_is_normalized() {
        let rgb = to_rgb_f32(palette::INTRO);
        assert!((rgb.x - 0x6e as f32 / 255.0).abs() < 1e-6);
        for c in [rgb.x, rgb.y, rgb.z] {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}
