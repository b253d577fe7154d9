//! Terminal palette for the time tree.

use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BACKGROUND: Rgb = Rgb::new(16, 16, 20);
pub const TEXT: Rgb = Rgb::new(220, 220, 225);
pub const MUTED: Rgb = Rgb::new(130, 130, 140);
pub const ROW: Rgb = Rgb::new(24, 24, 30);
pub const ROW_HOVER: Rgb = Rgb::new(40, 44, 56);
pub const ROW_SELECTED: Rgb = Rgb::new(48, 64, 96);
pub const LINK: Rgb = Rgb::new(90, 90, 100);
pub const AXIS: Rgb = Rgb::new(150, 150, 160);
pub const SCRUBBER: Rgb = Rgb::new(240, 180, 60);
pub const BRUSH: Rgb = Rgb::new(60, 90, 140);

const BAR_LIGHTNESS: f32 = 0.55;
const BAR_HOVER_LIGHTNESS: f32 = 0.7;
const SECTION_LIGHTNESS: f32 = 0.45;
const BAR_CHROMA: f32 = 0.12;

pub fn oklch(l: f32, c: f32, h: f32) -> Rgb {
    let srgb: Srgb = Oklch::new(l, c, h).into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Rgb::new(r, g, b)
}

/// Stable hue in degrees for a record class, so equal classes share a color.
pub fn class_hue(class: &str) -> f32 {
    // FNV-1a
    let hash = class
        .bytes()
        .fold(0x811c_9dc5_u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    (hash % 360) as f32
}

/// Fill of a duration rect.
pub fn bar(class: &str, section: bool, hover: bool) -> Rgb {
    let lightness = match (section, hover) {
        (_, true) => BAR_HOVER_LIGHTNESS,
        (true, false) => SECTION_LIGHTNESS,
        (false, false) => BAR_LIGHTNESS,
    };
    oklch(lightness, BAR_CHROMA, class_hue(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_hue_is_stable() {
        assert_eq!(class_hue("script"), class_hue("script"));
        assert!(class_hue("script") < 360.0);
    }

    #[test]
    fn test_hover_is_lighter() {
        let normal = bar("paint", false, false);
        let hover = bar("paint", false, true);
        let sum = |c: Rgb| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(sum(hover) > sum(normal));
    }

    #[test]
    fn test_black_oklch() {
        assert_eq!(oklch(0.0, 0.0, 0.0), Rgb::new(0, 0, 0));
    }
}
