use palette::{FromColor, Hsl, IntoColor, Lab, Srgb};

use crate::error::InputError;
use crate::hct::{math, Hct};

/// Core color type used at the pipeline's edges.
/// Wraps sRGB u8 components and provides conversions to perceptual color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self, InputError> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 {
            return Err(InputError::invalid_hex(
                hex,
                format!("expected 6 hex digits, got {}", digits.len()),
            ));
        }
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| InputError::invalid_hex(hex, "not a hex digit"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Serialize to uppercase hex `#RRGGBB`.
    pub fn to_hex_upper(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Lowercase hex with an alpha byte appended, `#rrggbbaa`.
    pub fn to_hex_alpha(self, alpha: u8) -> String {
        format!("{}{:02x}", self.to_hex(), alpha)
    }

    pub fn to_argb(self) -> u32 {
        math::argb_from_rgb(self.r, self.g, self.b)
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: math::red(argb),
            g: math::green(argb),
            b: math::blue(argb),
        }
    }

    pub fn to_hct(self) -> Hct {
        Hct::from_argb(self.to_argb())
    }

    pub fn from_hct(hct: Hct) -> Self {
        Self::from_argb(hct.to_argb())
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB (for K-means clustering and deduplication).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from CIELAB.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb_f32: Srgb<f32> = Srgb::from_color(lab);
        let r = (srgb_f32.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb_f32.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb_f32.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG 2.0 contrast ratio between two colors, in [1, 21].
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Scale HSL lightness by `factor` (> 1 lighter, < 1 darker), clamped to
    /// [0, 1]. Channels are truncated, not rounded, on the way back.
    ///
    /// This is plain HSL and has nothing to do with HCT tone.
    pub fn adjust_lightness(self, factor: f32) -> Color {
        let srgb: Srgb<f32> = self.to_srgb_u8().into_format();
        let mut hsl: Hsl = Hsl::from_color(srgb);
        hsl.lightness = (hsl.lightness * factor).clamp(0.0, 1.0);
        let out: Srgb<f32> = Srgb::from_color(hsl);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Color::new(channel(out.red), channel(out.green), channel(out.blue))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Color {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original.r, 255);
        assert_eq!(original.g, 136);
        assert_eq!(original.b, 0);
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_input() {
        let color = Color::from_hex("#FF8800").unwrap();
        assert_eq!(color.to_hex(), "#ff8800");
        assert_eq!(color.to_hex_upper(), "#FF8800");
    }

    #[test]
    fn hex_without_hash() {
        let color = Color::from_hex("aabbcc").unwrap();
        assert_eq!(color.to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_invalid_length() {
        assert!(Color::from_hex("#fff").is_err());
    }

    #[test]
    fn hex_invalid_chars() {
        let err = Color::from_hex("#gggggg").unwrap_err();
        assert!(err.to_string().contains("#gggggg"));
    }

    #[test]
    fn hex_multibyte_input_is_rejected_not_panicking() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn hex_with_alpha_suffix() {
        assert_eq!(Color::new(1, 2, 3).to_hex_alpha(0x80), "#01020380");
    }

    #[test]
    fn argb_round_trip() {
        let color = Color::new(0x7a, 0xa2, 0xf7);
        assert_eq!(color.to_argb(), 0xff7aa2f7);
        assert_eq!(Color::from_argb(color.to_argb()), color);
        assert_eq!(Color::from_hct(color.to_hct()), color);
    }

    #[test]
    fn srgb_to_lab_round_trip() {
        let colors = [
            Color::new(200, 100, 50),
            Color::new(0, 255, 0),
            Color::new(128, 128, 128),
            BLACK,
            WHITE,
        ];
        for original in colors {
            let recovered = Color::from_lab(original.to_lab());
            for (a, b) in [
                (original.r, recovered.r),
                (original.g, recovered.g),
                (original.b, recovered.b),
            ] {
                assert!(
                    (a as i16 - b as i16).unsigned_abs() <= 1,
                    "channel mismatch for {original:?}: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn contrast_ratio_black_white() {
        let ratio = Color::contrast_ratio(&BLACK, &WHITE);
        assert!(
            (ratio - 21.0).abs() < 0.1,
            "black/white contrast should be ~21:1, got {ratio}"
        );
    }

    #[test]
    fn contrast_ratio_is_symmetric() {
        let a = Color::new(200, 50, 50);
        let b = Color::new(50, 200, 50);
        let ratio_ab = Color::contrast_ratio(&a, &b);
        let ratio_ba = Color::contrast_ratio(&b, &a);
        assert!((ratio_ab - ratio_ba).abs() < 0.001);
    }

    #[test]
    fn adjust_lightness_scales_hsl_lightness() {
        // #404040 has HSL lightness 0.25; doubling gives 0.5 -> 127 after truncation.
        let gray = Color::new(0x40, 0x40, 0x40);
        let lighter = gray.adjust_lightness(2.0);
        assert_eq!(lighter.r, lighter.g);
        assert!((126..=128).contains(&lighter.r), "got {lighter}");
    }

    #[test]
    fn adjust_lightness_clamps() {
        assert_eq!(WHITE.adjust_lightness(3.5), WHITE);
        assert_eq!(Color::new(10, 20, 30).adjust_lightness(0.0), BLACK);
    }

    #[test]
    fn adjust_lightness_keeps_hue_family() {
        let red = Color::new(200, 40, 40);
        let darker = red.adjust_lightness(0.5);
        assert!(darker.r > darker.g && darker.r > darker.b);
        assert!(darker.relative_luminance() < red.relative_luminance());
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
