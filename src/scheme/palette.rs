use crate::hct::{sanitize_degrees, Hct};

use super::variant::Variant;

/// A hue and chroma from which any tone can be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalPalette {
    pub hue: f64,
    pub chroma: f64,
}

impl TonalPalette {
    pub fn new(hue: f64, chroma: f64) -> Self {
        Self {
            hue: sanitize_degrees(hue),
            chroma,
        }
    }

    pub fn from_hct(hct: Hct) -> Self {
        Self::new(hct.hue(), hct.chroma())
    }

    pub fn tone(&self, tone: f64) -> Hct {
        Hct::from_hct(self.hue, self.chroma, tone)
    }

    /// Representative color of the palette, at mid tone.
    pub fn key_color(&self) -> Hct {
        self.tone(50.0)
    }
}

/// The six palettes every role draws from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorePalettes {
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub neutral: TonalPalette,
    pub neutral_variant: TonalPalette,
    pub error: TonalPalette,
}

const VIBRANT_HUES: [f64; 9] = [0.0, 41.0, 61.0, 101.0, 131.0, 181.0, 251.0, 301.0, 360.0];
const VIBRANT_SECONDARY_ROTATIONS: [f64; 9] = [18.0, 15.0, 10.0, 12.0, 15.0, 18.0, 15.0, 12.0, 12.0];
const VIBRANT_TERTIARY_ROTATIONS: [f64; 9] = [35.0, 30.0, 20.0, 25.0, 30.0, 35.0, 30.0, 25.0, 25.0];

const EXPRESSIVE_HUES: [f64; 9] = [0.0, 21.0, 51.0, 121.0, 151.0, 191.0, 271.0, 321.0, 360.0];
const EXPRESSIVE_SECONDARY_ROTATIONS: [f64; 9] =
    [45.0, 95.0, 45.0, 20.0, 45.0, 90.0, 45.0, 45.0, 45.0];
const EXPRESSIVE_TERTIARY_ROTATIONS: [f64; 9] =
    [120.0, 120.0, 20.0, 45.0, 20.0, 15.0, 20.0, 120.0, 120.0];

impl CorePalettes {
    pub fn new(seed: Hct, variant: Variant) -> Self {
        let h = seed.hue();
        let c = seed.chroma();
        let error = TonalPalette::new(25.0, 84.0);
        let p = TonalPalette::new;

        match variant {
            Variant::TonalSpot => Self {
                primary: p(h, 36.0),
                secondary: p(h, 16.0),
                tertiary: p(h + 60.0, 24.0),
                neutral: p(h, 6.0),
                neutral_variant: p(h, 8.0),
                error,
            },
            Variant::Vibrant => Self {
                primary: p(h, 200.0),
                secondary: p(
                    rotated_hue(h, &VIBRANT_HUES, &VIBRANT_SECONDARY_ROTATIONS),
                    24.0,
                ),
                tertiary: p(
                    rotated_hue(h, &VIBRANT_HUES, &VIBRANT_TERTIARY_ROTATIONS),
                    32.0,
                ),
                neutral: p(h, 10.0),
                neutral_variant: p(h, 12.0),
                error,
            },
            Variant::Expressive => Self {
                primary: p(h + 240.0, 40.0),
                secondary: p(
                    rotated_hue(h, &EXPRESSIVE_HUES, &EXPRESSIVE_SECONDARY_ROTATIONS),
                    24.0,
                ),
                tertiary: p(
                    rotated_hue(h, &EXPRESSIVE_HUES, &EXPRESSIVE_TERTIARY_ROTATIONS),
                    32.0,
                ),
                neutral: p(h + 15.0, 8.0),
                neutral_variant: p(h + 15.0, 12.0),
                error,
            },
            Variant::Neutral => Self {
                primary: p(h, 12.0),
                secondary: p(h, 8.0),
                tertiary: p(h, 16.0),
                neutral: p(h, 2.0),
                neutral_variant: p(h, 2.0),
                error,
            },
            Variant::Monochrome => Self {
                primary: p(h, 0.0),
                secondary: p(h, 0.0),
                tertiary: p(h, 0.0),
                neutral: p(h, 0.0),
                neutral_variant: p(h, 0.0),
                error,
            },
            Variant::Rainbow => Self {
                primary: p(h, 48.0),
                secondary: p(h, 16.0),
                tertiary: p(h + 60.0, 24.0),
                neutral: p(h, 0.0),
                neutral_variant: p(h, 0.0),
                error,
            },
            Variant::FruitSalad => Self {
                primary: p(h - 50.0, 48.0),
                secondary: p(h - 50.0, 36.0),
                tertiary: p(h, 36.0),
                neutral: p(h, 10.0),
                neutral_variant: p(h, 16.0),
                error,
            },
            Variant::Fidelity | Variant::Content => {
                let tertiary_source = if variant == Variant::Fidelity {
                    Hct::from_hct(h + 180.0, c, seed.tone())
                } else {
                    Hct::from_hct(h + 60.0, c, seed.tone())
                };
                Self {
                    primary: p(h, c),
                    secondary: p(h, (c - 32.0).max(c * 0.5)),
                    tertiary: TonalPalette::from_hct(fix_if_disliked(tertiary_source)),
                    neutral: p(h, c / 8.0),
                    neutral_variant: p(h, c / 8.0 + 4.0),
                    error,
                }
            }
        }
    }
}

/// Rotate `source_hue` by the rotation of the hue band it falls in.
fn rotated_hue(source_hue: f64, hues: &[f64], rotations: &[f64]) -> f64 {
    hues.windows(2)
        .zip(rotations)
        .find(|(band, _)| band[0] < source_hue && source_hue < band[1])
        .map(|(_, rotation)| sanitize_degrees(source_hue + rotation))
        .unwrap_or(source_hue)
}

/// Dark yellow-greens read as bile; such colors are lifted to a lighter tone.
pub fn is_disliked(hct: Hct) -> bool {
    let hue_passes = (90.0..=111.0).contains(&hct.hue().round());
    let chroma_passes = hct.chroma().round() > 16.0;
    let tone_passes = hct.tone().round() < 65.0;
    hue_passes && chroma_passes && tone_passes
}

pub fn fix_if_disliked(hct: Hct) -> Hct {
    if is_disliked(hct) {
        Hct::from_hct(hct.hue(), hct.chroma(), 70.0)
    } else {
        hct
    }
}
