//! Hue / chroma / tone color model.
//!
//! Hue and chroma come from CAM16 under standard viewing conditions, tone is
//! CIE L*. An [`Hct`] always carries the packed sRGB color it was resolved to,
//! so converting a packed color in and back out is exact.

pub mod cam16;
pub mod math;
mod solver;

pub use math::{hue_distance, rotation_direction, sanitize_degrees};

use cam16::Cam16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: u32,
}

impl Hct {
    /// Resolve a color from its packed ARGB form.
    pub fn from_argb(argb: u32) -> Self {
        let argb = argb | 0xff00_0000;
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: math::lstar_from_argb(argb),
            argb,
        }
    }

    /// Solve for the displayable color closest to the requested triple.
    ///
    /// Chroma beyond what the hue/tone pair can express is silently reduced;
    /// the returned components describe the color actually produced.
    pub fn from_hct(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_argb(solver::solve_to_argb(hue, chroma.max(0.0), tone))
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    pub fn tone(&self) -> f64 {
        self.tone
    }

    pub fn to_argb(&self) -> u32 {
        self.argb
    }

    pub fn with_hue(&self, hue: f64) -> Self {
        Self::from_hct(hue, self.chroma, self.tone)
    }

    pub fn with_chroma(&self, chroma: f64) -> Self {
        Self::from_hct(self.hue, chroma, self.tone)
    }

    pub fn with_tone(&self, tone: f64) -> Self {
        Self::from_hct(self.hue, self.chroma, tone)
    }

    /// Multiply chroma and tone, re-solving the color.
    pub fn scaled(&self, chroma_factor: f64, tone_factor: f64) -> Self {
        Self::from_hct(
            self.hue,
            self.chroma * chroma_factor,
            (self.tone * tone_factor).clamp(0.0, 100.0),
        )
    }
}
