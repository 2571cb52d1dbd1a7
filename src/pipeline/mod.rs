//! Seed extraction: image pixels to a single dominant color.

pub mod extract;
pub mod score;

use std::path::Path;

use log::debug;

use crate::color::Color;
use crate::error::InputError;

/// Decode, quantize and score an image, returning its best seed color.
pub fn seed_from_image(path: &Path, bitmap_size: u32) -> Result<Color, InputError> {
    let pixels = extract::load_and_prepare(path, bitmap_size)?;
    let colors = extract::quantize(&pixels, extract::DEFAULT_MAX_COLORS);
    let seed = score::dominant_color(&colors);
    debug!("seed from {}: {seed}", path.display());
    Ok(seed)
}
