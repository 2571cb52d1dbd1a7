//! Error types for the color pipeline.

use std::path::PathBuf;

/// Failures in the inputs of an invocation. All of these are fatal.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Image path does not exist.
    #[error("file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// Image exists but could not be decoded.
    #[error("unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF", .path.display())]
    UnsupportedImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A color string is not `#RRGGBB`.
    #[error("invalid hex color '{value}': {reason}")]
    InvalidHex { value: String, reason: String },

    /// Terminal scheme file could not be read or has the wrong shape.
    #[error("invalid terminal scheme file {}: {reason}", .path.display())]
    SchemeFile { path: PathBuf, reason: String },

    /// Neither an image nor an explicit color was given.
    #[error("no seed given: pass --path <image> or --color <#RRGGBB>")]
    MissingSeed,
}

impl InputError {
    pub fn invalid_hex(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHex {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn scheme_file(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SchemeFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single terminal slot that could not be harmonized. Never fatal: the slot
/// keeps its source value.
#[derive(Debug, thiserror::Error)]
#[error("terminal slot {slot} skipped: {source}")]
pub struct SlotError {
    pub slot: String,
    #[source]
    pub source: InputError,
}
