use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by lane discovery, aggregation and the tool I/O around them.
#[derive(Debug, Error)]
pub enum GelError {
    #[error("Invalid reference axis: {reason}")]
    InvalidReferenceAxis { reason: String },

    #[error("Scan-line at offset {offset} left the image at ({x}, {y})")]
    OutOfBounds { offset: i64, x: i64, y: i64 },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode or encode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GelError {
    pub(crate) fn invalid_axis(reason: impl Into<String>) -> Self {
        Self::InvalidReferenceAxis {
            reason: reason.into(),
        }
    }
}

/// A single pixel lookup that fell outside the image.
///
/// Produced by the scan-line sampler, which has no notion of the sweep offset;
/// callers attach the offset with [`PixelOutOfBounds::at_offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("pixel ({x}, {y}) lies outside the image")]
pub struct PixelOutOfBounds {
    pub x: i64,
    pub y: i64,
}

impl PixelOutOfBounds {
    pub fn at_offset(self, offset: i64) -> GelError {
        GelError::OutOfBounds {
            offset,
            x: self.x,
            y: self.y,
        }
    }
}
