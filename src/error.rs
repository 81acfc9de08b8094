//! Error type for the vectorization pipeline.
//!
//! Uniform alpha, missing boundaries, degenerate contours and an exhausted
//! tracer budget are not errors: they resolve to the fallback shape.

use thiserror::Error;

use crate::vectorize::pipeline::Stage;

/// Errors surfaced by the pipeline entry points.
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// Image has zero width or height.
    #[error("image has zero width or height")]
    EmptyImage,

    /// Only 1, 3 or 4 channels are understood.
    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    /// Pixel buffer length does not match `width * height * channels`.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The invocation was abandoned through its [`crate::CancelToken`].
    #[error("vectorization cancelled before {stage}")]
    Cancelled { stage: Stage },

    /// The external decoder could not produce a raster image.
    #[error("image decode failed: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;
