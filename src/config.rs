//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizeError};

/// Longest side of the working mask, in pixels.
pub const DEFAULT_MAX_DIM: usize = 128;
/// Alpha values strictly above this are opaque.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;
/// Ramer-Douglas-Peucker tolerance in mask pixels.
pub const DEFAULT_EPSILON: f64 = 1.2;
/// Longest side of the output shape (0.08 = 8cm in scene units).
pub const DEFAULT_TARGET_SIZE: f64 = 0.08;
/// Fallback corner radius as a fraction of the target size.
pub const DEFAULT_CORNER_RATIO: f64 = 0.05;
/// Maximum nesting of simplification spans.
pub const DEFAULT_MAX_SIMPLIFY_DEPTH: usize = 4096;

/// Tunables for a single vectorization run.
///
/// Missing fields deserialize to their defaults, so a partial JSON object
/// such as `{"target_size": 0.05}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizeConfig {
    pub max_dim: usize,
    pub alpha_threshold: u8,
    pub epsilon: f64,
    pub target_size: f64,
    pub corner_ratio: f64,
    pub max_simplify_depth: usize,
    /// Tracer step limit. `None` uses `2 * width * height` of the mask; a
    /// smaller value cuts the walk short and keeps the partial outline.
    pub trace_budget: Option<usize>,
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            max_dim: DEFAULT_MAX_DIM,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            epsilon: DEFAULT_EPSILON,
            target_size: DEFAULT_TARGET_SIZE,
            corner_ratio: DEFAULT_CORNER_RATIO,
            max_simplify_depth: DEFAULT_MAX_SIMPLIFY_DEPTH,
            trace_budget: None,
        }
    }
}

impl VectorizeConfig {
    /// Default config with a different output size.
    pub fn with_target_size(target_size: f64) -> Self {
        Self {
            target_size,
            ..Self::default()
        }
    }

    /// Check ranges before running the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.max_dim == 0 {
            return Err(VectorizeError::InvalidConfig("max_dim must be at least 1".into()));
        }
        if !(self.target_size.is_finite() && self.target_size > 0.0) {
            return Err(VectorizeError::InvalidConfig(format!(
                "target_size must be positive and finite, got {}",
                self.target_size
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(VectorizeError::InvalidConfig(format!(
                "epsilon must be non-negative and finite, got {}",
                self.epsilon
            )));
        }
        if !(self.corner_ratio.is_finite() && (0.0..0.5).contains(&self.corner_ratio)) {
            return Err(VectorizeError::InvalidConfig(format!(
                "corner_ratio must be in [0, 0.5), got {}",
                self.corner_ratio
            )));
        }
        if self.max_simplify_depth == 0 {
            return Err(VectorizeError::InvalidConfig(
                "max_simplify_depth must be at least 1".into(),
            ));
        }
        if self.trace_budget == Some(0) {
            return Err(VectorizeError::InvalidConfig("trace_budget must be at least 1".into()));
        }
        Ok(())
    }
}
