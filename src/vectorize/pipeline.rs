//! Stage sequencing: mask, trace, simplify, normalize, or fall back.
//!
//! Every stage is a pure function of the previous stage's output. The only
//! branches lead to the rounded-rectangle fallback, so a valid config always
//! yields a closed shape with at least three vertices.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};

use crate::config::VectorizeConfig;
use crate::error::{Result, VectorizeError};
use crate::raster::{ImageDecoder, RasterImage};
use crate::shape::{FallbackReason, Shape};

use super::fallback::fallback_shape;
use super::normalize::normalize;
use super::sampler::sample_alpha_mask;
use super::simplify::simplify;
use super::tracer::{step_budget, trace_contour_with_budget};

/// Pipeline states, in the order they can be entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Init,
    Masked,
    Traced,
    Fallback,
    Simplified,
    Normalized,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Init => "init",
            Self::Masked => "masking",
            Self::Traced => "tracing",
            Self::Fallback => "fallback",
            Self::Simplified => "simplification",
            Self::Normalized => "normalization",
            Self::Done => "done",
        };
        f.write_str(text)
    }
}

/// Shared flag for abandoning in-flight invocations.
///
/// Checked between stages only; a stage that has started runs to completion.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn check(&self, next: Stage) -> Result<()> {
        if self.is_cancelled() {
            debug!("vectorization cancelled before {next}");
            return Err(VectorizeError::Cancelled { stage: next });
        }
        Ok(())
    }
}

/// Counters from the traced branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceStats {
    pub mask_width: usize,
    pub mask_height: usize,
    pub contour_points: usize,
    pub contour_closed: bool,
    pub trace_steps: usize,
    pub simplified_points: usize,
}

/// Pipeline result with the states it went through.
#[derive(Clone, Debug, PartialEq)]
pub struct Vectorized {
    pub shape: Shape,
    pub stages: Vec<Stage>,
    /// `None` when the mask had no alpha variation.
    pub trace: Option<TraceStats>,
}

/// Vectorize `image` into a closed shape.
pub fn vectorize(image: &RasterImage, config: &VectorizeConfig) -> Result<Shape> {
    vectorize_detailed(image, config, &CancelToken::new()).map(|v| v.shape)
}

/// Like [`vectorize`], checking `cancel` before tracing and before
/// simplification.
pub fn vectorize_with_cancel(
    image: &RasterImage,
    config: &VectorizeConfig,
    cancel: &CancelToken,
) -> Result<Shape> {
    vectorize_detailed(image, config, cancel).map(|v| v.shape)
}

/// Decode `bytes` with `decoder`, then vectorize.
pub fn vectorize_encoded<D: ImageDecoder>(
    decoder: &D,
    bytes: &[u8],
    config: &VectorizeConfig,
) -> Result<Shape> {
    let image = decoder
        .decode(bytes)
        .map_err(|e| VectorizeError::Decode(Box::new(e)))?;
    vectorize(&image, config)
}

/// Run the full pipeline and report what happened along the way.
pub fn vectorize_detailed(
    image: &RasterImage,
    config: &VectorizeConfig,
    cancel: &CancelToken,
) -> Result<Vectorized> {
    config.validate()?;

    let mut stages = vec![Stage::Init];

    let mask = sample_alpha_mask(image, config.max_dim, config.alpha_threshold);
    stages.push(Stage::Masked);
    trace!(
        "masked {}x{} image to {}x{}, {} solid cells",
        image.width(),
        image.height(),
        mask.width(),
        mask.height(),
        mask.solid_count()
    );

    if !mask.has_alpha_variation() {
        return Ok(fall_back(image, config, FallbackReason::UniformAlpha, stages, None));
    }

    cancel.check(Stage::Traced)?;
    let full_budget = step_budget(mask.width(), mask.height());
    let budget = config.trace_budget.map_or(full_budget, |b| b.min(full_budget));
    let contour = trace_contour_with_budget(&mask, budget);
    let mut stats = TraceStats {
        mask_width: mask.width(),
        mask_height: mask.height(),
        contour_points: contour.len(),
        contour_closed: contour.closed,
        trace_steps: contour.steps,
        simplified_points: 0,
    };

    if contour.is_empty() {
        return Ok(fall_back(image, config, FallbackReason::NoBoundary, stages, Some(stats)));
    }
    if contour.is_degenerate() {
        return Ok(fall_back(
            image,
            config,
            FallbackReason::DegenerateContour,
            stages,
            Some(stats),
        ));
    }
    stages.push(Stage::Traced);
    trace!(
        "traced {} points in {} steps (closed: {})",
        contour.len(),
        contour.steps,
        contour.closed
    );

    cancel.check(Stage::Simplified)?;
    let simplified = simplify(&contour.points, config.epsilon, config.max_simplify_depth);
    stats.simplified_points = simplified.len();
    stages.push(Stage::Simplified);
    trace!("simplified {} -> {} points", contour.len(), simplified.len());

    if simplified.len() < 3 {
        return Ok(fall_back(
            image,
            config,
            FallbackReason::DegenerateSimplification,
            stages,
            Some(stats),
        ));
    }

    let Some(shape) = normalize(&simplified, config.target_size) else {
        return Ok(fall_back(image, config, FallbackReason::ZeroExtent, stages, Some(stats)));
    };
    stages.push(Stage::Normalized);
    stages.push(Stage::Done);

    debug!(
        "vectorized {}x{} image into {} vertices",
        image.width(),
        image.height(),
        simplified.len()
    );

    Ok(Vectorized {
        shape,
        stages,
        trace: Some(stats),
    })
}

fn fall_back(
    image: &RasterImage,
    config: &VectorizeConfig,
    reason: FallbackReason,
    mut stages: Vec<Stage>,
    trace: Option<TraceStats>,
) -> Vectorized {
    debug!(
        "falling back to rounded rect for {}x{} image: {reason}",
        image.width(),
        image.height()
    );
    stages.push(Stage::Fallback);
    stages.push(Stage::Done);
    Vectorized {
        shape: fallback_shape(
            image.width(),
            image.height(),
            config.target_size,
            config.corner_ratio,
            reason,
        ),
        stages,
        trace,
    }
}
