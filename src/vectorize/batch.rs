//! Parallel vectorization of independent images.

use log::debug;
use rayon::prelude::*;

use crate::config::VectorizeConfig;
use crate::error::Result;
use crate::raster::RasterImage;
use crate::shape::Shape;

use super::pipeline::{vectorize_with_cancel, CancelToken};

/// Vectorize every image on the rayon pool.
///
/// Results keep the input order. Each invocation owns its intermediates; the
/// only shared state is the read-only `cancel` flag, so cancelling drops the
/// remaining work without touching finished results.
pub fn vectorize_batch(
    images: &[RasterImage],
    config: &VectorizeConfig,
    cancel: &CancelToken,
) -> Vec<Result<Shape>> {
    debug!("vectorizing batch of {} images", images.len());
    images
        .par_iter()
        .map(|image| vectorize_with_cancel(image, config, cancel))
        .collect()
}
