//! Alpha-channel vectorization.
//!
//! Turns a raster image with transparency into a closed outline:
//! - **Sampling**: downsample and threshold alpha into a binary mask
//! - **Tracing**: Moore neighbor walk around the first outer boundary
//! - **Simplification**: Ramer-Douglas-Peucker with a pixel tolerance
//! - **Normalization**: centre, Y-flip and scale to the target size
//! - **Fallback**: rounded rectangle when there is nothing to trace
//!
//! The outline feeds an extrusion builder for stickers and keychains.

pub mod batch;
pub mod fallback;
pub mod normalize;
pub mod pipeline;
pub mod sampler;
pub mod simplify;
pub mod tracer;

pub use batch::vectorize_batch;
pub use pipeline::{
    vectorize, vectorize_detailed, vectorize_encoded, vectorize_with_cancel, CancelToken, Stage,
    TraceStats, Vectorized,
};
pub use sampler::{sample_alpha_mask, AlphaMask};
pub use tracer::{trace_contour, trace_contour_with_budget, Contour, ContourPoint};
