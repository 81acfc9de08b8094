//! AlphaShape Rust Extensions
//!
//! Converts raster images with transparency into simplified closed outlines,
//! sized in scene units, for extruding sticker and keychain geometry.
//! Exposed to Python via PyO3 and to JavaScript via wasm-bindgen.
//!
//! ## Image Format
//! Input images are `(height, width, channels)` u8 arrays:
//! - **Grayscale**: (height, width, 1) - treated as fully opaque
//! - **RGB**: (height, width, 3) - treated as fully opaque
//! - **RGBA**: (height, width, 4) - alpha drives the outline
//!
//! ## Pipeline
//! `RasterImage -> AlphaMask -> Contour -> simplified Contour -> Shape`,
//! with a rounded-rectangle fallback whenever the alpha channel carries no
//! outline. See the [`vectorize()`] function for the stages.

pub mod config;
pub mod error;
pub mod raster;
pub mod shape;
pub mod vectorize;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::VectorizeConfig;
pub use error::VectorizeError;
pub use raster::{ImageDecoder, RasterImage};
pub use shape::{Bounds, FallbackReason, PathCommand, Point, Shape, ShapeKind};
pub use vectorize::{
    vectorize, vectorize_batch, vectorize_detailed, vectorize_encoded, vectorize_with_cancel,
    CancelToken,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::PyReadonlyArray3;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::{vectorize, vectorize_batch, CancelToken, RasterImage, Shape, VectorizeConfig, VectorizeError};

    fn to_py_err(err: VectorizeError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn make_config(target_size: f64, epsilon: f64, max_dim: usize) -> VectorizeConfig {
        VectorizeConfig {
            target_size,
            epsilon,
            max_dim,
            ..VectorizeConfig::default()
        }
    }

    fn to_raster(image: &PyReadonlyArray3<'_, u8>) -> PyResult<RasterImage> {
        RasterImage::from_array(image.as_array().to_owned()).map_err(to_py_err)
    }

    fn run(py: Python<'_>, image: &PyReadonlyArray3<'_, u8>, config: &VectorizeConfig) -> PyResult<Shape> {
        let raster = to_raster(image)?;
        py.allow_threads(|| vectorize(&raster, config)).map_err(to_py_err)
    }

    /// Vectorize an image's alpha channel into a closed outline.
    ///
    /// Returns the flat path array: [kind, num_commands, op, coords..., ...].
    #[pyfunction]
    #[pyo3(signature = (image, target_size=0.08, epsilon=1.2, max_dim=128))]
    pub fn alpha_to_shape(
        py: Python<'_>,
        image: PyReadonlyArray3<'_, u8>,
        target_size: f64,
        epsilon: f64,
        max_dim: usize,
    ) -> PyResult<Vec<f64>> {
        let config = make_config(target_size, epsilon, max_dim);
        run(py, &image, &config).map(|shape| shape.to_flat())
    }

    /// Vectorize an image's alpha channel and return SVG path data.
    #[pyfunction]
    #[pyo3(signature = (image, target_size=0.08, epsilon=1.2, max_dim=128))]
    pub fn alpha_to_svg_path(
        py: Python<'_>,
        image: PyReadonlyArray3<'_, u8>,
        target_size: f64,
        epsilon: f64,
        max_dim: usize,
    ) -> PyResult<String> {
        let config = make_config(target_size, epsilon, max_dim);
        run(py, &image, &config).map(|shape| shape.to_svg_path())
    }

    /// Vectorize several images in parallel, one flat path array each.
    #[pyfunction]
    #[pyo3(signature = (images, target_size=0.08, epsilon=1.2, max_dim=128))]
    pub fn alpha_to_shape_batch(
        py: Python<'_>,
        images: Vec<PyReadonlyArray3<'_, u8>>,
        target_size: f64,
        epsilon: f64,
        max_dim: usize,
    ) -> PyResult<Vec<Vec<f64>>> {
        let config = make_config(target_size, epsilon, max_dim);
        let rasters = images.iter().map(to_raster).collect::<PyResult<Vec<_>>>()?;

        let results = py.allow_threads(|| vectorize_batch(&rasters, &config, &CancelToken::new()));

        results
            .into_iter()
            .map(|r| r.map(|shape| shape.to_flat()).map_err(to_py_err))
            .collect()
    }

    /// AlphaShape Rust extension module
    #[pymodule]
    pub fn alphashape_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(alpha_to_shape, m)?)?;
        m.add_function(wrap_pyfunction!(alpha_to_svg_path, m)?)?;
        m.add_function(wrap_pyfunction!(alpha_to_shape_batch, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::alphashape_rust;
