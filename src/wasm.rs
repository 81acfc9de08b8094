//! WebAssembly exports for the vectorization pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Input is the
//! flat RGBA byte array of an already decoded image (e.g. `ImageData.data`).

use wasm_bindgen::prelude::*;

use crate::config::VectorizeConfig;
use crate::raster::RasterImage;
use crate::vectorize::vectorize;
use crate::Shape;

fn run(
    data: &[u8],
    width: usize,
    height: usize,
    target_size: f64,
    epsilon: f64,
) -> Result<Shape, JsValue> {
    let image = RasterImage::from_rgba(width, height, data.to_vec())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = VectorizeConfig {
        target_size,
        epsilon,
        ..VectorizeConfig::default()
    };
    vectorize(&image, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Vectorize an RGBA image into a closed outline.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `target_size` - Longest side of the output shape
/// * `epsilon` - Simplification tolerance in mask pixels
///
/// # Returns
/// Flat path array, see [`Shape::to_flat`]
#[wasm_bindgen]
pub fn alpha_to_shape_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    target_size: f64,
    epsilon: f64,
) -> Result<Vec<f64>, JsValue> {
    run(data, width, height, target_size, epsilon).map(|shape| shape.to_flat())
}

/// Same as [`alpha_to_shape_wasm`] but returns SVG path data.
#[wasm_bindgen]
pub fn alpha_to_svg_path_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    target_size: f64,
    epsilon: f64,
) -> Result<String, JsValue> {
    run(data, width, height, target_size, epsilon).map(|shape| shape.to_svg_path())
}
