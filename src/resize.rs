//! Aspect-preserving downscale/upscale to fit a bounding box.
//!
//! The dimension math is a pure function, testable without images; the
//! actual resampling runs through `imageops` with a Lanczos3 kernel.

use crate::error::{EngineError, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Calculate the largest dimensions that fit inside a target box while
/// preserving the source aspect ratio.
///
/// Applies the smaller of the two width/height ratios to both dimensions,
/// rounding to the nearest integer (ties to even) with a floor of 1. At
/// least one output dimension equals its target side up to that rounding,
/// and neither ever exceeds the box.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height), both positive
/// * `target` - Bounding box dimensions (width, height), both positive
///
/// # Examples
/// ```
/// # use tonedeck::aspect_fit_dimensions;
/// // 4:3 landscape into a 150px square box
/// assert_eq!(aspect_fit_dimensions((400, 300), (150, 150)), (150, 112));
///
/// // fitting can scale up as well as down
/// assert_eq!(aspect_fit_dimensions((100, 50), (400, 400)), (400, 200));
/// ```
pub fn aspect_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let width_ratio = tgt_w as f64 / src_w as f64;
    let height_ratio = tgt_h as f64 / src_h as f64;
    let ratio = width_ratio.min(height_ratio);

    let w = (src_w as f64 * ratio).round_ties_even().max(1.0) as u32;
    let h = (src_h as f64 * ratio).round_ties_even().max(1.0) as u32;
    (w, h)
}

/// Resize `image` to fit inside `target_width` x `target_height`, keeping
/// the aspect ratio.
///
/// Zero targets signal [`EngineError::InvalidTargetSize`]; an empty source
/// signals [`EngineError::EmptyImage`]. When the fit dimensions equal the
/// source dimensions the input is returned as a copy without resampling.
pub fn resize_aspect_fit(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
) -> Result<RgbaImage> {
    if target_width == 0 || target_height == 0 {
        return Err(EngineError::InvalidTargetSize {
            width: target_width,
            height: target_height,
        });
    }
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(EngineError::EmptyImage);
    }

    let (w, h) = aspect_fit_dimensions((src_w, src_h), (target_width, target_height));
    if (w, h) == (src_w, src_h) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, w, h, FilterType::Lanczos3))
}
