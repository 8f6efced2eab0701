//! Edge and gradient extraction feeding the Hough core
//!
//! - Edge mask: grayscale → 5×5 Gaussian → Sobel magnitude → normalize to
//!   [0, 255] → threshold at `ratio * 255`.
//! - Gradient direction: Sobel on the unsmoothed grayscale image.

use std::time::Instant;

use crate::error::{HoughError, Result};
use crate::models::{EdgeMask, GradientField};
use crate::utils::blur::gaussian_blur_5x5;
use crate::utils::gradient::SobelGradient;
use crate::utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};
use crate::utils::threshold::edge_mask_from_magnitude;

/// Inputs of the Hough core derived from one image
#[derive(Debug, Clone)]
pub struct EdgeFeatures {
    /// Binary edge mask
    pub mask: EdgeMask,
    /// Per-pixel gradient direction
    pub gradient: GradientField,
}

impl EdgeFeatures {
    /// Extract edges and gradient direction from a grayscale image
    pub fn from_grayscale(
        gray: &[u8],
        width: usize,
        height: usize,
        threshold_ratio: f64,
    ) -> Result<Self> {
        check_buffer(gray.len(), width, height, 1)?;
        let start = Instant::now();

        let blurred = gaussian_blur_5x5(gray, width, height);
        let smoothed = SobelGradient::compute(&blurred, width, height);
        let mask = edge_mask_from_magnitude(&smoothed.magnitude(), width, height, threshold_ratio);

        let gradient = SobelGradient::compute(gray, width, height).direction();

        log::debug!(
            "edges: {} of {} pixels above ratio {} in {:.2} ms",
            mask.count(),
            width * height,
            threshold_ratio,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self { mask, gradient })
    }

    /// Extract edges and gradient direction from an RGB image. With
    /// `parallel`, the grayscale conversion runs row-parallel; the output is
    /// identical either way.
    pub fn from_rgb(
        rgb: &[u8],
        width: usize,
        height: usize,
        threshold_ratio: f64,
        parallel: bool,
    ) -> Result<Self> {
        check_buffer(rgb.len(), width, height, 3)?;
        let gray = if parallel {
            rgb_to_grayscale_parallel(rgb, width, height)
        } else {
            rgb_to_grayscale(rgb, width, height)
        };
        Self::from_grayscale(&gray, width, height, threshold_ratio)
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.mask.height()
    }
}

fn check_buffer(len: usize, width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(HoughError::InvalidInput(format!(
            "image must not be empty, got {}x{}",
            width, height
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            HoughError::InvalidInput(format!(
                "{}x{} image with {} channel(s) overflows the address space",
                width, height, channels
            ))
        })?;
    if len != expected {
        return Err(HoughError::InvalidInput(format!(
            "expected {} bytes for a {}x{} image with {} channel(s), got {}",
            expected, width, height, channels, len
        )));
    }
    Ok(())
}
