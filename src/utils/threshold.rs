//! Edge thresholding on gradient magnitudes.
//!
//! Magnitudes are scaled so the strongest maps to 255 (truncating), then a
//! pixel becomes an edge when it lies strictly above `ratio * 255`.

use crate::models::EdgeMask;

/// Scale gradient magnitudes so the strongest maps to 255, truncating to u8.
/// An all-zero input stays all zero.
pub fn normalize_magnitude(magnitude: &[f64]) -> Vec<u8> {
    let max = magnitude.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return vec![0; magnitude.len()];
    }

    magnitude
        .iter()
        .map(|&m| (m / max * 255.0).clamp(0.0, 255.0) as u8)
        .collect()
}

/// Binary threshold: a pixel is an edge when its value is strictly above
/// `threshold`
pub fn threshold_mask(values: &[u8], width: usize, height: usize, threshold: f64) -> EdgeMask {
    let mut mask = EdgeMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if values[y * width + x] as f64 > threshold {
                mask.set(x, y, true);
            }
        }
    }

    mask
}

/// Edge mask from raw gradient magnitudes: normalize to [0, 255] and keep
/// pixels above `ratio * 255`
pub fn edge_mask_from_magnitude(
    magnitude: &[f64],
    width: usize,
    height: usize,
    ratio: f64,
) -> EdgeMask {
    let normalized = normalize_magnitude(magnitude);
    threshold_mask(&normalized, width, height, ratio * 255.0)
}
