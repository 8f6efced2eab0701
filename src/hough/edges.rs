//! Edge pixel enumeration and input consistency checks

use crate::error::{HoughError, Result};
use crate::models::{EdgeMask, EdgePoint, GradientField};

/// Collect edge pixels in row-major order (row by row, left to right)
pub fn edge_points(mask: &EdgeMask) -> Vec<EdgePoint> {
    let width = mask.width();
    let height = mask.height();
    let mut points = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask.get(x, y) {
                points.push(EdgePoint::new(x, y));
            }
        }
    }

    points
}

/// Ensure mask and gradient field cover the same pixel grid
pub fn check_inputs(mask: &EdgeMask, gradient: &GradientField) -> Result<()> {
    if mask.width() != gradient.width() || mask.height() != gradient.height() {
        return Err(HoughError::InvalidInput(format!(
            "edge mask is {}x{} but gradient field is {}x{}",
            mask.width(),
            mask.height(),
            gradient.width(),
            gradient.height()
        )));
    }
    if mask.width() == 0 || mask.height() == 0 {
        return Err(HoughError::InvalidInput(format!(
            "image must not be empty, got {}x{}",
            mask.width(),
            mask.height()
        )));
    }
    Ok(())
}
