//! Image gradients with the 3×3 Sobel operator.
//!
//! - Outputs per-pixel `gx`, `gy` as `f64`.
//! - `magnitude = sqrt(gx^2 + gy^2)`, `direction = atan2(gy, gx)` in (−π, π].
//! - Borders mirror without repeating the edge pixel.
//!
//! Complexity: O(W·H); memory: two `f64` buffers.
use super::blur::reflect101;
use crate::models::GradientField;

type Kernel3 = [[f64; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Horizontal and vertical derivatives of a grayscale image
#[derive(Clone, Debug)]
pub struct SobelGradient {
    /// Image width
    pub width: usize,
    /// Image height
    pub height: usize,
    /// Horizontal derivative, row-major
    pub gx: Vec<f64>,
    /// Vertical derivative, row-major
    pub gy: Vec<f64>,
}

impl SobelGradient {
    /// Convolve `gray` with the Sobel kernel pair
    pub fn compute(gray: &[u8], width: usize, height: usize) -> Self {
        let mut gx = vec![0.0; width * height];
        let mut gy = vec![0.0; width * height];

        for y in 0..height {
            let rows = [
                reflect101(y as isize - 1, height) * width,
                y * width,
                reflect101(y as isize + 1, height) * width,
            ];
            for x in 0..width {
                let cols = [
                    reflect101(x as isize - 1, width),
                    x,
                    reflect101(x as isize + 1, width),
                ];

                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for (ky, &row) in rows.iter().enumerate() {
                    for (kx, &col) in cols.iter().enumerate() {
                        let v = gray[row + col] as f64;
                        sum_x += v * SOBEL_KERNEL_X[ky][kx];
                        sum_y += v * SOBEL_KERNEL_Y[ky][kx];
                    }
                }
                gx[y * width + x] = sum_x;
                gy[y * width + x] = sum_y;
            }
        }

        Self {
            width,
            height,
            gx,
            gy,
        }
    }

    /// Euclidean gradient magnitude per pixel
    pub fn magnitude(&self) -> Vec<f64> {
        self.gx
            .iter()
            .zip(&self.gy)
            .map(|(gx, gy)| (gx * gx + gy * gy).sqrt())
            .collect()
    }

    /// Gradient direction per pixel, `atan2(gy, gx)`
    pub fn direction(&self) -> GradientField {
        let angles = self
            .gx
            .iter()
            .zip(&self.gy)
            .map(|(gx, gy)| gy.atan2(*gx))
            .collect();
        GradientField::from_raw(angles, self.width, self.height)
    }
}
