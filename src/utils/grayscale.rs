//! Convert RGB images to 8-bit luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (77*R + 150*G + 29*B + 128) >> 8

use rayon::prelude::*;

/// Coefficients for grayscale conversion, summing to 256
const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + 128) >> 8) as u8
}

/// Convert an RGB image (3 bytes per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    rgb[..width * height * 3]
        .chunks_exact(3)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGB to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 3;
            *out = luma(rgb[idx], rgb[idx + 1], rgb[idx + 2]);
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let white = vec![255, 255, 255];
        assert_eq!(rgb_to_grayscale(&white, 1, 1)[0], 255);

        // Pure black
        let black = vec![0, 0, 0];
        assert_eq!(rgb_to_grayscale(&black, 1, 1)[0], 0);

        // Pure red
        let red = vec![255, 0, 0];
        let gray = rgb_to_grayscale(&red, 1, 1);
        assert!(gray[0] > 70 && gray[0] < 80);

        // Pure green dominates
        let green = vec![0, 255, 0];
        assert!(rgb_to_grayscale(&green, 1, 1)[0] > gray[0]);
    }

    #[test]
    fn test_parallel_matches_scalar() {
        let width = 37;
        let height = 23;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| (i * 37 % 256) as u8).collect();
        assert_eq!(
            rgb_to_grayscale(&rgb, width, height),
            rgb_to_grayscale_parallel(&rgb, width, height)
        );
    }
}
