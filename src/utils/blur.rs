//! Separable 5-tap Gaussian smoothing on 8-bit grayscale images.
//!
//! The kernel `[1, 4, 6, 4, 1] / 16` is the standard 5×5 Gaussian for
//! σ ≈ 1.1. Borders mirror without repeating the edge pixel
//! (`dcb|abcd|cba`). Arithmetic stays in integers and rounds once at the end.

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];

/// Mirror an out-of-range coordinate back into `[0, n)` without repeating the
/// border pixel
#[inline]
pub(crate) fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

/// Blur a grayscale image with the 5×5 Gaussian
pub fn gaussian_blur_5x5(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    if width == 0 || height == 0 {
        return out;
    }

    // Horizontal pass, scaled by 16
    let mut tmp = vec![0u32; width * height];
    for y in 0..height {
        let row = &gray[y * width..(y + 1) * width];
        let out_row = &mut tmp[y * width..(y + 1) * width];
        for (x, acc) in out_row.iter_mut().enumerate() {
            let mut sum = 0u32;
            for (k, &w) in KERNEL.iter().enumerate() {
                let xx = reflect101(x as isize + k as isize - 2, width);
                sum += w * row[xx] as u32;
            }
            *acc = sum;
        }
    }

    // Vertical pass, scaled by 256 in total
    for y in 0..height {
        let rows: [usize; 5] =
            std::array::from_fn(|k| reflect101(y as isize + k as isize - 2, height) * width);
        for x in 0..width {
            let mut sum = 0u32;
            for (k, &w) in KERNEL.iter().enumerate() {
                sum += w * tmp[rows[k] + x];
            }
            out[y * width + x] = ((sum + 128) >> 8) as u8;
        }
    }

    out
}
