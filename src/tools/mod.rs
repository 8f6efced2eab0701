use crate::error::{HoughError, Result};
use crate::models::{Circle, EdgeMask};
use crate::utils::draw::{annotate, draw_circle_gray};
use image::{GrayImage, RgbImage};
use std::path::Path;

/// Load an image as RGB bytes along with its dimensions.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize)> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// Load an image as grayscale bytes using the detector's luma weights.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize)> {
    let (rgb, width, height) = load_rgb(path)?;
    Ok((
        crate::utils::grayscale::rgb_to_grayscale(&rgb, width, height),
        width,
        height,
    ))
}

/// Square grayscale image with a one-pixel white circle outline on black.
pub fn synthetic_circle_image(size: usize, cx: i64, cy: i64, radius: i64) -> Vec<u8> {
    let mut gray = vec![0u8; size * size];
    draw_circle_gray(&mut gray, size, size, (cx, cy, radius), 255);
    gray
}

/// Draw detected circles over an RGB buffer and write it to `path`.
pub fn save_annotated<P: AsRef<Path>>(
    path: P,
    rgb: &[u8],
    width: usize,
    height: usize,
    circles: &[Circle],
) -> Result<()> {
    let mut image = RgbImage::from_raw(width as u32, height as u32, rgb.to_vec()).ok_or_else(
        || {
            HoughError::InvalidInput(format!(
                "RGB buffer of {} bytes does not match {}x{}",
                rgb.len(),
                width,
                height
            ))
        },
    )?;
    annotate(&mut image, circles);
    image.save(path)?;
    Ok(())
}

/// Write an edge mask as a black/white image.
pub fn save_mask<P: AsRef<Path>>(path: P, mask: &EdgeMask) -> Result<()> {
    save_gray(path, &mask.to_bytes(), mask.width(), mask.height())
}

/// Write a grayscale buffer to `path`.
pub fn save_gray<P: AsRef<Path>>(path: P, gray: &[u8], width: usize, height: usize) -> Result<()> {
    let image = GrayImage::from_raw(width as u32, height as u32, gray.to_vec()).ok_or_else(|| {
        HoughError::InvalidInput(format!(
            "grayscale buffer of {} bytes does not match {}x{}",
            gray.len(),
            width,
            height
        ))
    })?;
    image.save(path)?;
    Ok(())
}
