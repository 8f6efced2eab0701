//! Circle rasterization for annotation and synthetic test images

use image::{Rgb, RgbImage};

use crate::models::Circle;

/// Outline color used for detected circles
pub const ANNOTATION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Pixels of a one-pixel-thick circle outline (midpoint algorithm), possibly
/// outside any image and possibly repeated on octant boundaries
pub fn circle_outline(cx: i64, cy: i64, radius: i64) -> Vec<(i64, i64)> {
    let mut points = Vec::new();
    if radius < 0 {
        return points;
    }

    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;
    while x >= y {
        points.extend_from_slice(&[
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ]);
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    points
}

/// Draw a circle outline into a grayscale buffer, clipping at the borders
pub fn draw_circle_gray(
    gray: &mut [u8],
    width: usize,
    height: usize,
    (cx, cy, radius): (i64, i64, i64),
    value: u8,
) {
    for (x, y) in circle_outline(cx, cy, radius) {
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            gray[y as usize * width + x as usize] = value;
        }
    }
}

/// Draw a circle outline onto an RGB image, clipping at the borders
pub fn draw_circle_rgb(image: &mut RgbImage, circle: &Circle, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    for (x, y) in circle_outline(circle.x, circle.y, circle.radius) {
        if x >= 0 && y >= 0 && x < width as i64 && y < height as i64 {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw every detected circle in [`ANNOTATION_COLOR`]
pub fn annotate(image: &mut RgbImage, circles: &[Circle]) {
    for circle in circles {
        draw_circle_rgb(image, circle, ANNOTATION_COLOR);
    }
}
