//! Image processing helpers around the Hough core
//!
//! This module provides the pre- and post-processing stages:
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Gaussian smoothing
//! - Sobel gradients (magnitude and direction)
//! - Edge thresholding
//! - Circle drawing for annotation and synthetic images

pub mod blur;
pub mod draw;
pub mod gradient;
pub mod grayscale;
pub mod threshold;
