//! hough_circles - Gradient-directed Hough circle detection
//!
//! Every edge pixel votes only along the ray opposite its gradient
//! direction, so the accumulator stays sparse in practice and strong
//! circles stand out as strict local maxima in (center-x, center-y, radius)
//! space.
//!
//! ```
//! use hough_circles::{HoughConfig, detect_circles};
//!
//! let gray = vec![0u8; 32 * 32];
//! let circles = detect_circles(&gray, 32, 32, &HoughConfig::default()).unwrap();
//! assert!(circles.is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detector configuration (grid, neighborhood, thresholds)
pub mod config;
/// Error type shared by every stage
pub mod error;
/// Hough core: discretization, voting, maxima extraction
pub mod hough;
/// Core data structures (EdgeMask, GradientField, Accumulator, Circle)
pub mod models;
/// Edge and gradient extraction
pub mod pipeline;
/// Image I/O and synthetic test images
pub mod tools;
/// Image processing helpers (grayscale, blur, Sobel, threshold, drawing)
pub mod utils;

pub use config::{AxisGrid, GridParams, HoughConfig};
pub use error::{HoughError, Result};
pub use hough::{HoughOutput, hough_circles};
pub use models::{Accumulator, CandidateMaximum, Circle, EdgeMask, EdgePoint, GradientField};
pub use pipeline::EdgeFeatures;

use std::time::Instant;

/// Per-stage counters and timings of one detection
#[derive(Debug, Clone, Default)]
pub struct DetectionTelemetry {
    /// Pixels set in the edge mask
    pub edge_pixels: usize,
    /// Votes that landed inside the accumulator
    pub votes_cast: usize,
    /// Accumulator extents (columns, rows, radii)
    pub accumulator_dims: (usize, usize, usize),
    /// Strict local maxima before truncation
    pub maxima_found: usize,
    /// Edge and gradient extraction time
    pub preprocess_ms: f64,
    /// Voting time
    pub vote_ms: f64,
    /// Maxima extraction and ranking time
    pub extract_ms: f64,
}

impl DetectionTelemetry {
    /// Sum of all stage timings
    pub fn total_ms(&self) -> f64 {
        self.preprocess_ms + self.vote_ms + self.extract_ms
    }
}

/// Detect circles in a grayscale image
///
/// # Arguments
/// * `gray` - Grayscale bytes (1 byte per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `config` - Detector configuration
///
/// # Returns
/// Up to `config.n_circles` circles, strongest first
pub fn detect_circles(
    gray: &[u8],
    width: usize,
    height: usize,
    config: &HoughConfig,
) -> Result<Vec<Circle>> {
    CircleDetector::with_config(*config).detect(gray, width, height)
}

/// Detect circles in an RGB image (3 bytes per pixel)
pub fn detect_circles_rgb(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &HoughConfig,
) -> Result<Vec<Circle>> {
    CircleDetector::with_config(*config).detect_rgb(rgb, width, height)
}

/// Detector holding a configuration, reusable across images
#[derive(Debug, Clone, Default)]
pub struct CircleDetector {
    config: HoughConfig,
}

impl CircleDetector {
    /// Create a detector with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with an explicit configuration
    pub fn with_config(config: HoughConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &HoughConfig {
        &self.config
    }

    /// Detect circles in a grayscale image
    pub fn detect(&self, gray: &[u8], width: usize, height: usize) -> Result<Vec<Circle>> {
        self.detect_with_telemetry(gray, width, height)
            .map(|(circles, _)| circles)
    }

    /// Detect circles in an RGB image
    pub fn detect_rgb(&self, rgb: &[u8], width: usize, height: usize) -> Result<Vec<Circle>> {
        self.detect_rgb_with_telemetry(rgb, width, height)
            .map(|(circles, _)| circles)
    }

    /// Detect circles from already extracted edges and gradients
    pub fn detect_features(&self, features: &EdgeFeatures) -> Result<Vec<Circle>> {
        hough_circles(&features.mask, &features.gradient, &self.config)
    }

    /// Detect circles in a grayscale image and report stage telemetry
    pub fn detect_with_telemetry(
        &self,
        gray: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(Vec<Circle>, DetectionTelemetry)> {
        self.config.validate()?;
        let start = Instant::now();
        let features =
            EdgeFeatures::from_grayscale(gray, width, height, self.config.edge_threshold_ratio)?;
        let preprocess_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.run_features(&features, preprocess_ms)
    }

    /// Detect circles in an RGB image and report stage telemetry
    pub fn detect_rgb_with_telemetry(
        &self,
        rgb: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(Vec<Circle>, DetectionTelemetry)> {
        self.config.validate()?;
        let start = Instant::now();
        let features = EdgeFeatures::from_rgb(
            rgb,
            width,
            height,
            self.config.edge_threshold_ratio,
            self.config.parallel,
        )?;
        let preprocess_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.run_features(&features, preprocess_ms)
    }

    fn run_features(
        &self,
        features: &EdgeFeatures,
        preprocess_ms: f64,
    ) -> Result<(Vec<Circle>, DetectionTelemetry)> {
        let output = hough::run(&features.mask, &features.gradient, &self.config)?;
        let telemetry = DetectionTelemetry {
            preprocess_ms,
            ..output.telemetry
        };
        log::info!(
            "detected {} circle(s) from {} edge pixels in {:.2} ms",
            output.circles.len(),
            telemetry.edge_pixels,
            telemetry.total_ms()
        );
        Ok((output.circles, telemetry))
    }
}
