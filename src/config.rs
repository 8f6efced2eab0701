//! Run parameters for circle detection
//!
//! Every tunable lives in an immutable [`HoughConfig`] threaded through the
//! pipeline. Defaults can be overridden from `HOUGH_*` environment variables
//! with [`HoughConfig::from_env`].

use crate::error::{HoughError, Result};

/// Default number of circles reported
pub const DEFAULT_N_CIRCLES: usize = 4;
/// Default edge threshold, as a fraction of the strongest gradient
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.1;
/// Default local-maximum neighborhood width
pub const DEFAULT_NEIGHBORHOOD: usize = 7;
/// Default accumulator cell budget (2 GiB of `f64`)
pub const DEFAULT_MAX_CELLS: usize = 1 << 28;

/// Discretization of one parameter axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGrid {
    /// Cell width
    pub step: f64,
    /// Value mapped to index 0
    pub min: f64,
}

impl AxisGrid {
    /// Create an axis grid
    pub const fn new(step: f64, min: f64) -> Self {
        Self { step, min }
    }
}

/// Grid parameters for the (column, row, radius) axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Center-x axis
    pub column: AxisGrid,
    /// Center-y axis
    pub row: AxisGrid,
    /// Radius axis
    pub radius: AxisGrid,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            column: AxisGrid::new(1.0, 0.0),
            row: AxisGrid::new(1.0, 0.0),
            radius: AxisGrid::new(1.0, 1.0),
        }
    }
}

impl GridParams {
    /// Reject non-positive steps and radii below one pixel
    pub fn validate(&self) -> Result<()> {
        for (name, axis) in [
            ("column", &self.column),
            ("row", &self.row),
            ("radius", &self.radius),
        ] {
            if !axis.step.is_finite() || axis.step <= 0.0 {
                return Err(HoughError::Configuration(format!(
                    "{} step must be positive and finite, got {}",
                    name, axis.step
                )));
            }
            if !axis.min.is_finite() {
                return Err(HoughError::Configuration(format!(
                    "{} minimum must be finite, got {}",
                    name, axis.min
                )));
            }
        }
        if self.radius.min < 1.0 {
            return Err(HoughError::Configuration(format!(
                "minimum radius must be at least 1, got {}",
                self.radius.min
            )));
        }
        Ok(())
    }
}

/// Full configuration of one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughConfig {
    /// Accumulator discretization
    pub grid: GridParams,
    /// Maximum number of circles returned
    pub n_circles: usize,
    /// Edge threshold ratio in [0, 1] of the normalized gradient magnitude
    pub edge_threshold_ratio: f64,
    /// Odd width of the cubic local-maximum neighborhood
    pub neighborhood: usize,
    /// Use rayon for voting and extraction
    pub parallel: bool,
    /// Upper bound on accumulator cells
    pub max_cells: usize,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            n_circles: DEFAULT_N_CIRCLES,
            edge_threshold_ratio: DEFAULT_EDGE_THRESHOLD,
            neighborhood: DEFAULT_NEIGHBORHOOD,
            parallel: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl HoughConfig {
    /// Defaults overridden by `HOUGH_N_CIRCLES`, `HOUGH_EDGE_THRESHOLD`,
    /// `HOUGH_NEIGHBORHOOD`, `HOUGH_PARALLEL` and `HOUGH_MAX_CELLS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            grid: defaults.grid,
            n_circles: parse_env_usize("HOUGH_N_CIRCLES", defaults.n_circles),
            edge_threshold_ratio: parse_env_f64(
                "HOUGH_EDGE_THRESHOLD",
                defaults.edge_threshold_ratio,
            ),
            neighborhood: parse_env_usize("HOUGH_NEIGHBORHOOD", defaults.neighborhood),
            parallel: parse_env_bool_u8("HOUGH_PARALLEL", defaults.parallel),
            max_cells: parse_env_usize("HOUGH_MAX_CELLS", defaults.max_cells),
        }
    }

    /// Set the number of circles
    pub fn with_circles(mut self, n_circles: usize) -> Self {
        self.n_circles = n_circles;
        self
    }

    /// Set the neighborhood width
    pub fn with_neighborhood(mut self, neighborhood: usize) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Set the edge threshold ratio
    pub fn with_edge_threshold(mut self, ratio: f64) -> Self {
        self.edge_threshold_ratio = ratio;
        self
    }

    /// Enable or disable parallel voting and extraction
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Neighborhood half-width
    pub fn padding(&self) -> usize {
        self.neighborhood / 2
    }

    /// Check every parameter before any buffer is allocated
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.neighborhood < 3 || self.neighborhood % 2 == 0 {
            return Err(HoughError::Configuration(format!(
                "neighborhood width must be odd and at least 3, got {}",
                self.neighborhood
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_threshold_ratio) {
            return Err(HoughError::Configuration(format!(
                "edge threshold ratio must lie in [0, 1], got {}",
                self.edge_threshold_ratio
            )));
        }
        if self.max_cells == 0 {
            return Err(HoughError::Configuration(
                "accumulator cell limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}
