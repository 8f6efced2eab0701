//! Gradient-directed Hough transform for circles
//!
//! - Parameter space discretization (center-x, center-y, radius)
//! - Edge pixel enumeration
//! - Vote accumulation along reversed gradient rays
//! - Strict local-maximum extraction and ranking

/// Value/index mapping for the accumulator axes
pub mod discretizer;
/// Edge pixel enumeration
pub mod edges;
/// Local-maximum extraction
pub mod maxima;
/// Vote accumulation
pub mod voting;

use std::time::Instant;

use crate::DetectionTelemetry;
use crate::config::HoughConfig;
use crate::error::Result;
use crate::models::{CandidateMaximum, Circle, EdgeMask, GradientField};

pub use discretizer::Discretizer;
pub use edges::edge_points;
pub use maxima::MaximaExtractor;
pub use voting::{AccumulatorBuilder, Votes};

/// Result of one Hough run
#[derive(Debug, Clone)]
pub struct HoughOutput {
    /// Ranked maxima in index space
    pub candidates: Vec<CandidateMaximum>,
    /// The same maxima in image coordinates
    pub circles: Vec<Circle>,
    /// Stage counters and timings
    pub telemetry: DetectionTelemetry,
}

/// Run voting and extraction on a prepared edge mask and gradient field.
///
/// Fails before allocating anything when the configuration is invalid, the
/// inputs disagree on size, or the accumulator would exceed
/// `config.max_cells`. An empty mask yields no circles.
pub fn run(mask: &EdgeMask, gradient: &GradientField, config: &HoughConfig) -> Result<HoughOutput> {
    config.validate()?;
    edges::check_inputs(mask, gradient)?;

    let discretizer = Discretizer::new(config.grid, mask.width(), mask.height())?;
    discretizer.check_cell_limit(config.max_cells)?;

    let mut telemetry = DetectionTelemetry {
        accumulator_dims: discretizer.dims(),
        ..Default::default()
    };

    let edges = edge_points(mask);
    telemetry.edge_pixels = edges.len();
    log::debug!(
        "hough: {} edge pixels, accumulator {:?}, radii {:?}",
        edges.len(),
        discretizer.dims(),
        discretizer.radius_range()
    );

    if edges.is_empty() {
        return Ok(HoughOutput {
            candidates: Vec::new(),
            circles: Vec::new(),
            telemetry,
        });
    }

    let start = Instant::now();
    let builder = AccumulatorBuilder::new(&discretizer);
    let votes = builder.build_with(&edges, gradient, config.parallel);
    telemetry.votes_cast = votes.votes_cast;
    telemetry.vote_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "hough: {} votes cast in {:.2} ms",
        votes.votes_cast,
        telemetry.vote_ms
    );

    let start = Instant::now();
    let extractor = MaximaExtractor::new(&votes.accumulator, config.neighborhood);
    let mut candidates = extractor.find_all(&votes.accumulator, config.parallel);
    telemetry.maxima_found = candidates.len();
    maxima::rank(&mut candidates, config.n_circles);
    telemetry.extract_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "hough: {} local maxima, kept {} in {:.2} ms",
        telemetry.maxima_found,
        candidates.len(),
        telemetry.extract_ms
    );

    let circles = candidates
        .iter()
        .map(|c| discretizer.materialize(c))
        .collect();

    Ok(HoughOutput {
        candidates,
        circles,
        telemetry,
    })
}

/// Detect circles from an edge mask and gradient direction field
pub fn hough_circles(
    mask: &EdgeMask,
    gradient: &GradientField,
    config: &HoughConfig,
) -> Result<Vec<Circle>> {
    run(mask, gradient, config).map(|out| out.circles)
}
