//! End-to-end detection tests on synthetic images
//!
//! These tests run the whole pipeline (grayscale, edges, voting, maxima) on
//! rendered circle outlines and check the recovered centers and radii, the
//! determinism of the sequential and parallel paths, and input validation.

use hough_circles::tools::synthetic_circle_image;
use hough_circles::utils::draw::draw_circle_gray;
use hough_circles::{
    CircleDetector, EdgeFeatures, EdgeMask, GradientField, HoughConfig, HoughError,
    detect_circles, detect_circles_rgb, hough_circles,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn two_ring_image() -> Vec<u8> {
    let mut gray = vec![0u8; 64 * 64];
    draw_circle_gray(&mut gray, 64, 64, (20, 20, 8), 255);
    draw_circle_gray(&mut gray, 64, 64, (44, 40, 12), 255);
    gray
}

#[test]
fn test_single_ring_recovered() {
    init_logging();
    let gray = synthetic_circle_image(50, 25, 25, 10);
    let circles = detect_circles(&gray, 50, 50, &HoughConfig::default()).unwrap();

    assert!(!circles.is_empty());
    assert!(circles.len() <= 4);
    let best = circles[0];
    assert!(best.is_near(25, 25, 10, 2), "got {}", best);
    for pair in circles.windows(2) {
        assert!(pair[0].votes >= pair[1].votes);
    }
}

#[test]
fn test_two_rings_ranked_first() {
    init_logging();
    let gray = two_ring_image();
    let circles = detect_circles(&gray, 64, 64, &HoughConfig::default()).unwrap();

    assert!(circles.len() >= 2);
    let top = &circles[..2];
    assert!(
        top.iter().any(|c| c.is_near(20, 20, 8, 2)),
        "small ring missing from {:?}",
        top
    );
    assert!(
        top.iter().any(|c| c.is_near(44, 40, 12, 2)),
        "large ring missing from {:?}",
        top
    );
}

#[test]
fn test_n_circles_limits_output() {
    let gray = two_ring_image();
    let config = HoughConfig::default().with_circles(1);
    let circles = detect_circles(&gray, 64, 64, &config).unwrap();
    assert_eq!(circles.len(), 1);
    assert!(circles[0].is_near(20, 20, 8, 2), "got {}", circles[0]);

    let none = detect_circles(&gray, 64, 64, &HoughConfig::default().with_circles(0)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_rgb_matches_gray() {
    let gray = synthetic_circle_image(50, 25, 25, 10);
    let rgb: Vec<u8> = gray.iter().flat_map(|&v| [v, v, v]).collect();
    let config = HoughConfig::default();
    assert_eq!(
        detect_circles_rgb(&rgb, 50, 50, &config).unwrap(),
        detect_circles(&gray, 50, 50, &config).unwrap()
    );
}

#[test]
fn test_parallel_rgb_matches_sequential() {
    let gray = two_ring_image();
    let rgb: Vec<u8> = gray.iter().flat_map(|&v| [v, v / 2, v]).collect();
    let config = HoughConfig::default();
    let sequential = detect_circles_rgb(&rgb, 64, 64, &config).unwrap();
    let parallel = detect_circles_rgb(&rgb, 64, 64, &config.with_parallel(true)).unwrap();
    assert!(!sequential.is_empty());
    assert_eq!(sequential, parallel);
}

#[test]
fn test_parallel_matches_sequential() {
    init_logging();
    let gray = two_ring_image();
    let sequential = detect_circles(&gray, 64, 64, &HoughConfig::default()).unwrap();
    let parallel =
        detect_circles(&gray, 64, 64, &HoughConfig::default().with_parallel(true)).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_repeated_runs_identical() {
    let gray = two_ring_image();
    let detector = CircleDetector::new();
    let first = detector.detect(&gray, 64, 64).unwrap();
    for _ in 0..3 {
        assert_eq!(detector.detect(&gray, 64, 64).unwrap(), first);
    }
}

#[test]
fn test_blank_image_yields_nothing() {
    let gray = vec![0u8; 40 * 30];
    let (circles, telemetry) = CircleDetector::new()
        .detect_with_telemetry(&gray, 40, 30)
        .unwrap();
    assert!(circles.is_empty());
    assert_eq!(telemetry.edge_pixels, 0);
    assert_eq!(telemetry.votes_cast, 0);
}

#[test]
fn test_telemetry_reports_stages() {
    let gray = synthetic_circle_image(50, 25, 25, 10);
    let (circles, telemetry) = CircleDetector::new()
        .detect_with_telemetry(&gray, 50, 50)
        .unwrap();
    assert_eq!(telemetry.accumulator_dims, (50, 50, 70));
    assert!(telemetry.edge_pixels > 0);
    assert!(telemetry.votes_cast > telemetry.edge_pixels);
    assert!(telemetry.maxima_found >= circles.len());
    assert!(telemetry.total_ms() >= 0.0);
}

#[test]
fn test_invalid_inputs() {
    let config = HoughConfig::default();
    assert!(matches!(
        detect_circles(&[0u8; 10], 4, 4, &config),
        Err(HoughError::InvalidInput(_))
    ));
    assert!(matches!(
        detect_circles(&[], 0, 0, &config),
        Err(HoughError::InvalidInput(_))
    ));

    let mask = EdgeMask::new(10, 10);
    let gradient = GradientField::new(10, 12);
    assert!(matches!(
        hough_circles(&mask, &gradient, &config),
        Err(HoughError::InvalidInput(_))
    ));
}

#[test]
fn test_invalid_config() {
    let gray = synthetic_circle_image(20, 10, 10, 5);
    for config in [
        HoughConfig::default().with_neighborhood(6),
        HoughConfig::default().with_neighborhood(1),
        HoughConfig::default().with_edge_threshold(1.5),
    ] {
        assert!(matches!(
            detect_circles(&gray, 20, 20, &config),
            Err(HoughError::Configuration(_))
        ));
    }
}

#[test]
fn test_hand_built_edges() {
    // Edge pixels on a ring of radius 9 with gradients pointing outward
    let mut mask = EdgeMask::new(40, 40);
    let mut gradient = GradientField::new(40, 40);
    for step in 0..360 {
        let t = (step as f64).to_radians();
        let x = (20.0 + 9.0 * t.cos()).round() as usize;
        let y = (20.0 + 9.0 * t.sin()).round() as usize;
        mask.set(x, y, true);
        gradient.set(x, y, (y as f64 - 20.0).atan2(x as f64 - 20.0));
    }

    let circles = hough_circles(&mask, &gradient, &HoughConfig::default()).unwrap();
    assert!(circles[0].is_near(20, 20, 9, 1), "got {}", circles[0]);

    let features = EdgeFeatures { mask, gradient };
    assert_eq!(
        CircleDetector::new().detect_features(&features).unwrap(),
        circles
    );
}
