use clap::{Parser, Subcommand};
use hough_circles::tools::{load_rgb, save_annotated, save_gray, save_mask, synthetic_circle_image};
use hough_circles::{CircleDetector, EdgeFeatures, HoughConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "houghtool", version, about = "Hough circle detection tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect circles in an image and optionally write an annotated copy
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Where to write the image with detected circles drawn in green
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of circles to report
        #[arg(long)]
        circles: Option<usize>,
        /// Edge threshold as a fraction of the strongest gradient
        #[arg(long)]
        threshold: Option<f64>,
        /// Side of the local-maximum neighborhood (odd)
        #[arg(long)]
        neighborhood: Option<usize>,
        /// Convert, vote and extract on all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Write the edge mask used for voting
    Edges {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Write a synthetic image with one circle outline
    Synth {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long, default_value_t = 25)]
        cx: i64,
        #[arg(long, default_value_t = 25)]
        cy: i64,
        #[arg(long, default_value_t = 10)]
        radius: i64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Detect {
            image,
            output,
            circles,
            threshold,
            neighborhood,
            parallel,
        } => {
            let mut config = HoughConfig::from_env();
            if let Some(n) = circles {
                config = config.with_circles(n);
            }
            if let Some(ratio) = threshold {
                config = config.with_edge_threshold(ratio);
            }
            if let Some(k) = neighborhood {
                config = config.with_neighborhood(k);
            }
            if parallel {
                config = config.with_parallel(true);
            }
            detect_cmd(&image, output.as_deref(), config)
        }
        Command::Edges {
            image,
            output,
            threshold,
        } => {
            let mut config = HoughConfig::from_env();
            if let Some(ratio) = threshold {
                config = config.with_edge_threshold(ratio);
            }
            edges_cmd(&image, &output, config)
        }
        Command::Synth {
            output,
            size,
            cx,
            cy,
            radius,
        } => synth_cmd(&output, size, (cx, cy, radius)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn detect_cmd(image: &Path, output: Option<&Path>, config: HoughConfig) -> hough_circles::Result<()> {
    let (pixels, width, height) = load_rgb(image)?;
    println!("Image: {} ({}x{})", image.display(), width, height);

    let start = Instant::now();
    let detector = CircleDetector::with_config(config);
    let (circles, telemetry) = detector.detect_rgb_with_telemetry(&pixels, width, height)?;
    let elapsed = start.elapsed();

    println!(
        "Edges: {} pixels, accumulator {:?}, {} votes, {} local maxima",
        telemetry.edge_pixels,
        telemetry.accumulator_dims,
        telemetry.votes_cast,
        telemetry.maxima_found
    );
    println!("Found {} circles", circles.len());
    for (i, circle) in circles.iter().enumerate() {
        println!("  Circle {}: {}", i, circle);
    }
    println!(
        "Execution time: {:.3} s (edges {:.2} ms, voting {:.2} ms, maxima {:.2} ms)",
        elapsed.as_secs_f64(),
        telemetry.preprocess_ms,
        telemetry.vote_ms,
        telemetry.extract_ms
    );

    if let Some(path) = output {
        save_annotated(path, &pixels, width, height, &circles)?;
        println!("Annotated image written to {}", path.display());
    }
    Ok(())
}

fn edges_cmd(image: &Path, output: &Path, config: HoughConfig) -> hough_circles::Result<()> {
    config.validate()?;
    let ratio = config.edge_threshold_ratio;
    let (pixels, width, height) = load_rgb(image)?;
    let features = EdgeFeatures::from_rgb(&pixels, width, height, ratio, config.parallel)?;
    save_mask(output, &features.mask)?;
    println!(
        "Edge mask: {} of {} pixels above ratio {} written to {}",
        features.mask.count(),
        width * height,
        ratio,
        output.display()
    );
    Ok(())
}

fn synth_cmd(output: &Path, size: usize, circle: (i64, i64, i64)) -> hough_circles::Result<()> {
    let (cx, cy, radius) = circle;
    let gray = synthetic_circle_image(size, cx, cy, radius);
    save_gray(output, &gray, size, size)?;
    println!(
        "Synthetic {}x{} image with circle center=({}, {}) radius={} written to {}",
        size,
        size,
        cx,
        cy,
        radius,
        output.display()
    );
    Ok(())
}
