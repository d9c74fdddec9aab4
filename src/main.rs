use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use zonescan::{annotate, DebugDump, Detector, DetectorConfig, PixelBuffer};

#[derive(Parser)]
#[command(name = "zonescan")]
#[command(about = "Find landing zones, drop zones, targets and buckets by color")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// TOML class configuration (defaults to the built-in field classes)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print detections as JSON
    #[arg(long)]
    json: bool,

    /// Write an annotated copy of the image (boxes, circles and centroid
    /// markers; class labels appear only in the printed results)
    #[arg(long, value_name = "OUT")]
    annotate: Option<PathBuf>,

    /// Save per-class masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Evaluate classes in parallel
    #[arg(long)]
    parallel: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::reference(),
    };
    let detector = Detector::new(config)?;
    tracing::debug!(classes = detector.config().classes.len(), "detector ready");

    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    tracing::info!(
        path = %args.image_path.display(),
        width = img.width(),
        height = img.height(),
        "image loaded"
    );
    let frame = PixelBuffer::from_dynamic(&img);

    let detections = if let Some(dir) = &args.debug_out {
        let dump = DebugDump::new(dir.clone())?;
        let (detections, traces) = detector.detect_traced(&frame)?;
        let written = dump.write(&frame, &traces)?;
        tracing::info!(files = written, dir = %dir.display(), "debug output saved");
        detections
    } else if args.parallel {
        detector.detect_par(&frame)?
    } else {
        detector.detect(&frame)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detections)?);
    } else {
        println!("\n=== Detection Results ===");
        println!("Total detections: {}", detections.len());

        for det in &detections {
            let b = det.bbox;
            print!(
                "  {} at ({}, {}) {}x{} - area: {:.1}",
                det.label, b.x, b.y, b.width, b.height, det.area
            );
            if let Some(c) = det.centroid {
                print!(", centroid: ({:.1}, {:.1})", c.x, c.y);
            }
            if let Some(circle) = det.circle {
                print!(
                    ", circle: ({:.1}, {:.1}) r={:.1}",
                    circle.cx, circle.cy, circle.radius
                );
            }
            println!();
        }
    }

    if let Some(out) = &args.annotate {
        let result = annotate::annotate(frame.as_rgb_image(), &detections, detector.config());
        result
            .save(out)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        tracing::info!(path = %out.display(), "annotated image saved");
    }

    Ok(())
}
