use clap::Parser;
use gridbox::{postprocess, DetectConfig, Detection, RawPrediction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "GridBox CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

/// Detector config plus the raw tensors for one frame, flattened row-major.
#[derive(Debug, Deserialize)]
struct Config {
    threshold: f32,
    num_classes: usize,
    num_anchors: usize,
    anchors: Vec<(f32, f32)>,
    out_size: (usize, usize),
    image_height: usize,
    image_width: usize,
    output_path: Option<String>,
    bbox_pred: Vec<f32>,
    objectness: Vec<f32>,
    class_probs: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    bbox: [i32; 4],
    score: f32,
    class_idx: usize,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            bbox: [value.bbox.x1, value.bbox.y1, value.bbox.x2, value.bbox.y2],
            score: value.score,
            class_idx: value.class_idx,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("gridbox=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_height == 0 || config.image_width == 0 {
        return Err("image_height and image_width must be positive".into());
    }

    let detect_cfg = DetectConfig {
        threshold: config.threshold,
        num_classes: config.num_classes,
        num_anchors: config.num_anchors,
        anchors: config.anchors.clone(),
        out_size: config.out_size,
    };
    let pred = RawPrediction {
        bbox_pred: &config.bbox_pred,
        objectness: &config.objectness,
        class_probs: &config.class_probs,
    };

    let detections = postprocess(pred, config.image_height, config.image_width, &detect_cfg)?;
    let output = Output {
        detections: detections.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
