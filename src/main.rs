//! Render a YAML scene description to an image file

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use image::RgbImage;
use indicatif::ProgressBar;
use log::{info, LevelFilter};

use sphere_tracing::color::Color;
use sphere_tracing::scene::{RasterSink, Scene, SceneConfig};

mod logger;

/// Log levels understood on the command line
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser)]
#[command(name = "sphere-tracing")]
#[command(about = "Render a sphere scene with recursive ray tracing")]
struct Args {
    /// Scene description file (YAML)
    scene: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "600")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

/// Raster sink over an image buffer
///
/// Flips the renderer's centered coordinates to the image's top-left origin
/// and drops writes that land outside the frame.
struct ImageSink {
    image: RgbImage,
    progress: ProgressBar,
}

impl ImageSink {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            progress: ProgressBar::new(u64::from(width) * u64::from(height)),
        }
    }
}

impl RasterSink for ImageSink {
    fn put_pixel(&mut self, x: i64, y: i64, color: Color) {
        let width = i64::from(self.image.width());
        let height = i64::from(self.image.height());
        let px = width / 2 + x;
        let py = height / 2 - 1 - y;
        if (0..width).contains(&px) && (0..height).contains(&py) {
            self.image
                .put_pixel(px as u32, py as u32, image::Rgb(color.to_bytes()));
        }
        self.progress.inc(1);
    }

    fn flush(&mut self) {
        self.progress.finish();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level.into());

    let text = fs::read_to_string(&args.scene)
        .with_context(|| format!("reading scene file {}", args.scene.display()))?;
    let config: SceneConfig = serde_yaml::from_str(&text).context("parsing scene file")?;
    let scene = Scene::from_config(config);

    let start = Instant::now();
    let mut sink = ImageSink::new(args.width, args.height);
    scene.render(args.width, args.height, &mut sink);
    info!("rendered in {:.2?}", start.elapsed());

    sink.image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}
