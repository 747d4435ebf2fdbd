//! Render the demo scene to an image file.
//!
//! Run with: cargo run --release -- output.png [config.json]

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use whitted_renderer::{render, LogSink};

mod config;
mod demo;

use config::CliConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: whitted <output-image> [config.json]");
        println!("\nExamples:");
        println!("  cargo run --release -- render.png");
        println!("  cargo run --release -- render.png scenes/high_quality.json");
        return Ok(());
    }

    let output = PathBuf::from(&args[1]);
    let format = image::ImageFormat::from_path(&output)
        .with_context(|| format!("Unsupported output format: {}", output.display()))?;
    let config = match args.get(2) {
        Some(path) => CliConfig::load(path.as_ref())?,
        None => CliConfig::default(),
    };

    let scene = demo::build_scene(config.settings).context("Invalid scene configuration")?;
    log::debug!("{}", scene);

    let start = Instant::now();
    let frame = render(&scene, &config.request(), &LogSink).context("Render failed")?;
    log::info!(
        "Rendered {}x{} in {:?}",
        frame.width(),
        frame.height(),
        start.elapsed()
    );

    frame
        .save_with_format(&output, format)
        .with_context(|| format!("Failed to save image to {}", output.display()))?;
    log::info!("Saved to {}", output.display());

    Ok(())
}
