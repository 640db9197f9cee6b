//! Pogo - headless demo of the pogo stick locomotion controller
//!
//! Builds a small test level, then drives the controller with scripted input
//! through the frame and physics clocks.

mod demo;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use demo::Demo;
use settings::Settings;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let mut args = std::env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some("--print-defaults") {
        println!("{}", Settings::default().to_toml()?);
        return Ok(());
    }

    let path = first.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("pogo.toml"));
    let settings = Settings::load(&path);
    settings.validate()?;

    info!("Starting pogo demo...");
    let summary = Demo::new(settings)?.run()?;

    info!(
        "Finished after {} frames / {} physics steps: {} jumps, {} bounces, {} sounds, ended at ({:.2}, {:.2}, {:.2})",
        summary.frames,
        summary.fixed_steps,
        summary.jumps,
        summary.bounces,
        summary.sounds,
        summary.final_position.x,
        summary.final_position.y,
        summary.final_position.z,
    );
    Ok(())
}
