//! # EMBER Showcase
//!
//! Builds one GPU particle scene per configured effect and drives them all
//! from a single frame loop until the frame budget runs out or a scene fails.
//!
//! ## Usage
//!
//! ```bash
//! ember                   # six demo scenes, assets under ./assets
//! ember showcase.toml     # scenes from a config file
//! RUST_LOG=ember_compute=trace ember
//! ```

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ember_compute::{FrameDriver, GpuContext, KernelSources, Scene};
use ember_core::intensity_percent;
use ember_effects::{AssetLoader, ConcatAssembler};
use ember_rendering::DrawRecorder;
use tracing_subscriber::EnvFilter;

use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;

/// Frames between summary lines.
const REPORT_EVERY: u64 = 120;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run() {
        Ok(frames) => {
            tracing::info!(frames, "showcase finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "showcase stopped");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<u64, ShowcaseError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading config");
            ShowcaseConfig::load(path)?
        }
        None => {
            tracing::info!("no config given, running demo scenes");
            ShowcaseConfig::default()
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let mut driver = runtime.block_on(build_scenes(&config))?;

    let interval = Duration::from_millis(config.frame_interval_ms);
    while config.frames == 0 || driver.frames() < config.frames {
        let started = Instant::now();
        let report = runtime.block_on(driver.frame(started))?;

        for (scene, stats) in driver.targets().iter().zip(&report.stats) {
            if let Some(stats) = stats {
                tracing::debug!(
                    scene = scene.label(),
                    frame = report.frame,
                    drawn = stats.drawn,
                    skipped = stats.skipped,
                    "frame drawn"
                );
            }
        }
        if report.frame % REPORT_EVERY == 0 {
            let drawn: u32 = report.stats.iter().flatten().map(|s| s.drawn).sum();
            tracing::info!(frame = report.frame, time = report.time, dt = report.dt, drawn, "frame");
        }

        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    Ok(driver.frames())
}

async fn build_scenes(config: &ShowcaseConfig) -> Result<FrameDriver<Scene>, ShowcaseError> {
    let ctx = Arc::new(GpuContext::new().await?);
    let loader = AssetLoader::from_dir(&config.asset_root);
    let kernels = KernelSources::load(&loader, &config.queue_wgsl, &config.worker_wgsl).await?;

    let mut scenes = Vec::with_capacity(config.scenes.len());
    for (index, scene_config) in config.scenes.iter().enumerate() {
        let (width, height) = scene_config.canvas_size();
        let scene = Scene::create(
            Arc::clone(&ctx),
            &loader,
            &ConcatAssembler,
            &kernels,
            scene_config.to_spec(index),
            Box::new(DrawRecorder::new(width, height)),
        )
        .await?;

        if scene_config.intensity.is_some() {
            tracing::info!(
                scene = scene.label(),
                intensity = %format!("{}%", intensity_percent(scene.state().intensity())),
                active = scene.state().active_count(),
                "intensity"
            );
        }
        scenes.push(scene);
    }

    Ok(FrameDriver::new(scenes, Instant::now()))
}
