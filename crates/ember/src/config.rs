//! Showcase configuration.
//!
//! Loaded once at startup from TOML. Every field has a default, and the
//! defaults reproduce the six demo scenes, so an empty file is valid.
//!
//! ```toml
//! asset_root = "assets"
//! frames = 600
//!
//! [[scenes]]
//! effect = "rain"
//! job = "update"
//! max_count = 900
//! spawn_radius = 0.45
//! origin = [0.5, 1.05]
//! drift = [0.03, 0.0]
//! intensity = 0.5
//! intensity_mode = "count"
//! ```

use std::path::{Path, PathBuf};

use ember_compute::SceneSpec;
use ember_core::{Effect, IntensityMode};
use ember_rendering::{SceneExtras, TextBox};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path as given.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ShowcaseConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level showcase configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Directory holding `effects/<name>/...` and the shared kernels.
    pub asset_root: PathBuf,
    /// Queue kernel, relative to `asset_root`.
    pub queue_wgsl: String,
    /// Worker kernel, relative to `asset_root`.
    pub worker_wgsl: String,
    /// Frames to run; 0 runs until an error.
    pub frames: u64,
    /// Target pause between frames.
    pub frame_interval_ms: u64,
    /// Scenes, stepped in this order.
    pub scenes: Vec<SceneConfig>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            queue_wgsl: "kernels/queue.wgsl".to_owned(),
            worker_wgsl: "kernels/worker.wgsl".to_owned(),
            frames: 600,
            frame_interval_ms: 16,
            scenes: SceneConfig::demo_scenes(),
        }
    }
}

impl ShowcaseConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Read, parse or validation failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Parse or validation failure.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every scene.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes.is_empty() {
            return Err(ConfigError::Invalid("no scenes configured".to_owned()));
        }
        for (index, scene) in self.scenes.iter().enumerate() {
            scene
                .validate()
                .map_err(|reason| ConfigError::Invalid(format!("scene {index} ({}): {reason}", scene.effect)))?;
        }
        Ok(())
    }
}

/// One scene entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Effect name.
    pub effect: Effect,
    /// Job key within the effect.
    pub job: String,
    /// Particle and job count.
    pub max_count: u32,
    /// Spawn radius around `origin`.
    pub spawn_radius: f32,
    /// Emitter position, unit space.
    pub origin: [f32; 2],
    /// Drift velocity.
    pub drift: [f32; 2],
    /// Initial intensity in [0, 1]; absent means no intensity input.
    pub intensity: Option<f32>,
    /// What intensity controls.
    pub intensity_mode: IntensityMode,
    /// Canvas size in pixels.
    pub canvas: [u32; 2],
    /// Decoder decoration.
    pub extras: SceneExtras,
    /// Seed for initial particle state; defaults to the scene index.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            effect: Effect::Fire,
            job: "physics".to_owned(),
            max_count: 700,
            spawn_radius: 0.05,
            origin: [0.5, 0.15],
            drift: [0.0, 0.0],
            intensity: None,
            intensity_mode: IntensityMode::Count,
            canvas: [480, 320],
            extras: SceneExtras::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// The six demo scenes.
    #[must_use]
    pub fn demo_scenes() -> Vec<Self> {
        let text_box = TextBox { x: 0.35, y: 0.2, w: 0.3, h: 0.25 };
        vec![
            Self {
                extras: SceneExtras { torch: Some([0.5, 0.2]), text_box: None },
                ..Self::default()
            },
            Self {
                effect: Effect::Sparks,
                job: "update".to_owned(),
                max_count: 450,
                spawn_radius: 0.01,
                origin: [0.5, 0.4],
                drift: [0.0, -0.2],
                ..Self::default()
            },
            Self {
                effect: Effect::Text,
                job: "layout".to_owned(),
                max_count: 220,
                spawn_radius: 0.03,
                origin: text_box.spawn_origin(),
                extras: SceneExtras { torch: None, text_box: Some(text_box) },
                ..Self::default()
            },
            Self {
                effect: Effect::Rain,
                job: "update".to_owned(),
                max_count: 900,
                spawn_radius: 0.45,
                origin: [0.5, 1.05],
                drift: [0.03, 0.0],
                intensity: Some(1.0),
                ..Self::default()
            },
            Self {
                effect: Effect::Snow,
                job: "update".to_owned(),
                max_count: 600,
                spawn_radius: 0.4,
                origin: [0.5, 1.05],
                drift: [0.08, 0.0],
                intensity: Some(1.0),
                ..Self::default()
            },
            Self {
                effect: Effect::Firework,
                job: "update".to_owned(),
                max_count: 900,
                spawn_radius: 0.25,
                origin: [0.5, 0.4],
                drift: [0.02, 0.0],
                intensity: Some(1.0),
                intensity_mode: IntensityMode::Size,
                ..Self::default()
            },
        ]
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_count == 0 {
            return Err("max_count must be at least 1".to_owned());
        }
        if self.canvas[0] == 0 || self.canvas[1] == 0 {
            return Err(format!("canvas {}x{} is empty", self.canvas[0], self.canvas[1]));
        }
        if let Some(intensity) = self.intensity {
            if !(0.0..=1.0).contains(&intensity) {
                return Err(format!("intensity {intensity} outside [0, 1]"));
            }
        }
        Ok(())
    }

    /// Scene description for the compute crate.
    #[must_use]
    pub fn to_spec(&self, index: usize) -> SceneSpec {
        SceneSpec {
            effect: self.effect,
            job: self.job.clone(),
            max_count: self.max_count,
            spawn_radius: self.spawn_radius,
            origin: self.origin,
            drift: self.drift,
            intensity: self.intensity,
            intensity_mode: self.intensity_mode,
            extras: self.extras,
            rng_seed: self.seed.unwrap_or(index as u64),
        }
    }

    /// Canvas size as floats.
    #[must_use]
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas[0] as f32, self.canvas[1] as f32)
    }
}
