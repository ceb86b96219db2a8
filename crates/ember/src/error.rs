//! Top-level showcase errors.

use ember_compute::GpuError;
use ember_effects::AssetError;
use thiserror::Error;

use crate::config::ConfigError;

/// Anything that stops the showcase.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Bad or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Kernel sources could not be loaded.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Device, scene creation or per-tick failure.
    #[error(transparent)]
    Gpu(#[from] GpuError),

    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
