//! GPU error types.

use ember_core::CoreError;
use ember_effects::AssetError;
use thiserror::Error;

/// Errors from scene creation and per-tick GPU work.
#[derive(Debug, Error)]
pub enum GpuError {
    /// No compute-capable adapter. Fatal at startup.
    #[error("no compute-capable GPU adapter found")]
    AdapterUnavailable,

    /// The adapter refused to create a device.
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Kernel asset lookup or load failure.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Queue layout could not be sized.
    #[error(transparent)]
    Layout(#[from] CoreError),

    /// Scene description that cannot be dispatched.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Mapping the readback buffer failed.
    #[error("failed to map readback buffer: {0}")]
    MapFailed(#[from] wgpu::BufferAsyncError),

    /// Error reported by the device outside any call (validation, loss).
    #[error("GPU device error: {0}")]
    DeviceError(String),

    /// The mapping callback was dropped without reporting.
    #[error("readback channel closed before the mapping resolved")]
    MapChannelClosed,
}

/// Result alias for GPU operations.
pub type GpuResult<T> = Result<T, GpuError>;
