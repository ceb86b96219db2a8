//! # Core Error Types

use thiserror::Error;

/// Errors raised while sizing buffers or resolving effect names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The job count does not round up to a power of two that fits in `u32`.
    #[error("queue capacity overflow: cannot round {max_jobs} jobs up to a power of two")]
    CapacityOverflow {
        /// Requested job count.
        max_jobs: u32,
    },

    /// Effect name is not one of the known effects.
    #[error("unknown particle effect \"{name}\". Available: {available}.")]
    UnknownEffect {
        /// The name that was looked up.
        name: String,
        /// Comma-separated list of valid names.
        available: String,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
