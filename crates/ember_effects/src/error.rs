//! # Asset Error Types
//!
//! Lookup failures name the offending key and every valid alternative.
//! Transport failures and malformed content are kept apart so callers can
//! tell a bad server root from a missing file.

use thiserror::Error;

/// Errors raised while resolving or loading kernel assets.
#[derive(Error, Debug)]
pub enum AssetError {
    /// Effect name is not in the catalog.
    #[error("unknown particle effect \"{name}\". Available: {available}.")]
    UnknownEffect {
        /// Requested effect name.
        name: String,
        /// Comma-separated valid names.
        available: String,
    },

    /// Job key is not defined for the effect.
    #[error("unknown job \"{key}\" for effect \"{effect}\". Available: {available}.")]
    UnknownJob {
        /// Effect name.
        effect: String,
        /// Requested job key.
        key: String,
        /// Comma-separated valid keys.
        available: String,
    },

    /// The source returned markup instead of WGSL.
    #[error("expected WGSL for {source_id} but received HTML. Check the URL or server root.")]
    MalformedAsset {
        /// Resolved identifier of the offending source.
        source_id: String,
    },

    /// The fetcher answered with a non-success status.
    #[error("failed to load WGSL ({})", transport_detail(.status, .status_text))]
    Transport {
        /// Numeric response status.
        status: u16,
        /// Status text, possibly empty.
        status_text: String,
    },

    /// Local file read failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Resolved file path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A job source lacks the `process_job` entry point.
    #[error("job {label} does not define fn process_job")]
    MissingEntryPoint {
        /// Job label.
        label: String,
    },
}

fn transport_detail(status: &u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{status} {status_text}")
    }
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message() {
        let err = AssetError::Transport { status: 503, status_text: "Unavailable".into() };
        assert_eq!(err.to_string(), "failed to load WGSL (503 Unavailable)");

        let err = AssetError::Transport { status: 404, status_text: String::new() };
        assert_eq!(err.to_string(), "failed to load WGSL (404)");
    }
}
