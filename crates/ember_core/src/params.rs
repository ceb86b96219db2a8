//! Per-frame simulation parameters and intensity mapping.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Lower bound on the per-frame simulation step, in seconds.
pub const MIN_FRAME_DELTA: f32 = 0.001;
/// Upper bound on the per-frame simulation step, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.033;

/// Clamps a raw frame delta to `[MIN_FRAME_DELTA, MAX_FRAME_DELTA]`.
///
/// A stall (tab switch, debugger) would otherwise hand the kernel one huge
/// step. Negative or NaN deltas collapse to the floor.
#[must_use]
pub fn clamp_frame_delta(raw: f32) -> f32 {
    if raw.is_nan() {
        return MIN_FRAME_DELTA;
    }
    raw.clamp(MIN_FRAME_DELTA, MAX_FRAME_DELTA)
}

/// Uniform block read by the worker kernel. 12 floats, 48 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EffectParams {
    /// Seconds since start.
    pub time: f32,
    /// Clamped frame delta.
    pub dt: f32,
    /// Scene intensity.
    pub intensity: f32,
    /// Spawn radius around `origin`.
    pub spawn_radius: f32,
    /// Lower-left simulation bound.
    pub bounds_min: [f32; 2],
    /// Upper-right simulation bound.
    pub bounds_max: [f32; 2],
    /// Emitter position.
    pub origin: [f32; 2],
    /// Constant drift velocity.
    pub drift: [f32; 2],
}

impl EffectParams {
    /// Size in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// What a scene's intensity input controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityMode {
    /// Intensity scales the number of active particles.
    #[default]
    Count,
    /// All particles stay active; intensity reaches the kernel as a size factor.
    Size,
}

impl IntensityMode {
    /// Active particle count for `intensity`.
    ///
    /// Count mode gives `max(1, floor(max_count * intensity))`, so a scene
    /// never dispatches zero jobs. Size mode always gives `max_count`.
    #[must_use]
    pub fn active_count(self, max_count: u32, intensity: f32) -> u32 {
        match self {
            IntensityMode::Count => {
                let scaled = (max_count as f32 * intensity).floor();
                // `as` saturates: negative and NaN become 0.
                (scaled as u32).clamp(1, max_count.max(1))
            }
            IntensityMode::Size => max_count,
        }
    }
}

/// Display value for an intensity input: `round(value * 100)`.
#[must_use]
pub fn intensity_percent(value: f32) -> i32 {
    (value * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_size() {
        assert_eq!(EffectParams::SIZE, 48);
        assert_eq!(EffectParams::default().as_bytes().len(), 48);
    }

    #[test]
    fn test_count_mode_scaling() {
        assert_eq!(IntensityMode::Count.active_count(900, 0.5), 450);
        assert_eq!(IntensityMode::Count.active_count(900, 1.0), 900);
        assert_eq!(IntensityMode::Count.active_count(900, 0.0), 1);
        assert_eq!(IntensityMode::Count.active_count(900, 0.0001), 1);
        assert_eq!(IntensityMode::Count.active_count(600, 0.333), 199);
    }

    #[test]
    fn test_count_mode_out_of_range() {
        assert_eq!(IntensityMode::Count.active_count(900, -2.0), 1);
        assert_eq!(IntensityMode::Count.active_count(900, 3.0), 900);
        assert_eq!(IntensityMode::Count.active_count(900, f32::NAN), 1);
    }

    #[test]
    fn test_size_mode_keeps_max_count() {
        assert_eq!(IntensityMode::Size.active_count(900, 0.0), 900);
        assert_eq!(IntensityMode::Size.active_count(900, 0.25), 900);
    }

    #[test]
    fn test_percent_readout() {
        assert_eq!(intensity_percent(0.5), 50);
        assert_eq!(intensity_percent(0.756), 76);
        assert_eq!(intensity_percent(0.0), 0);
        assert_eq!(intensity_percent(1.0), 100);
    }

    #[test]
    fn test_frame_delta_clamp() {
        assert_eq!(clamp_frame_delta(0.5), 0.033);
        assert_eq!(clamp_frame_delta(0.016), 0.016);
        assert_eq!(clamp_frame_delta(0.0), 0.001);
        assert_eq!(clamp_frame_delta(-1.0), 0.001);
        assert_eq!(clamp_frame_delta(f32::NAN), 0.001);
    }
}
