//! CPU side of a scene: intensity, active count and per-tick parameter blocks.
//!
//! Everything here is plain data so it can be tested without a device.

use ember_core::{
    intensity_percent, Effect, EffectParams, IntensityMode, ParticleRecord, QueueParams,
    WORKGROUP_SIZE,
};
use ember_rendering::SceneExtras;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GpuError, GpuResult};

/// Exclusive upper bound of particle seeds.
const SEED_RANGE: f32 = 1.0e6;
/// Exclusive upper bound of initial `aux` values.
const AUX_RANGE: f32 = 10_000.0;

/// Everything needed to build one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    /// Effect to simulate and draw.
    pub effect: Effect,
    /// Job key within the effect.
    pub job: String,
    /// Particle count and job count.
    pub max_count: u32,
    /// Spawn radius around `origin`.
    pub spawn_radius: f32,
    /// Emitter position in unit space.
    pub origin: [f32; 2],
    /// Constant drift velocity.
    pub drift: [f32; 2],
    /// Initial intensity; `None` means full intensity and no external input.
    pub intensity: Option<f32>,
    /// What intensity controls.
    pub intensity_mode: IntensityMode,
    /// Decoder decoration.
    pub extras: SceneExtras,
    /// Seed for initial particle seeds and labels.
    pub rng_seed: u64,
}

impl SceneSpec {
    /// Scene with zero drift, full intensity and count scaling.
    #[must_use]
    pub fn new(effect: Effect, job: impl Into<String>, max_count: u32) -> Self {
        Self {
            effect,
            job: job.into(),
            max_count,
            spawn_radius: 0.0,
            origin: [0.5, 0.5],
            drift: [0.0, 0.0],
            intensity: None,
            intensity_mode: IntensityMode::Count,
            extras: SceneExtras::default(),
            rng_seed: 0,
        }
    }

    /// Rejects specs that cannot be dispatched.
    ///
    /// # Errors
    ///
    /// [`GpuError::InvalidScene`] for a zero particle count.
    pub fn validate(&self) -> GpuResult<()> {
        if self.max_count == 0 {
            return Err(GpuError::InvalidScene(format!(
                "{}.{}: max_count must be at least 1",
                self.effect, self.job
            )));
        }
        Ok(())
    }
}

/// Mutable per-scene state between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    max_count: u32,
    mode: IntensityMode,
    intensity: f32,
    active_count: u32,
    spawn_radius: f32,
    origin: [f32; 2],
    drift: [f32; 2],
    bounds_min: [f32; 2],
    bounds_max: [f32; 2],
}

impl SceneState {
    /// Initial state for `spec`.
    #[must_use]
    pub fn new(spec: &SceneSpec) -> Self {
        let intensity = spec.intensity.unwrap_or(1.0);
        Self {
            max_count: spec.max_count,
            mode: spec.intensity_mode,
            intensity,
            active_count: spec.intensity_mode.active_count(spec.max_count, intensity),
            spawn_radius: spec.spawn_radius,
            origin: spec.origin,
            drift: spec.drift,
            bounds_min: [0.0, 0.0],
            bounds_max: [1.0, 1.0],
        }
    }

    /// Current intensity.
    #[must_use]
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Records the kernel processes this tick.
    #[must_use]
    pub const fn active_count(&self) -> u32 {
        self.active_count
    }

    /// Particle buffer size in records.
    #[must_use]
    pub const fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Intensity mode.
    #[must_use]
    pub const fn mode(&self) -> IntensityMode {
        self.mode
    }

    /// Applies a new intensity and returns its percent readout.
    ///
    /// The value is taken as-is; callers own the range.
    pub fn set_intensity(&mut self, value: f32) -> i32 {
        self.intensity = value;
        self.active_count = self.mode.active_count(self.max_count, value);
        let percent = intensity_percent(value);
        tracing::debug!(intensity = value, active = self.active_count, percent, "intensity changed");
        percent
    }

    /// True when a tick has nothing to dispatch. Unreachable for a validated
    /// spec: count mode floors at 1 and size mode keeps `max_count`.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active_count == 0
    }

    /// Workgroups per pass: `ceil(active / 64)`, at least 1.
    #[must_use]
    pub const fn workgroups(&self) -> u32 {
        let groups = self.active_count.div_ceil(WORKGROUP_SIZE);
        if groups == 0 {
            1
        } else {
            groups
        }
    }

    /// Uniform block for this tick.
    #[must_use]
    pub fn effect_params(&self, time: f32, dt: f32) -> EffectParams {
        EffectParams {
            time,
            dt,
            intensity: self.intensity,
            spawn_radius: self.spawn_radius,
            bounds_min: self.bounds_min,
            bounds_max: self.bounds_max,
            origin: self.origin,
            drift: self.drift,
        }
    }

    /// Queue control params for this tick.
    #[must_use]
    pub const fn queue_params(&self) -> QueueParams {
        QueueParams::dispatch(self.active_count)
    }

    /// Initial particle records: all parked at the origin with a random seed
    /// and an integer `aux` label.
    #[must_use]
    pub fn initial_particles(&self, rng_seed: u64) -> Vec<ParticleRecord> {
        let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
        (0..self.max_count)
            .map(|_| {
                let seed = rng.gen::<f32>() * SEED_RANGE;
                let aux = (rng.gen::<f32>() * AUX_RANGE).floor();
                ParticleRecord::parked(self.origin, seed, aux)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(mode: IntensityMode, intensity: Option<f32>) -> SceneSpec {
        SceneSpec { intensity, intensity_mode: mode, ..SceneSpec::new(Effect::Rain, "update", 900) }
    }

    #[test]
    fn test_count_mode_scales_active_count() {
        let mut state = SceneState::new(&spec(IntensityMode::Count, Some(0.5)));
        assert_eq!(state.active_count(), 450);

        assert_eq!(state.set_intensity(0.0), 0);
        assert_eq!(state.active_count(), 1);

        assert_eq!(state.set_intensity(1.0), 100);
        assert_eq!(state.active_count(), 900);
    }

    #[test]
    fn test_size_mode_keeps_every_particle() {
        let mut state = SceneState::new(&spec(IntensityMode::Size, Some(0.2)));
        assert_eq!(state.active_count(), 900);
        assert_eq!(state.set_intensity(0.35), 35);
        assert_eq!(state.active_count(), 900);
        assert!((state.effect_params(0.0, 0.016).intensity - 0.35).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_input_means_full_intensity() {
        let state = SceneState::new(&spec(IntensityMode::Count, None));
        assert!((state.intensity() - 1.0).abs() < f32::EPSILON);
        assert_eq!(state.active_count(), 900);
    }

    #[test]
    fn test_validated_scene_is_never_idle() {
        let mut state = SceneState::new(&spec(IntensityMode::Count, Some(0.0)));
        assert!(!state.is_idle());
        state.set_intensity(-3.0);
        assert!(!state.is_idle());

        let mut state = SceneState::new(&spec(IntensityMode::Size, Some(0.0)));
        state.set_intensity(0.0);
        assert!(!state.is_idle());

        let smallest = SceneSpec::new(Effect::Snow, "update", 1);
        smallest.validate().unwrap();
        assert!(!SceneState::new(&smallest).is_idle());
    }

    #[test]
    fn test_workgroups() {
        let state = SceneState::new(&SceneSpec::new(Effect::Fire, "physics", 700));
        assert_eq!(state.workgroups(), 11);

        let mut state = SceneState::new(&SceneSpec::new(Effect::Rain, "update", 128));
        assert_eq!(state.workgroups(), 2);
        state.set_intensity(0.5);
        assert_eq!(state.active_count(), 64);
        assert_eq!(state.workgroups(), 1);
        state.set_intensity(0.0);
        assert_eq!(state.active_count(), 1);
        assert_eq!(state.workgroups(), 1);
    }

    #[test]
    fn test_param_blocks() {
        let mut base = SceneSpec::new(Effect::Sparks, "update", 450);
        base.spawn_radius = 0.01;
        base.origin = [0.5, 0.4];
        base.drift = [0.0, -0.2];
        let state = SceneState::new(&base);

        let params = state.effect_params(2.0, 0.016);
        let floats: &[f32] = bytemuck::cast_slice(params.as_bytes());
        assert_eq!(floats, &[2.0, 0.016, 1.0, 0.01, 0.0, 0.0, 1.0, 1.0, 0.5, 0.4, 0.0, -0.2]);

        let queue = state.queue_params();
        assert_eq!(queue.job_count, 450);
        assert_eq!(queue.mode, 1);
    }

    #[test]
    fn test_initial_particles() {
        let mut base = SceneSpec::new(Effect::Text, "layout", 220);
        base.origin = [0.5, 0.55];
        let state = SceneState::new(&base);

        let records = state.initial_particles(7);
        assert_eq!(records.len(), 220);
        for p in &records {
            assert!(!p.is_active());
            assert!((p.x - 0.5).abs() < f32::EPSILON && (p.y - 0.55).abs() < f32::EPSILON);
            assert!((0.0..SEED_RANGE).contains(&p.seed));
            assert!((0.0..AUX_RANGE).contains(&p.aux));
            assert!((p.aux - p.aux.floor()).abs() < f32::EPSILON);
            assert!(p.vx == 0.0 && p.vy == 0.0 && p.kind == 0.0);
        }
        assert_eq!(records, state.initial_particles(7));
    }

    #[test]
    fn test_zero_count_rejected() {
        let spec = SceneSpec::new(Effect::Snow, "update", 0);
        assert!(matches!(spec.validate(), Err(GpuError::InvalidScene(_))));
    }
}
