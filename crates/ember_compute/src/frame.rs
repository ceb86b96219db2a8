//! Frame driver.
//!
//! One callback per animation frame steps every scene in order, awaiting
//! each before starting the next. At most one readback is in flight, and
//! frame time is the sum of the per-scene round trips. The first error ends
//! the frame and is returned; scenes after it are not stepped.

use std::future::Future;
use std::time::Instant;

use ember_core::clamp_frame_delta;
use ember_rendering::DrawStats;

use crate::error::GpuResult;
use crate::scene::Scene;

/// Something the driver steps once per frame.
pub trait FrameTarget {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Runs one tick. `Ok(None)` means the target had nothing to do.
    fn step(&mut self, time: f32, dt: f32) -> impl Future<Output = GpuResult<Option<DrawStats>>>;
}

impl FrameTarget for Scene {
    fn name(&self) -> &str {
        self.label()
    }

    fn step(&mut self, time: f32, dt: f32) -> impl Future<Output = GpuResult<Option<DrawStats>>> {
        Scene::step(self, time, dt)
    }
}

/// Wall clock to `(time, dt)` with `dt` clamped.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    /// Clock whose time and first delta are measured from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: start }
    }

    /// Advances to `now`: seconds since start and the clamped delta.
    pub fn tick(&mut self, now: Instant) -> (f32, f32) {
        let raw = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        let time = now.saturating_duration_since(self.start).as_secs_f32();
        (time, clamp_frame_delta(raw))
    }
}

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, from 0.
    pub frame: u64,
    /// Seconds since the driver started.
    pub time: f32,
    /// Clamped delta handed to every target.
    pub dt: f32,
    /// Per-target results, in target order.
    pub stats: Vec<Option<DrawStats>>,
}

/// Steps a fixed set of targets sequentially.
#[derive(Debug)]
pub struct FrameDriver<T> {
    targets: Vec<T>,
    clock: FrameClock,
    frames: u64,
}

impl<T: FrameTarget> FrameDriver<T> {
    /// Driver over `targets`, with the clock starting at `start`.
    #[must_use]
    pub fn new(targets: Vec<T>, start: Instant) -> Self {
        Self { targets, clock: FrameClock::starting_at(start), frames: 0 }
    }

    /// The targets, in stepping order.
    #[must_use]
    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    /// Mutable access to the targets, e.g. for intensity changes.
    pub fn targets_mut(&mut self) -> &mut [T] {
        &mut self.targets
    }

    /// Frames completed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame at wall time `now`.
    ///
    /// # Errors
    ///
    /// The first target error. Remaining targets are skipped and the frame
    /// does not count as completed.
    pub async fn frame(&mut self, now: Instant) -> GpuResult<FrameReport> {
        let (time, dt) = self.clock.tick(now);
        let mut stats = Vec::with_capacity(self.targets.len());
        for target in &mut self.targets {
            match target.step(time, dt).await {
                Ok(result) => stats.push(result),
                Err(err) => {
                    tracing::error!(
                        scene = target.name(),
                        frame = self.frames,
                        error = %err,
                        "scene tick failed, stopping frame loop"
                    );
                    return Err(err);
                }
            }
        }
        let report = FrameReport { frame: self.frames, time, dt, stats };
        self.frames += 1;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_clamps_large_gap() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let (time, dt) = clock.tick(start + Duration::from_millis(500));
        assert!((dt - 0.033).abs() < 1e-6);
        assert!((time - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_clock_floors_tiny_gap() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick(start + Duration::from_millis(16));
        let (_, dt) = clock.tick(start + Duration::from_millis(16) + Duration::from_micros(100));
        assert!((dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_clock_passes_normal_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let (_, dt) = clock.tick(start + Duration::from_millis(20));
        assert!((dt - 0.020).abs() < 1e-5);
    }
}
