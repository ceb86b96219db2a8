//! Line-based effects: spark streaks and rain drops.

use ember_core::ParticleRecord;

use super::{active, tally, visible};
use crate::canvas::{Canvas2d, Paint, Rgba};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

/// Streak length per unit of velocity, in pixels.
const STREAK_SCALE: f32 = 18.0;

/// Draws spark streaks from each particle back along its velocity.
pub fn render_sparks(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    _extras: &SceneExtras,
    _time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();

    canvas.fill_background(Paint::Solid(Rgba::hex(0x0a_0d_17)));
    canvas.set_stroke(Rgba::new(255, 200, 140, 0.8), 1.5);
    for (_, p) in active(particles) {
        let (cx, cy) = p.to_canvas(w, h);
        // Canvas y grows downward, so the vertical term flips sign.
        canvas.stroke_line(cx, cy, cx - p.vx * STREAK_SCALE, cy + p.vy * STREAK_SCALE);
    }

    tally(particles)
}

/// Rain drop length in pixels for vertical velocity `vy`, within [8, 24].
#[must_use]
pub fn rain_length(vy: f32) -> f32 {
    let length = vy.abs() * STREAK_SCALE;
    if length.is_nan() {
        8.0
    } else {
        length.clamp(8.0, 24.0)
    }
}

/// Draws rain as short vertical strokes hanging below each particle.
pub fn render_rain(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    _extras: &SceneExtras,
    _time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();

    canvas.fill_background(Paint::Solid(Rgba::hex(0x0b_11_1c)));
    canvas.set_stroke(Rgba::new(120, 170, 255, 0.65), 1.0);
    for (_, p) in active(particles) {
        let (cx, cy) = p.to_canvas(w, h);
        canvas.stroke_line(cx, cy, cx, cy + rain_length(p.vy));
    }

    tally(particles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_length_bounds() {
        assert!((rain_length(0.0) - 8.0).abs() < f32::EPSILON);
        assert!((rain_length(-1.0) - 18.0).abs() < 1e-5);
        assert!((rain_length(-10.0) - 24.0).abs() < f32::EPSILON);
        assert!((rain_length(f32::NAN) - 8.0).abs() < f32::EPSILON);
    }
}
