//! Snowfall.

use ember_core::ParticleRecord;

use super::{active, tally, visible};
use crate::canvas::{Canvas2d, Paint, Rgba};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

const FLAKE_RADIUS: f32 = 2.0;

/// Draws each active particle as a small pale disc.
pub fn render_snow(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    _extras: &SceneExtras,
    _time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();

    canvas.fill_background(Paint::Solid(Rgba::hex(0x07_11_1a)));
    canvas.set_fill(Rgba::new(230, 240, 255, 0.8).into());
    for (_, p) in active(particles) {
        let (cx, cy) = p.to_canvas(w, h);
        canvas.fill_circle(cx, cy, FLAKE_RADIUS);
    }

    tally(particles)
}
