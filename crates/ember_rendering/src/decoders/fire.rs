//! Torch fire: gray smoke under additive flames.

use ember_core::{FireKind, ParticleRecord};

use super::{active, channel, fade, tally, visible};
use crate::blend::BlendMode;
use crate::canvas::{Canvas2d, Paint, Rgba};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

const SKY_TOP: Rgba = Rgba::hex(0x1a_0c_08);
const SKY_BOTTOM: Rgba = Rgba::hex(0x05_06_0b);
const TORCH_POST: Rgba = Rgba::hex(0x5c_3b_1e);
const TORCH_BAND: Rgba = Rgba::hex(0x3a_25_12);

/// `aux` is the particle size; zero or NaN means 1.
#[inline]
fn size_of(p: &ParticleRecord) -> f32 {
    if p.aux == 0.0 || p.aux.is_nan() {
        1.0
    } else {
        p.aux
    }
}

/// Draws the fire effect.
///
/// `kind < 0.5` is flame, everything else smoke; a record is drawn by exactly
/// one of the two passes.
pub fn render_fire(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    extras: &SceneExtras,
    time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();

    canvas.set_blend_mode(BlendMode::Normal);
    canvas.fill_background(Paint::VerticalGradient { top: SKY_TOP, bottom: SKY_BOTTOM });

    if let Some([tx, ty]) = extras.torch {
        let (torch_x, torch_y) = (w * tx, h * (1.0 - ty));
        canvas.set_fill(TORCH_POST.into());
        canvas.fill_rect(torch_x - 6.0, torch_y, 12.0, (h - torch_y - 8.0).max(0.0));
        canvas.set_fill(TORCH_BAND.into());
        canvas.fill_rect(torch_x - 10.0, torch_y + 12.0, 20.0, 8.0);
    }

    // Smoke
    for (_, p) in active(particles).filter(|(_, p)| FireKind::classify(p.kind) == FireKind::Smoke) {
        let (cx, cy) = p.to_canvas(w, h);
        let alpha = fade(p.life, 2.5) * 0.45;
        canvas.set_fill(Rgba::new(120, 120, 120, alpha).into());
        canvas.fill_circle(cx, cy, 6.0 + size_of(p) * 4.0);
    }

    // Flames
    canvas.set_blend_mode(BlendMode::Additive);
    for (i, p) in active(particles).filter(|(_, p)| FireKind::classify(p.kind) == FireKind::Flame) {
        let (cx, cy) = p.to_canvas(w, h);
        let alpha = fade(p.life, 1.1);
        let flicker = 0.5 + 0.5 * (time * 3.0 + i as f32).sin().abs();
        let heat = channel(120.0 + 100.0 * flicker);
        canvas.set_fill(Rgba::new(255, heat, 60, alpha).into());
        canvas.fill_circle(cx, cy, 4.0 + size_of(p) * 1.5 + flicker);
    }
    canvas.set_blend_mode(BlendMode::Normal);

    tally(particles)
}
