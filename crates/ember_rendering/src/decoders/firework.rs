//! Firework bursts: tinted smoke, ash, then additive sparks.

use ember_core::{FireworkKind, ParticleRecord};

use super::{active, channel, fade, visible};
use crate::blend::BlendMode;
use crate::canvas::{Canvas2d, Paint, Rgba};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

/// Burst colors, indexed by `floor(aux) mod 4`.
pub const FIREWORK_PALETTE: [[u8; 3]; 4] = [
    [255, 196, 120],
    [120, 220, 255],
    [255, 120, 210],
    [255, 240, 150],
];

/// Share of the palette tint mixed into smoke.
const SMOKE_TINT: f32 = 0.15;
const SMOKE_BASE: [f32; 3] = [120.0, 120.0, 140.0];

#[inline]
fn tint_of(p: &ParticleRecord) -> [u8; 3] {
    let index = if p.aux.is_finite() { p.aux.floor() as i64 } else { 0 };
    FIREWORK_PALETTE[index.rem_euclid(FIREWORK_PALETTE.len() as i64) as usize]
}

fn layer<'a>(
    particles: &'a [ParticleRecord],
    kind: FireworkKind,
) -> impl Iterator<Item = &'a ParticleRecord> {
    active(particles)
        .map(|(_, p)| p)
        .filter(move |p| FireworkKind::classify(p.kind) == Some(kind))
}

/// Draws the firework effect in three layers: smoke and ash with normal
/// blending, sparks additively on top.
pub fn render_firework(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    _extras: &SceneExtras,
    _time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();
    let mut stats = DrawStats::default();

    canvas.set_blend_mode(BlendMode::Normal);
    canvas.fill_background(Paint::Solid(Rgba::hex(0x05_06_0b)));

    for p in layer(particles, FireworkKind::Smoke) {
        let (cx, cy) = p.to_canvas(w, h);
        let tint = tint_of(p);
        let mix = |i: usize| channel(SMOKE_BASE[i] * (1.0 - SMOKE_TINT) + f32::from(tint[i]) * SMOKE_TINT);
        let alpha = fade(p.life, 3.2) * 0.25;
        canvas.set_fill(Rgba::new(mix(0), mix(1), mix(2), alpha).into());
        canvas.fill_circle(cx, cy, 12.0);
        stats.drawn += 1;
    }

    for p in layer(particles, FireworkKind::Ash) {
        let (cx, cy) = p.to_canvas(w, h);
        let [r, g, b] = tint_of(p).map(f32::from);
        let alpha = fade(p.life, 2.2) * 0.55;
        canvas.set_fill(Rgba::new(channel(r * 0.5), channel(g * 0.45), channel(b * 0.4), alpha).into());
        canvas.fill_circle(cx, cy, 3.0);
        stats.drawn += 1;
    }

    canvas.set_blend_mode(BlendMode::Additive);
    for p in layer(particles, FireworkKind::Spark) {
        let (cx, cy) = p.to_canvas(w, h);
        let [r, g, b] = tint_of(p);
        let alpha = fade(p.life, 1.4) * 0.9 + 0.1;
        canvas.set_fill(Rgba::new(r, g, b, alpha).into());
        canvas.fill_circle(cx, cy, 2.0);
        stats.drawn += 1;
    }
    canvas.set_blend_mode(BlendMode::Normal);

    stats.skipped = particles.iter().filter(|p| !p.is_active()).count() as u32;
    stats
}
