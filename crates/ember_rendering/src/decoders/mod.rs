//! Render decoders.
//!
//! Every effect reads the same 8-float record but gives the fields its own
//! meaning. A decoder:
//!
//! 1. clears the surface and paints its background,
//! 2. skips records with `life <= 0`,
//! 3. maps `(x, y)` to `(x * w, (1 - y) * h)`,
//! 4. draws by sub-kind, normal-blend passes before additive ones,
//! 5. leaves the surface in [`BlendMode::Normal`].

mod fire;
mod firework;
mod snow;
mod text;
mod trails;

use ember_core::{Effect, ParticleRecord};

use crate::blend::BlendMode;
use crate::canvas::{unit, Canvas2d};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

pub use fire::render_fire;
pub use firework::{render_firework, FIREWORK_PALETTE};
pub use snow::render_snow;
pub use text::{label_for, render_text, TEXT_FONT};
pub use trails::{rain_length, render_rain, render_sparks};

/// Signature shared by all decoders: `(surface, records, count, extras, time)`.
pub type DecodeFn = fn(&mut dyn Canvas2d, &[ParticleRecord], usize, &SceneExtras, f32) -> DrawStats;

/// The decoder that draws `effect`.
#[must_use]
pub fn decoder_for(effect: Effect) -> DecodeFn {
    match effect {
        Effect::Fire => render_fire,
        Effect::Sparks => render_sparks,
        Effect::Text => render_text,
        Effect::Rain => render_rain,
        Effect::Snow => render_snow,
        Effect::Firework => render_firework,
    }
}

/// Decodes `count` records of `effect` onto `canvas`.
pub fn render_effect(
    effect: Effect,
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    extras: &SceneExtras,
    time: f32,
) -> DrawStats {
    let stats = decoder_for(effect)(canvas, particles, count, extras, time);
    debug_assert_eq!(canvas.blend_mode(), BlendMode::Normal);
    tracing::trace!(effect = effect.name(), drawn = stats.drawn, skipped = stats.skipped, "decoded frame");
    stats
}

/// The records a decoder may look at: the first `count`, bounded by the slice.
#[inline]
fn visible(particles: &[ParticleRecord], count: usize) -> &[ParticleRecord] {
    &particles[..count.min(particles.len())]
}

/// Active records with their index.
fn active(particles: &[ParticleRecord]) -> impl Iterator<Item = (usize, &ParticleRecord)> {
    particles.iter().enumerate().filter(|(_, p)| p.is_active())
}

/// Counts active and inactive records.
fn tally(particles: &[ParticleRecord]) -> DrawStats {
    let drawn = particles.iter().filter(|p| p.is_active()).count() as u32;
    DrawStats { drawn, skipped: particles.len() as u32 - drawn }
}

/// `clamp(life / full, 0, 1)`.
#[inline]
fn fade(life: f32, full: f32) -> f32 {
    unit(life / full)
}

/// Channel value from a float, truncated toward zero and saturated.
#[inline]
fn channel(value: f32) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}
