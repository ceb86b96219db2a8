//! Numeric labels rising from a text box.

use ember_core::ParticleRecord;

use super::{active, tally, visible};
use crate::canvas::{Canvas2d, Paint, Rgba};
use crate::extras::SceneExtras;
use crate::stats::DrawStats;

/// Label font.
pub const TEXT_FONT: &str = "14px 'Space Mono', monospace";

/// Horizontal offset that roughly centers a four-digit label.
const LABEL_OFFSET_X: f32 = 10.0;

/// Four-digit, zero-padded label for an `aux` value: `floor(aux) mod 10000`.
#[must_use]
pub fn label_for(aux: f32) -> String {
    let value = if aux.is_finite() { aux.floor() as i64 } else { 0 };
    format!("{:04}", value.rem_euclid(10_000))
}

/// Draws the text box outline and one label per active particle.
pub fn render_text(
    canvas: &mut dyn Canvas2d,
    particles: &[ParticleRecord],
    count: usize,
    extras: &SceneExtras,
    _time: f32,
) -> DrawStats {
    let (w, h) = (canvas.width(), canvas.height());
    let particles = visible(particles, count);
    canvas.clear();

    canvas.fill_background(Paint::Solid(Rgba::hex(0x0b_0d_12)));

    if let Some(text_box) = extras.text_box {
        let (x, y, bw, bh) = text_box.to_canvas(w, h);
        canvas.set_stroke(Rgba::new(120, 160, 220, 0.6), 2.0);
        canvas.stroke_rect(x, y, bw, bh);
    }

    canvas.set_font(TEXT_FONT);
    canvas.set_fill(Rgba::new(200, 220, 255, 0.9).into());
    for (_, p) in active(particles) {
        let (cx, cy) = p.to_canvas(w, h);
        canvas.fill_text(&label_for(p.aux), cx - LABEL_OFFSET_X, cy);
    }

    tally(particles)
}
