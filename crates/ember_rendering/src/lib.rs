//! # EMBER Rendering
//!
//! Turns particle readback into 2D draws.
//!
//! ```text
//! Vec<ParticleRecord> ──► decoder_for(effect) ──► Canvas2d
//!                           │
//!                           ├─ background
//!                           ├─ normal-blend passes (smoke, ash)
//!                           └─ additive passes (flame, sparks) ──► back to normal
//! ```
//!
//! The surface is a trait so the same decoders drive a real canvas or the
//! [`DrawRecorder`] the tests assert against.

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod blend;
pub mod canvas;
pub mod decoders;
pub mod extras;
pub mod recorder;
pub mod stats;

pub use blend::{BlendFactor, BlendMode, BlendStateConfig};
pub use canvas::{Canvas2d, Paint, Rgba};
pub use decoders::{
    decoder_for, label_for, rain_length, render_effect, render_fire, render_firework,
    render_rain, render_snow, render_sparks, render_text, DecodeFn, FIREWORK_PALETTE, TEXT_FONT,
};
pub use extras::{SceneExtras, TextBox};
pub use recorder::{DrawCommand, DrawOp, DrawRecorder};
pub use stats::DrawStats;
