//! # EMBER Core
//!
//! The byte-level contract shared by the CPU and the particle compute kernels.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PER-SCENE BUFFERS                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Static work list   → input jobs + input payload (once)      │
//! │  Dynamic control    → header + slots + status (every tick)   │
//! │  Effect params      → 48-byte uniform block (every tick)     │
//! │       ↓                                                      │
//! │  Particle records   → [x, y, life, seed, vx, vy, kind, aux]  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate touches a GPU. The compute crate turns these
//! layouts into buffers; the rendering crate decodes the particle records.

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effect;
pub mod error;
pub mod params;
pub mod particle;
pub mod queue;

pub use effect::{Effect, DEFAULT_EFFECT};
pub use error::{CoreError, CoreResult};
pub use params::{
    clamp_frame_delta, intensity_percent, EffectParams, IntensityMode, MAX_FRAME_DELTA,
    MIN_FRAME_DELTA,
};
pub use particle::{
    decode_particles, FireKind, FireworkKind, ParticleRecord, PARTICLE_STRIDE_BYTES,
    PARTICLE_STRIDE_FLOATS,
};
pub use queue::{
    next_power_of_two, EffectBinding, JobDescriptor, QueueBinding, QueueControl, QueueHeader,
    QueueLayout, QueueParams, SlotRecord, WorkList, DISPATCH_MODE, WORKGROUP_SIZE,
};
