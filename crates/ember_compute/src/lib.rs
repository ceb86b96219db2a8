//! # EMBER Compute
//!
//! Drives the GPU job queue that simulates particles, and hands the readback
//! to the render decoders.
//!
//! ```text
//! GpuContext (shared device, queue, layouts)
//!     │
//!     ├── Scene ── QueueBuffers (8 bindings) + ParticleBuffers ── canvas
//!     ├── Scene ── ...
//!     │
//! FrameDriver ── clamps dt, steps scenes in order, stops on first error
//! ```

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod buffers;
pub mod context;
pub mod error;
pub mod frame;
pub mod layout;
pub mod scene;
pub mod state;

pub use buffers::{ParticleBuffers, QueueBuffers};
pub use context::GpuContext;
pub use error::{GpuError, GpuResult};
pub use frame::{FrameClock, FrameDriver, FrameReport, FrameTarget};
pub use layout::{
    create_effect_layout, create_queue_layout, effect_binding_type, effect_layout_entries,
    queue_binding_type, queue_layout_entries,
};
pub use scene::{KernelSources, Scene, PAYLOAD_WORDS};
pub use state::{SceneSpec, SceneState};
