//! # EMBER Effects
//!
//! Effect catalog and kernel asset loading.
//!
//! ```text
//! effect name ──► EffectCatalog ──► asset paths + job labels
//!                                        │
//!                          AssetLoader<Fetcher> ──► WGSL text (HTML rejected)
//!                                        │
//!                          KernelAssembler ──► one worker module per scene
//! ```
//!
//! The asset root is passed in explicitly when the loader is built.

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assemble;
pub mod catalog;
pub mod error;
pub mod loader;

pub use assemble::{ConcatAssembler, KernelAssembler, KernelParts, ENQUEUE_ENTRY, WORKER_ENTRY};
pub use catalog::{EffectCatalog, EffectSpec, JobEntry, JobSpec};
pub use error::{AssetError, AssetResult};
pub use loader::{
    ensure_not_html, AssetLoader, EffectBundle, FetchResponse, Fetcher, FileFetcher, LoadedJob,
};
