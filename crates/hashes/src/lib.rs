//! Incremental cryptographic digests over a shared block engine.
//!
//! This crate is `no_std` compatible. Its only runtime dependencies are the
//! workspace `traits` crate and `tracing` for lifecycle events; dev-only
//! dependencies are used for oracle testing and benchmarking.
//!
//! # Modules
//!
//! - [`engine`] - Block buffering, padding, and finalization shared by every
//!   fixed-output algorithm.
//! - [`xof`] - Extendable-output readers and the length-checked [`XofHasher`].
//! - [`crypto`] - Concrete algorithms, including the BLAKE3 tree hasher.
//!
//! [`XofHasher`]: xof::XofHasher
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod crypto;
pub mod engine;
pub mod xof;

mod util;

pub use traits::{ConfigError, Digest, ExtendableOutput, HashError, Xof};
