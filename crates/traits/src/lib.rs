//! Core hashing traits for digestkit.
//!
//! This crate defines the uniform streaming interface every algorithm in the
//! workspace conforms to. It is `no_std` compatible and carries no algorithm
//! code.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Fixed-size cryptographic digests | SHA-256, BLAKE2b, BLAKE3 |
//! | [`ExtendableOutput`] | Digests that can also emit arbitrary-length output | SHAKE128, BLAKE3 |
//! | [`Xof`] | Reader over an extendable output stream | `Blake3Xof`, `Shake256Xof` |
//!
//! # Error Types
//!
//! - [`HashError`] - configuration, output-length, and lifecycle violations
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
#[cfg(feature = "std")]
pub mod io;
mod xof;

pub use digest::Digest;
pub use error::{ConfigError, HashError};
pub use xof::{ExtendableOutput, Xof};
