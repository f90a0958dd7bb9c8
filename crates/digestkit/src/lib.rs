//! Uniform streaming digests and extendable-output functions in pure Rust.
//!
//! Every algorithm exposes the same incremental interface: feed bytes with
//! `update`, read the digest with `finalize`, clone at any point to checkpoint
//! the state. SHAKE128, SHAKE256, and BLAKE3 can also produce output of any
//! length through an [`Xof`] reader.
//!
//! # Quick Start
//!
//! ```
//! use digestkit::{Blake3, Digest, Sha256};
//!
//! // One-shot computation
//! let digest = Sha256::digest(b"hello world");
//!
//! // Streaming computation
//! let mut hasher = Sha256::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), digest);
//!
//! // Any split of the input gives the same BLAKE3 root
//! let mut tree = Blake3::new();
//! tree.update(b"hello world");
//! assert_eq!(tree.finalize(), Blake3::digest(b"hello world"));
//! ```
//!
//! # Extendable Output
//!
//! ```
//! use digestkit::{Shake256, XofHasher};
//!
//! let mut xof = XofHasher::<Shake256>::with_output_bits(8 * 100)?;
//! xof.update(b"seed")?;
//! let mut out = [0u8; 100];
//! xof.output(&mut out[..40])?;
//! xof.output(&mut out[40..])?;
//! assert!(xof.update(b"more").is_err());
//! # Ok::<(), digestkit::HashError>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | `std::error::Error` for [`HashError`] and the I/O adapters in [`io`] |
//! | `alloc` | Yes | Vector-returning helpers (implied by `std`) |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! digestkit = { version = "0.1", default-features = false }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// Traits and errors
// =============================================================================

pub use traits::{ConfigError, Digest, ExtendableOutput, HashError, Xof};
#[cfg(feature = "std")]
pub use traits::io;

// =============================================================================
// Engine and XOF machinery
// =============================================================================

pub use hashes::{engine, xof};
pub use hashes::xof::{XofHasher, XofReader};

// =============================================================================
// Algorithms
// =============================================================================

pub use hashes::crypto;
pub use hashes::crypto::{
  Blake2b512, Blake2s256, Blake3, Blake3Xof, Keccak256, Md5, Sha1, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Sha224,
  Sha256, Sha384, Sha512, Sha512_256, Shake128, Shake128Xof, Shake256, Shake256Xof,
};
