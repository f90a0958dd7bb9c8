//! Cryptographic hash functions.
//!
//! Every fixed-output algorithm is a zero-sized [`Compressor`] descriptor
//! driven by [`BufferedEngine`]; BLAKE3 has its own tree-hashing state.
//!
//! | Algorithm | Type | Block | Output | XOF |
//! |-----------|------|-------|--------|-----|
//! | MD5 | [`Md5`] | 64 | 16 | |
//! | SHA-1 | [`Sha1`] | 64 | 20 | |
//! | SHA-224 / SHA-256 | [`Sha224`], [`Sha256`] | 64 | 28 / 32 | |
//! | SHA-384 / SHA-512 / SHA-512/256 | [`Sha384`], [`Sha512`], [`Sha512_256`] | 128 | 48 / 64 / 32 | |
//! | SHA3-224 .. SHA3-512 | [`Sha3_224`] .. [`Sha3_512`] | 144 .. 72 | 28 .. 64 | |
//! | Keccak-256 | [`Keccak256`] | 136 | 32 | |
//! | SHAKE128 / SHAKE256 | [`Shake128`], [`Shake256`] | 168 / 136 | 32 / 64 | yes |
//! | BLAKE2b-512 / BLAKE2s-256 | [`Blake2b512`], [`Blake2s256`] | 128 / 64 | 64 / 32 | |
//! | BLAKE3 | [`Blake3`] | 64 (1024-byte chunks) | 32 | yes |
//!
//! [`Compressor`]: crate::engine::Compressor
//! [`BufferedEngine`]: crate::engine::BufferedEngine

pub mod blake2b;
pub mod blake2s;
pub mod blake3;
pub mod keccak;
pub mod md5;
pub mod sha1;
pub mod sha256;
pub mod sha3;
pub mod sha512;

pub use blake2b::Blake2b512;
pub use blake2s::Blake2s256;
pub use blake3::{Blake3, Blake3Xof};
pub use md5::Md5;
pub use sha1::Sha1;
pub use sha3::{Keccak256, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Shake128, Shake128Xof, Shake256, Shake256Xof};
pub use sha256::{Sha224, Sha256};
pub use sha512::{Sha384, Sha512, Sha512_256};
