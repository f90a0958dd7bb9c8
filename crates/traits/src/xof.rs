//! Extendable-output function (XOF) traits.
//!
//! A hasher that implements [`ExtendableOutput`] can be finalized into an
//! [`Xof`] reader, which produces a deterministic byte stream of
//! caller-chosen length.

use crate::{Digest, HashError};

/// Reader over an XOF output stream.
///
/// This trait intentionally has no `std::io::Read` dependency; it is usable in
/// `no_std` environments.
pub trait Xof: Clone {
  /// Squeeze the next `out.len()` bytes of the stream into `out`.
  ///
  /// Splitting a read across several calls yields the same bytes as one call
  /// of the combined length.
  ///
  /// # Errors
  ///
  /// Returns [`HashError::OutputLengthExceeded`] if the read would pass the
  /// reader's declared length. Nothing is written in that case.
  fn squeeze(&mut self, out: &mut [u8]) -> Result<(), HashError>;

  /// Bytes emitted so far.
  #[must_use]
  fn position(&self) -> u64;

  /// Bytes that may still be read.
  #[must_use]
  fn remaining(&self) -> u64;
}

/// A digest that can also produce extendable output.
pub trait ExtendableOutput: Digest {
  /// Reader returned by [`finalize_xof`](Self::finalize_xof).
  type Reader: Xof;

  /// Largest declarable output length, in bits.
  const MAX_OUTPUT_BITS: u64;

  /// Derive the root value and return a reader positioned at byte zero.
  ///
  /// Like [`Digest::finalize`], this does not modify the hasher.
  #[must_use]
  fn finalize_xof(&self) -> Self::Reader;
}
