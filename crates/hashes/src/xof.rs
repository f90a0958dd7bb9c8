//! Extendable-output readers.
//!
//! An [`XofReader`] turns a finalized root value into a byte stream of
//! caller-chosen length. The stream is the concatenation of fixed-size
//! sub-blocks produced by an [`XofSource`]; bytes are generated lazily and a
//! read may be split across any number of calls without changing the result.
//!
//! [`XofHasher`] pairs an [`ExtendableOutput`] hasher with a declared output
//! length and write-once finalization, for callers that want the length and
//! lifecycle checks enforced at runtime.

#![allow(clippy::indexing_slicing)] // Buffer offsets are bounded by `N`

use traits::{ConfigError, Digest, ExtendableOutput, HashError, Xof};

/// Output ceiling for XOFs without an algorithm-defined limit: the largest
/// byte-aligned bit count representable in a `u64`.
pub const UNBOUNDED_OUTPUT_BITS: u64 = u64::MAX & !7;

/// Produces the sub-blocks of an output stream.
///
/// Blocks are requested strictly in order, starting at index zero, so sponge
/// constructions may permute lazily instead of seeking.
pub trait XofSource<const N: usize>: Clone {
  /// Write sub-block `index` of the stream into `out`.
  fn fill_block(&mut self, index: u64, out: &mut [u8; N]);
}

/// Reader over the output stream of an [`XofSource`] with `N`-byte sub-blocks.
#[derive(Clone)]
pub struct XofReader<S, const N: usize> {
  source: S,
  buf: [u8; N],
  /// Read offset into `buf`; `N` means the buffer is drained.
  buf_pos: usize,
  next_block: u64,
  position: u64,
  limit: u64,
}

impl<S, const N: usize> core::fmt::Debug for XofReader<S, N> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("XofReader")
      .field("position", &self.position)
      .field("limit", &self.limit)
      .finish_non_exhaustive()
  }
}

impl<S: XofSource<N>, const N: usize> XofReader<S, N> {
  /// Reader positioned at byte zero, bounded only by the `u64` position.
  #[inline]
  #[must_use]
  pub fn new(source: S) -> Self {
    Self::with_limit(source, u64::MAX)
  }

  /// Reader that refuses to emit more than `limit` bytes in total.
  #[inline]
  #[must_use]
  pub fn with_limit(source: S, limit: u64) -> Self {
    Self {
      source,
      buf: [0u8; N],
      buf_pos: N,
      next_block: 0,
      position: 0,
      limit,
    }
  }

  /// Declared total length in bytes.
  #[inline]
  #[must_use]
  pub fn limit(&self) -> u64 {
    self.limit
  }

  fn squeeze_unchecked(&mut self, mut out: &mut [u8]) {
    if self.buf_pos < N {
      let take = core::cmp::min(N - self.buf_pos, out.len());
      out[..take].copy_from_slice(&self.buf[self.buf_pos..self.buf_pos + take]);
      self.buf_pos += take;
      out = &mut out[take..];
    }

    let (blocks, tail) = out.as_chunks_mut::<N>();
    for block in blocks {
      self.source.fill_block(self.next_block, block);
      self.next_block = self.next_block.wrapping_add(1);
    }

    if !tail.is_empty() {
      self.source.fill_block(self.next_block, &mut self.buf);
      self.next_block = self.next_block.wrapping_add(1);
      tail.copy_from_slice(&self.buf[..tail.len()]);
      self.buf_pos = tail.len();
    }
  }
}

impl<S: XofSource<N>, const N: usize> Xof for XofReader<S, N> {
  fn squeeze(&mut self, out: &mut [u8]) -> Result<(), HashError> {
    let requested = out.len() as u64;
    match self.position.checked_add(requested) {
      Some(end) if end <= self.limit => {}
      _ => {
        tracing::debug!(
          target: "hashes::xof",
          position = self.position,
          requested,
          limit = self.limit,
          "output request exceeds declared length"
        );
        return Err(HashError::OutputLengthExceeded {
          position: self.position,
          requested,
          limit: self.limit,
        });
      }
    }

    self.squeeze_unchecked(out);
    self.position += requested;
    Ok(())
  }

  #[inline]
  fn position(&self) -> u64 {
    self.position
  }

  #[inline]
  fn remaining(&self) -> u64 {
    self.limit - self.position
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// XofHasher
// ─────────────────────────────────────────────────────────────────────────────

/// An XOF-capable hasher with a declared output length.
///
/// The first [`output`](Self::output) call derives the root and finalizes the
/// instance; from then on [`update`](Self::update) fails with
/// [`HashError::WriteAfterFinalize`] until [`reset`](Self::reset).
///
/// # Example
///
/// ```rust
/// use hashes::{crypto::Shake128, xof::XofHasher};
///
/// let mut h = XofHasher::<Shake128>::with_output_bits(256)?;
/// h.update(b"abc")?;
/// let mut out = [0u8; 32];
/// h.output(&mut out[..10])?;
/// h.output(&mut out[10..])?;
/// assert!(h.output(&mut [0u8; 1]).is_err());
/// # Ok::<(), hashes::HashError>(())
/// ```
pub struct XofHasher<H: ExtendableOutput> {
  hasher: H,
  reader: Option<H::Reader>,
  limit: u64,
}

impl<H: ExtendableOutput> Clone for XofHasher<H> {
  fn clone(&self) -> Self {
    Self {
      hasher: self.hasher.clone(),
      reader: self.reader.clone(),
      limit: self.limit,
    }
  }
}

impl<H: ExtendableOutput> Default for XofHasher<H> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<H: ExtendableOutput> core::fmt::Debug for XofHasher<H> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("XofHasher")
      .field("output_bits", &self.output_bits())
      .field("position", &self.position())
      .field("finalized", &self.is_finalized())
      .finish_non_exhaustive()
  }
}

impl<H: ExtendableOutput> XofHasher<H> {
  /// Largest declarable output length, in bytes.
  pub const MAX_OUTPUT_BYTES: u64 = H::MAX_OUTPUT_BITS / 8;

  /// Fresh instance whose output is bounded only by [`Self::MAX_OUTPUT_BYTES`].
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::from_hasher(H::new())
  }

  /// Wrap an existing hasher, keeping any input it has already absorbed.
  #[inline]
  #[must_use]
  pub fn from_hasher(hasher: H) -> Self {
    Self {
      hasher,
      reader: None,
      limit: Self::MAX_OUTPUT_BYTES,
    }
  }

  /// Fresh instance with a declared output length of `bits`.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidConfiguration`] if `bits` is zero, not a multiple of
  /// 8, or above `H::MAX_OUTPUT_BITS`.
  pub fn with_output_bits(bits: u64) -> Result<Self, HashError> {
    let mut h = Self::new();
    h.set_output_bits(bits)?;
    Ok(h)
  }

  fn validate_bits(bits: u64) -> Result<u64, ConfigError> {
    if bits == 0 {
      return Err(ConfigError::OutputBitsZero);
    }
    if !bits.is_multiple_of(8) {
      return Err(ConfigError::OutputBitsNotByteAligned { bits });
    }
    if bits > H::MAX_OUTPUT_BITS {
      return Err(ConfigError::OutputBitsTooLarge {
        bits,
        max: H::MAX_OUTPUT_BITS,
      });
    }
    Ok(bits / 8)
  }

  /// Declare the total output length in bits.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidConfiguration`] if `bits` is invalid or output has
  /// already begun. The previous length is kept on failure.
  pub fn set_output_bits(&mut self, bits: u64) -> Result<(), HashError> {
    let checked = if self.reader.is_some() {
      Err(ConfigError::OutputInProgress)
    } else {
      Self::validate_bits(bits)
    };
    match checked {
      Ok(bytes) => {
        self.limit = bytes;
        Ok(())
      }
      Err(err) => {
        tracing::debug!(target: "hashes::xof", bits, %err, "rejected output length");
        Err(err.into())
      }
    }
  }

  /// Declared output length in bits.
  #[inline]
  #[must_use]
  pub fn output_bits(&self) -> u64 {
    self.limit * 8
  }

  /// Whether output has begun.
  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.reader.is_some()
  }

  /// Bytes emitted so far.
  #[inline]
  #[must_use]
  pub fn position(&self) -> u64 {
    self.reader.as_ref().map_or(0, Xof::position)
  }

  /// Bytes that may still be emitted.
  #[inline]
  #[must_use]
  pub fn remaining(&self) -> u64 {
    self.limit - self.position()
  }

  /// The wrapped hasher.
  #[inline]
  pub fn hasher(&self) -> &H {
    &self.hasher
  }

  /// Absorb `data`.
  ///
  /// # Errors
  ///
  /// [`HashError::WriteAfterFinalize`] once output has begun. Nothing is
  /// absorbed in that case.
  pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
    if self.reader.is_some() {
      tracing::debug!(target: "hashes::xof", len = data.len(), "update after output");
      return Err(HashError::WriteAfterFinalize);
    }
    self.hasher.update(data);
    Ok(())
  }

  /// Write the next `dest.len()` bytes of the output stream.
  ///
  /// The first call derives the root value and finalizes the instance.
  ///
  /// # Errors
  ///
  /// [`HashError::OutputLengthExceeded`] if the read would pass the declared
  /// length. Nothing is written and the position is unchanged.
  pub fn output(&mut self, dest: &mut [u8]) -> Result<(), HashError> {
    let position = self.position();
    let requested = dest.len() as u64;
    if position.checked_add(requested).is_none_or(|end| end > self.limit) {
      tracing::debug!(
        target: "hashes::xof",
        position,
        requested,
        limit = self.limit,
        "output request exceeds declared length"
      );
      return Err(HashError::OutputLengthExceeded {
        position,
        requested,
        limit: self.limit,
      });
    }

    let (hasher, limit) = (&self.hasher, self.limit);
    let reader = self.reader.get_or_insert_with(|| {
      tracing::trace!(target: "hashes::xof", limit, "deriving XOF root");
      hasher.finalize_xof()
    });
    reader.squeeze(dest)
  }

  /// Read the next `len` bytes of the output stream into a new vector.
  ///
  /// # Errors
  ///
  /// Same as [`output`](Self::output); no allocation is made on failure.
  #[cfg(feature = "alloc")]
  pub fn output_vec(&mut self, len: usize) -> Result<alloc::vec::Vec<u8>, HashError> {
    let position = self.position();
    let requested = len as u64;
    if position.checked_add(requested).is_none_or(|end| end > self.limit) {
      return Err(HashError::OutputLengthExceeded {
        position,
        requested,
        limit: self.limit,
      });
    }
    let mut out = alloc::vec![0u8; len];
    self.output(&mut out)?;
    Ok(out)
  }

  /// Fill `dest` from the start of the output stream, then reinitialize.
  ///
  /// # Errors
  ///
  /// [`HashError::OutputLengthExceeded`] if `dest` is longer than the
  /// declared length. The instance is left untouched in that case.
  pub fn finalize_into_reset(&mut self, dest: &mut [u8]) -> Result<(), HashError> {
    let requested = dest.len() as u64;
    if requested > self.limit {
      return Err(HashError::OutputLengthExceeded {
        position: 0,
        requested,
        limit: self.limit,
      });
    }
    self.hasher.finalize_xof().squeeze(dest)?;
    self.reset();
    Ok(())
  }

  /// Reinitialize the hasher. The declared output length is kept.
  #[inline]
  pub fn reset(&mut self) {
    self.hasher.reset();
    self.reader = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Sub-block `i` is `[i, i, ...]` plus a per-stream seed.
  #[derive(Clone)]
  struct Counter {
    seed: u8,
    expected: u64,
  }

  impl XofSource<4> for Counter {
    fn fill_block(&mut self, index: u64, out: &mut [u8; 4]) {
      assert_eq!(index, self.expected, "blocks must be requested in order");
      self.expected += 1;
      *out = [self.seed.wrapping_add(index as u8); 4];
    }
  }

  fn reader(limit: u64) -> XofReader<Counter, 4> {
    XofReader::with_limit(Counter { seed: 10, expected: 0 }, limit)
  }

  #[test]
  fn splits_match_single_read() {
    let mut whole = [0u8; 23];
    reader(64).squeeze(&mut whole).unwrap();
    assert_eq!(&whole[..8], &[10, 10, 10, 10, 11, 11, 11, 11]);

    for split in 0..=23 {
      let mut r = reader(64);
      let mut parts = [0u8; 23];
      let (a, b) = parts.split_at_mut(split);
      r.squeeze(a).unwrap();
      r.squeeze(b).unwrap();
      assert_eq!(parts, whole, "split={split}");
      assert_eq!(r.position(), 23);
    }
  }

  #[test]
  fn byte_at_a_time_matches() {
    let mut whole = [0u8; 17];
    reader(17).squeeze(&mut whole).unwrap();

    let mut r = reader(17);
    for &expected in &whole {
      let mut b = [0u8; 1];
      r.squeeze(&mut b).unwrap();
      assert_eq!(b[0], expected);
    }
    assert_eq!(r.remaining(), 0);
  }

  #[test]
  fn exceeding_limit_writes_nothing() {
    let mut r = reader(10);
    let mut first = [0u8; 6];
    r.squeeze(&mut first).unwrap();

    let mut over = [0xAAu8; 5];
    let err = r.squeeze(&mut over).unwrap_err();
    assert_eq!(
      err,
      HashError::OutputLengthExceeded {
        position: 6,
        requested: 5,
        limit: 10
      }
    );
    assert_eq!(over, [0xAA; 5]);
    assert_eq!(r.position(), 6);

    let mut rest = [0u8; 4];
    r.squeeze(&mut rest).unwrap();
    assert_eq!(r.remaining(), 0);
  }

  #[test]
  fn empty_read_is_allowed_at_limit() {
    let mut r = reader(0);
    r.squeeze(&mut []).unwrap();
    assert_eq!(r.position(), 0);
  }
}
