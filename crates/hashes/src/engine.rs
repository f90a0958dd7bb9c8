//! Buffered block engine.
//!
//! [`BufferedEngine`] turns push-based input of arbitrary length into
//! block-aligned calls to a [`Compressor`], and owns padding and finalization.
//! Concrete algorithms are zero-sized descriptors implementing [`Compressor`];
//! the public hasher types are aliases over the engine.
//!
//! Memory use is one block of buffered input regardless of how much data is
//! fed in. Whole blocks are compressed straight from the caller's slice.

#![allow(clippy::indexing_slicing)] // Buffer offsets are bounded by `B` and audited

use core::marker::PhantomData;

use traits::Digest;

/// Width and byte order of a Merkle-Damgård length field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthField {
  /// 64-bit big-endian bit count (SHA-1, SHA-224, SHA-256).
  U64Be,
  /// 64-bit little-endian bit count (MD5).
  U64Le,
  /// 128-bit big-endian bit count (SHA-384, SHA-512).
  U128Be,
}

impl LengthField {
  #[inline]
  const fn width(self) -> usize {
    match self {
      Self::U64Be | Self::U64Le => 8,
      Self::U128Be => 16,
    }
  }
}

/// Algorithm-defined padding rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
  /// `0x80`, zero fill, then the message length in bits.
  MerkleDamgard(LengthField),
  /// Keccak pad10*1 with a domain-separation prefix.
  Keccak {
    /// Domain bits OR-ed into the first padding byte.
    domain: u8,
  },
  /// No padding bytes. The last block is held back by `update`, zero-filled,
  /// and compressed with [`BlockContext::last`] set (BLAKE2).
  FinalBlockFlag,
}

impl Padding {
  /// Whether `update` must keep the final full block buffered.
  #[inline]
  #[must_use]
  pub const fn defers_final_block(self) -> bool {
    matches!(self, Self::FinalBlockFlag)
  }

  /// Write the padding for a message of `total_bytes` with `buffered` bytes
  /// pending in a `block_len`-byte block. Returns the padding length.
  ///
  /// `out` must hold at least `2 * block_len` bytes. After padding, the
  /// pending bytes plus the returned length are a whole number of blocks.
  #[must_use]
  pub fn write(self, block_len: usize, total_bytes: u128, buffered: usize, out: &mut [u8]) -> usize {
    debug_assert!(buffered < block_len);
    match self {
      Self::MerkleDamgard(field) => {
        let width = field.width();
        let len = if buffered + 1 + width <= block_len {
          block_len - buffered
        } else {
          2 * block_len - buffered
        };
        let out = &mut out[..len];
        out.fill(0);
        out[0] = 0x80;

        let bits = total_bytes.wrapping_mul(8);
        let tail = &mut out[len - width..];
        match field {
          LengthField::U64Be => tail.copy_from_slice(&(bits as u64).to_be_bytes()),
          LengthField::U64Le => tail.copy_from_slice(&(bits as u64).to_le_bytes()),
          LengthField::U128Be => tail.copy_from_slice(&bits.to_be_bytes()),
        }
        len
      }
      Self::Keccak { domain } => {
        let len = block_len - buffered;
        let out = &mut out[..len];
        out.fill(0);
        out[0] = domain;
        out[len - 1] |= 0x80;
        len
      }
      Self::FinalBlockFlag => 0,
    }
  }
}

/// Per-call context handed to [`Compressor::compress`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockContext {
  /// Message bytes absorbed through the end of this block.
  ///
  /// For the final block of a [`Padding::FinalBlockFlag`] algorithm this is
  /// the exact message length, excluding zero fill.
  pub counter: u128,
  /// Set only on the forced final compression.
  pub last: bool,
}

/// A block compression function and the constants around it.
///
/// `B` is the block size in bytes. Implementors are zero-sized descriptors; all
/// mutable data lives in [`Compressor::State`].
pub trait Compressor<const B: usize> {
  /// Chaining state words.
  type State: Copy;

  /// Serialized digest.
  type Output: Copy + Eq + core::fmt::Debug + AsRef<[u8]>;

  /// Digest size in bytes.
  const OUTPUT_LEN: usize;

  /// State after `initialize()`.
  const INITIAL_STATE: Self::State;

  /// Padding rule applied by [`BufferedEngine::finalize`].
  const PADDING: Padding;

  /// Absorb one block into `state`.
  fn compress(state: &mut Self::State, block: &[u8; B], ctx: BlockContext);

  /// Write the padding for `total_bytes` of input with `buffered` bytes still
  /// pending, returning its length. `out` holds `2 * B` bytes.
  #[inline]
  fn pad(total_bytes: u128, buffered: usize, out: &mut [u8]) -> usize {
    Self::PADDING.write(B, total_bytes, buffered, out)
  }

  /// Serialize the final state into digest bytes.
  fn serialize(state: &Self::State) -> Self::Output;
}

/// Streaming hasher generic over a [`Compressor`].
///
/// A clone is a complete, independent checkpoint: every field is a plain
/// array or integer.
pub struct BufferedEngine<C: Compressor<B>, const B: usize> {
  state: C::State,
  buf: [u8; B],
  buf_len: usize,
  /// Bytes passed to `update` since the last reset.
  total: u128,
  /// Message bytes already run through the compression function.
  compressed: u128,
  _core: PhantomData<C>,
}

impl<C: Compressor<B>, const B: usize> Clone for BufferedEngine<C, B> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      state: self.state,
      buf: self.buf,
      buf_len: self.buf_len,
      total: self.total,
      compressed: self.compressed,
      _core: PhantomData,
    }
  }
}

impl<C: Compressor<B>, const B: usize> Default for BufferedEngine<C, B> {
  #[inline]
  fn default() -> Self {
    Self {
      state: C::INITIAL_STATE,
      buf: [0u8; B],
      buf_len: 0,
      total: 0,
      compressed: 0,
      _core: PhantomData,
    }
  }
}

impl<C: Compressor<B>, const B: usize> core::fmt::Debug for BufferedEngine<C, B> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("BufferedEngine")
      .field("block_len", &B)
      .field("buffered", &self.buf_len)
      .field("total", &self.total)
      .finish_non_exhaustive()
  }
}

impl<C: Compressor<B>, const B: usize> BufferedEngine<C, B> {
  /// Total bytes passed to `update` since the last reset.
  #[inline]
  #[must_use]
  pub fn total_bytes(&self) -> u128 {
    self.total
  }

  /// Bytes currently held in the pending block.
  #[inline]
  #[must_use]
  pub fn buffered_len(&self) -> usize {
    self.buf_len
  }

  #[inline(always)]
  fn compress_block(state: &mut C::State, compressed: &mut u128, block: &[u8; B]) {
    *compressed = compressed.wrapping_add(B as u128);
    C::compress(
      state,
      block,
      BlockContext {
        counter: *compressed,
        last: false,
      },
    );
  }

  /// Block-align `data` into the compression function. Does not touch `total`.
  fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }
    let defer = C::PADDING.defers_final_block();

    if self.buf_len != 0 {
      let take = core::cmp::min(B - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      // A deferring algorithm keeps a full block buffered until it knows more
      // input follows.
      if self.buf_len == B && (!defer || !data.is_empty()) {
        Self::compress_block(&mut self.state, &mut self.compressed, &self.buf);
        self.buf_len = 0;
      }
    }

    if data.is_empty() {
      return;
    }
    debug_assert_eq!(self.buf_len, 0);

    let (mut blocks, rest) = data.as_chunks::<B>();
    let mut held: Option<&[u8; B]> = None;
    if defer
      && rest.is_empty()
      && let Some((last, init)) = blocks.split_last()
    {
      held = Some(last);
      blocks = init;
    }

    for block in blocks {
      Self::compress_block(&mut self.state, &mut self.compressed, block);
    }

    if let Some(last) = held {
      self.buf = *last;
      self.buf_len = B;
    } else if !rest.is_empty() {
      self.buf[..rest.len()].copy_from_slice(rest);
      self.buf_len = rest.len();
    }
  }

  /// Absorb `data`. Splitting input across calls never changes the digest.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.total = self.total.wrapping_add(data.len() as u128);
    self.absorb(data);
  }

  /// Apply padding and the final compression to a copy of the state.
  #[must_use]
  pub(crate) fn finalize_state(&self) -> C::State {
    let mut tail = self.clone();

    if C::PADDING.defers_final_block() {
      let mut block = tail.buf;
      block[tail.buf_len..].fill(0);
      C::compress(
        &mut tail.state,
        &block,
        BlockContext {
          counter: tail.total,
          last: true,
        },
      );
      return tail.state;
    }

    let mut scratch = [[0u8; B]; 2];
    let pad = scratch.as_flattened_mut();
    let len = C::pad(tail.total, tail.buf_len, pad);
    tail.absorb(&pad[..len]);
    debug_assert_eq!(tail.buf_len, 0, "padding must end on a block boundary");
    tail.state
  }

  /// Digest of everything absorbed so far. The engine is left untouched.
  #[inline]
  #[must_use]
  pub fn finalize(&self) -> C::Output {
    C::serialize(&self.finalize_state())
  }

  /// Return to the algorithm's initial state.
  #[inline]
  pub fn reset(&mut self) {
    *self = Self::default();
  }
}

impl<C: Compressor<B>, const B: usize> Digest for BufferedEngine<C, B> {
  const OUTPUT_SIZE: usize = C::OUTPUT_LEN;
  const BLOCK_SIZE: usize = B;
  type Output = C::Output;

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    BufferedEngine::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    BufferedEngine::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    BufferedEngine::reset(self);
  }
}
