//! BLAKE3 (hash, keyed hash, and XOF).
//!
//! Input is split into 1024-byte chunks that form the leaves of a binary
//! Merkle tree. The hasher keeps one [`ChunkState`] for the chunk being filled
//! and a stack of completed subtree chaining values, one slot per height.
//! Bit `h` of the `used` mask is set exactly when slot `h` holds the chaining
//! value of a complete subtree of `2^h` chunks, so merging a new chunk is the
//! carry propagation of adding one to that mask.
//!
//! Memory use is bounded by the 54-slot stack, enough for 2^64 bytes of input.

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + internal block parsing

use core::cmp::min;

use traits::{ConfigError, Digest, ExtendableOutput, HashError};

use crate::{
  util::{load_le32, store_le32},
  xof::{UNBOUNDED_OUTPUT_BITS, XofReader, XofSource},
};

const OUT_LEN: usize = 32;
const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 64;
const CHUNK_LEN: usize = 1024;
const OUTPUT_BLOCK_LEN: usize = 2 * OUT_LEN;

/// Stack slots; one per possible subtree height below 2^64 bytes.
const MAX_DEPTH: usize = 54;

const CHUNK_START: u32 = 1 << 0;
const CHUNK_END: u32 = 1 << 1;
const PARENT: u32 = 1 << 2;
const ROOT: u32 = 1 << 3;
const KEYED_HASH: u32 = 1 << 4;

const IV: [u32; 8] = [
  0x6A09_E667,
  0xBB67_AE85,
  0x3C6E_F372,
  0xA54F_F53A,
  0x510E_527F,
  0x9B05_688C,
  0x1F83_D9AB,
  0x5BE0_CD19,
];

/// BLAKE3 message schedule.
///
/// `MSG_SCHEDULE[round][i]` gives the index of the message word to use.
const MSG_SCHEDULE: [[usize; 16]; 7] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [2, 6, 3, 10, 7, 0, 4, 13, 1, 11, 12, 5, 9, 14, 15, 8],
  [3, 4, 10, 12, 13, 2, 7, 14, 6, 5, 9, 0, 11, 15, 8, 1],
  [10, 7, 12, 9, 14, 3, 13, 15, 4, 0, 11, 2, 5, 8, 1, 6],
  [12, 13, 9, 11, 15, 10, 14, 8, 7, 2, 5, 3, 0, 1, 6, 4],
  [9, 14, 11, 5, 8, 12, 15, 1, 13, 3, 0, 10, 2, 6, 4, 7],
  [11, 15, 5, 0, 1, 9, 8, 6, 14, 10, 2, 12, 3, 4, 7, 13],
];

/// Column then diagonal quarter-round lanes.
const LANES: [[usize; 4]; 8] = [
  [0, 4, 8, 12],
  [1, 5, 9, 13],
  [2, 6, 10, 14],
  [3, 7, 11, 15],
  [0, 5, 10, 15],
  [1, 6, 11, 12],
  [2, 7, 8, 13],
  [3, 4, 9, 14],
];

#[inline(always)]
fn g(v: &mut [u32; 16], [a, b, c, d]: [usize; 4], x: u32, y: u32) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = (v[d] ^ v[a]).rotate_right(16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(12);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = (v[d] ^ v[a]).rotate_right(8);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = (v[b] ^ v[c]).rotate_right(7);
}

fn compress(chaining_value: &[u32; 8], block_words: &[u32; 16], counter: u64, block_len: u32, flags: u32) -> [u32; 16] {
  let mut v = [0u32; 16];
  v[..8].copy_from_slice(chaining_value);
  v[8..12].copy_from_slice(&IV[..4]);
  v[12] = counter as u32;
  v[13] = (counter >> 32) as u32;
  v[14] = block_len;
  v[15] = flags;

  for s in &MSG_SCHEDULE {
    for (i, lane) in LANES.iter().enumerate() {
      g(&mut v, *lane, block_words[s[2 * i]], block_words[s[2 * i + 1]]);
    }
  }

  for i in 0..8 {
    v[i] ^= v[i + 8];
    v[i + 8] ^= chaining_value[i];
  }
  v
}

#[inline(always)]
fn first_8_words(words: [u32; 16]) -> [u32; 8] {
  let mut out = [0u32; 8];
  out.copy_from_slice(&words[..8]);
  out
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes
// ─────────────────────────────────────────────────────────────────────────────

/// A node whose compression has not yet been run: either a chunk's last block
/// or a parent. Holding it unevaluated lets the caller decide whether it is
/// the root.
#[derive(Clone, Copy)]
pub struct OutputState {
  input_chaining_value: [u32; 8],
  block_words: [u32; 16],
  counter: u64,
  block_len: u32,
  flags: u32,
}

impl OutputState {
  #[inline]
  fn chaining_value(&self) -> [u32; 8] {
    first_8_words(compress(
      &self.input_chaining_value,
      &self.block_words,
      self.counter,
      self.block_len,
      self.flags,
    ))
  }

  #[inline]
  fn root_hash_bytes(&self) -> [u8; OUT_LEN] {
    let words = compress(&self.input_chaining_value, &self.block_words, 0, self.block_len, self.flags | ROOT);
    store_le32(&words[..8])
  }
}

impl XofSource<OUTPUT_BLOCK_LEN> for OutputState {
  #[inline]
  fn fill_block(&mut self, index: u64, out: &mut [u8; OUTPUT_BLOCK_LEN]) {
    let words = compress(
      &self.input_chaining_value,
      &self.block_words,
      index,
      self.block_len,
      self.flags | ROOT,
    );
    *out = store_le32(&words);
  }
}

#[inline]
fn parent_output(left_child_cv: [u32; 8], right_child_cv: [u32; 8], key_words: [u32; 8], flags: u32) -> OutputState {
  let mut block_words = [0u32; 16];
  block_words[..8].copy_from_slice(&left_child_cv);
  block_words[8..].copy_from_slice(&right_child_cv);
  OutputState {
    input_chaining_value: key_words,
    block_words,
    counter: 0,
    block_len: BLOCK_LEN as u32,
    flags: PARENT | flags,
  }
}

/// Accumulator for one 1024-byte chunk.
///
/// The most recent block is always kept buffered so the chunk's final block
/// can carry `CHUNK_END`, even when the chunk is exactly full.
#[derive(Clone, Copy)]
struct ChunkState {
  chaining_value: [u32; 8],
  chunk_counter: u64,
  block: [u8; BLOCK_LEN],
  block_len: u8,
  blocks_compressed: u8,
  flags: u32,
}

impl ChunkState {
  #[inline]
  fn new(key_words: [u32; 8], chunk_counter: u64, flags: u32) -> Self {
    Self {
      chaining_value: key_words,
      chunk_counter,
      block: [0u8; BLOCK_LEN],
      block_len: 0,
      blocks_compressed: 0,
      flags,
    }
  }

  #[inline]
  fn len(&self) -> usize {
    BLOCK_LEN * self.blocks_compressed as usize + self.block_len as usize
  }

  #[inline]
  fn start_flag(&self) -> u32 {
    if self.blocks_compressed == 0 { CHUNK_START } else { 0 }
  }

  /// Absorb at most the room left in this chunk.
  fn update(&mut self, mut input: &[u8]) {
    debug_assert!(input.len() <= CHUNK_LEN - self.len());
    while !input.is_empty() {
      if self.block_len as usize == BLOCK_LEN {
        let block_words: [u32; 16] = load_le32(&self.block);
        self.chaining_value = first_8_words(compress(
          &self.chaining_value,
          &block_words,
          self.chunk_counter,
          BLOCK_LEN as u32,
          self.flags | self.start_flag(),
        ));
        self.blocks_compressed += 1;
        self.block = [0u8; BLOCK_LEN];
        self.block_len = 0;
      }

      let offset = self.block_len as usize;
      let take = min(BLOCK_LEN - offset, input.len());
      self.block[offset..offset + take].copy_from_slice(&input[..take]);
      self.block_len += take as u8;
      input = &input[take..];
    }
  }

  #[inline]
  fn output(&self) -> OutputState {
    OutputState {
      input_chaining_value: self.chaining_value,
      block_words: load_le32(&self.block),
      counter: self.chunk_counter,
      block_len: self.block_len as u32,
      flags: self.flags | self.start_flag() | CHUNK_END,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree builder
// ─────────────────────────────────────────────────────────────────────────────

/// BLAKE3 output reader: 64-byte counter-mode blocks from the root node.
pub type Blake3Xof = XofReader<OutputState, OUTPUT_BLOCK_LEN>;

/// Incremental BLAKE3 hasher.
///
/// # Example
///
/// ```rust
/// use hashes::{crypto::Blake3, Digest};
///
/// let mut h = Blake3::new();
/// h.update(b"hello ");
/// h.update(b"world");
/// assert_eq!(h.finalize(), Blake3::digest(b"hello world"));
/// ```
#[derive(Clone)]
pub struct Blake3 {
  key_words: [u32; 8],
  flags: u32,
  chunk_state: ChunkState,
  stack: [[u32; 8]; MAX_DEPTH],
  used: u64,
}

impl Default for Blake3 {
  #[inline]
  fn default() -> Self {
    Self::new_internal(IV, 0)
  }
}

impl core::fmt::Debug for Blake3 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Blake3")
      .field("keyed", &(self.flags & KEYED_HASH != 0))
      .field("chunk_counter", &self.chunk_state.chunk_counter)
      .field("used", &format_args!("{:#b}", self.used))
      .finish_non_exhaustive()
  }
}

impl Blake3 {
  #[inline]
  fn new_internal(key_words: [u32; 8], flags: u32) -> Self {
    Self {
      key_words,
      flags,
      chunk_state: ChunkState::new(key_words, 0, flags),
      stack: [[0u32; 8]; MAX_DEPTH],
      used: 0,
    }
  }

  /// Construct a hasher for the keyed hash function.
  #[must_use]
  #[inline]
  pub fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
    Self::new_internal(load_le32(key), KEYED_HASH)
  }

  /// Construct a keyed hasher from a runtime-length key.
  ///
  /// # Errors
  ///
  /// [`HashError::InvalidConfiguration`] unless `key` is exactly 32 bytes.
  pub fn try_new_keyed(key: &[u8]) -> Result<Self, HashError> {
    match <&[u8; KEY_LEN]>::try_from(key) {
      Ok(key) => Ok(Self::new_keyed(key)),
      Err(_) => {
        tracing::debug!(target: "hashes::blake3", len = key.len(), "rejected key");
        Err(
          ConfigError::KeyLength {
            expected: KEY_LEN,
            actual: key.len(),
          }
          .into(),
        )
      }
    }
  }

  /// Compute the keyed hash of `data` in one shot.
  #[inline]
  #[must_use]
  pub fn keyed_digest(key: &[u8; KEY_LEN], data: &[u8]) -> [u8; OUT_LEN] {
    let mut h = Self::new_keyed(key);
    h.update(data);
    h.finalize()
  }

  /// Compute the XOF reader of `data` in one shot.
  #[inline]
  #[must_use]
  pub fn xof(data: &[u8]) -> Blake3Xof {
    let mut h = Self::new();
    h.update(data);
    h.finalize_xof()
  }

  /// Number of chunks whose chaining values have been merged into the stack.
  #[inline]
  #[must_use]
  pub fn merged_chunks(&self) -> u64 {
    self.used
  }

  /// Fold a completed chunk's chaining value into the subtree stack.
  fn merge(&mut self, mut cv: [u32; 8]) {
    let mut height = 0usize;
    while self.used & (1 << height) != 0 {
      cv = parent_output(self.stack[height], cv, self.key_words, self.flags).chaining_value();
      height += 1;
    }
    self.stack[height] = cv;
    self.used += 1;
    debug_assert_eq!(self.used & (1 << height), 1 << height);
  }

  /// Absorb `input`. Any split of the input into calls gives the same root.
  pub fn update(&mut self, mut input: &[u8]) {
    while !input.is_empty() {
      // A full chunk is only closed once more input proves it is not the root.
      if self.chunk_state.len() == CHUNK_LEN {
        let cv = self.chunk_state.output().chaining_value();
        self.merge(cv);
        let next = self.chunk_state.chunk_counter + 1;
        self.chunk_state = ChunkState::new(self.key_words, next, self.flags);
      }

      let take = min(CHUNK_LEN - self.chunk_state.len(), input.len());
      self.chunk_state.update(&input[..take]);
      input = &input[take..];
    }
  }

  /// Combine the open chunk with every stacked subtree, right to left.
  fn root_output(&self) -> OutputState {
    tracing::trace!(
      target: "hashes::blake3",
      chunks = self.chunk_state.chunk_counter + 1,
      depth = self.used.count_ones(),
      "finalizing tree"
    );
    let mut output = self.chunk_state.output();
    let mut pending = self.used;
    while pending != 0 {
      let height = pending.trailing_zeros() as usize;
      output = parent_output(self.stack[height], output.chaining_value(), self.key_words, self.flags);
      pending &= pending - 1;
    }
    output
  }

  /// 32-byte root hash. The hasher is left untouched.
  #[inline]
  #[must_use]
  pub fn finalize(&self) -> [u8; OUT_LEN] {
    self.root_output().root_hash_bytes()
  }

  /// Finalize into an extendable output reader positioned at byte zero.
  #[must_use]
  #[inline]
  pub fn finalize_xof(&self) -> Blake3Xof {
    XofReader::new(self.root_output())
  }

  /// Return to the initial state, keeping the key.
  #[inline]
  pub fn reset(&mut self) {
    *self = Self::new_internal(self.key_words, self.flags);
  }
}

impl Digest for Blake3 {
  const OUTPUT_SIZE: usize = OUT_LEN;
  const BLOCK_SIZE: usize = BLOCK_LEN;
  type Output = [u8; OUT_LEN];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Blake3::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    Blake3::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Blake3::reset(self);
  }
}

impl ExtendableOutput for Blake3 {
  type Reader = Blake3Xof;
  const MAX_OUTPUT_BITS: u64 = UNBOUNDED_OUTPUT_BITS;

  #[inline]
  fn finalize_xof(&self) -> Blake3Xof {
    Blake3::finalize_xof(self)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use traits::{Digest, HashError, Xof};

  use super::{Blake3, CHUNK_LEN, OUT_LEN};

  const KEY: &[u8; 32] = b"whats the Elvish word for friend";

  fn hex_to_bytes(hex: &str, out: &mut [u8]) {
    assert_eq!(hex.len(), out.len() * 2);
    for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
      let hi = (chunk[0] as char).to_digit(16).unwrap();
      let lo = (chunk[1] as char).to_digit(16).unwrap();
      out[i] = ((hi << 4) | lo) as u8;
    }
  }

  fn input_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
  }

  #[test]
  fn official_vectors_len0_hash_and_xof_prefix() {
    // Zero bytes: a single untouched chunk becomes the root.
    let hasher = Blake3::new();

    let expected_hash_hex = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";
    let mut expected_hash = [0u8; OUT_LEN];
    hex_to_bytes(expected_hash_hex, &mut expected_hash);
    assert_eq!(hasher.finalize(), expected_hash);

    let expected_xof_prefix_hex = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262e00f03e7b69af26b7faaf09fcd333050338ddfe085b8cc869ca98b206c08243a26f5487789e8f660afe6c99ef9e0c52b92e7393024a80459cf91f476f9ffdbda7001c22e159b402631f277ca96f2defdf1078282314e763699a31c5363165421cce14d";
    let mut expected_xof_prefix = [0u8; 131];
    hex_to_bytes(expected_xof_prefix_hex, &mut expected_xof_prefix);

    let mut xof = hasher.finalize_xof();
    let mut out = [0u8; 131];
    xof.squeeze(&mut out).unwrap();
    assert_eq!(out, expected_xof_prefix);
  }

  #[test]
  fn official_vectors_len0_keyed() {
    let keyed = Blake3::new_keyed(KEY);
    let expected_keyed_hex = "92b2b75604ed3c761f9d6f62392c8a9227ad0ea3f09573e783f1498a4ed60d26";
    let mut expected_keyed = [0u8; OUT_LEN];
    hex_to_bytes(expected_keyed_hex, &mut expected_keyed);
    assert_eq!(keyed.finalize(), expected_keyed);
    assert_eq!(Blake3::keyed_digest(KEY, b""), expected_keyed);
  }

  #[test]
  fn try_new_keyed_validates_length() {
    assert!(Blake3::try_new_keyed(KEY).is_ok());
    let err = Blake3::try_new_keyed(&KEY[..31]).unwrap_err();
    assert!(matches!(err, HashError::InvalidConfiguration(_)));
    assert!(Blake3::try_new_keyed(&[0u8; 33]).is_err());
  }

  #[test]
  fn used_mask_counts_closed_chunks() {
    let mut h = Blake3::new();
    h.update(&input_pattern(5 * CHUNK_LEN));
    // The fifth chunk stays open until more input arrives.
    assert_eq!(h.merged_chunks(), 0b100);
    h.update(&[0]);
    assert_eq!(h.merged_chunks(), 0b101);
  }

  #[test]
  fn byte_at_a_time_matches_one_shot_across_chunk_boundaries() {
    for len in [0, 1, 63, 64, 65, 1023, 1024, 1025, 2048, 2049, 3 * 1024 + 7, 8 * 1024 + 1] {
      let data = input_pattern(len);
      let mut h = Blake3::new();
      for b in &data {
        h.update(core::slice::from_ref(b));
      }
      assert_eq!(h.finalize(), Blake3::digest(&data), "len={len}");
    }
  }

  #[test]
  fn reset_keeps_key() {
    let mut h = Blake3::new_keyed(KEY);
    h.update(b"some input");
    h.reset();
    assert_eq!(h.finalize(), Blake3::keyed_digest(KEY, b""));
  }

  #[test]
  fn xof_prefix_is_digest() {
    let data = input_pattern(4097);
    let mut out = [0u8; 100];
    Blake3::xof(&data).squeeze(&mut out).unwrap();
    assert_eq!(&out[..OUT_LEN], &Blake3::digest(&data));
  }
}
