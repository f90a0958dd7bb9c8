#![allow(clippy::indexing_slicing)] // Fixed-size array indexing and block parsing

#[inline(always)]
pub const fn rotr32(x: u32, n: u32) -> u32 {
  x.rotate_right(n)
}

#[inline(always)]
pub const fn rotr64(x: u64, n: u32) -> u64 {
  x.rotate_right(n)
}

/// Parse a block into big-endian words.
#[inline(always)]
pub fn load_be32<const W: usize>(block: &[u8]) -> [u32; W] {
  let mut w = [0u32; W];
  let (chunks, _) = block.as_chunks::<4>();
  for (dst, c) in w.iter_mut().zip(chunks) {
    *dst = u32::from_be_bytes(*c);
  }
  w
}

#[inline(always)]
pub fn load_le32<const W: usize>(block: &[u8]) -> [u32; W] {
  let mut w = [0u32; W];
  let (chunks, _) = block.as_chunks::<4>();
  for (dst, c) in w.iter_mut().zip(chunks) {
    *dst = u32::from_le_bytes(*c);
  }
  w
}

#[inline(always)]
pub fn load_be64<const W: usize>(block: &[u8]) -> [u64; W] {
  let mut w = [0u64; W];
  let (chunks, _) = block.as_chunks::<8>();
  for (dst, c) in w.iter_mut().zip(chunks) {
    *dst = u64::from_be_bytes(*c);
  }
  w
}

#[inline(always)]
pub fn load_le64<const W: usize>(block: &[u8]) -> [u64; W] {
  let mut w = [0u64; W];
  let (chunks, _) = block.as_chunks::<8>();
  for (dst, c) in w.iter_mut().zip(chunks) {
    *dst = u64::from_le_bytes(*c);
  }
  w
}

/// Serialize words into `N` output bytes. Trailing words that do not fit are
/// dropped, so truncated variants share the full-width state.
#[inline(always)]
pub fn store_be32<const N: usize>(words: &[u32]) -> [u8; N] {
  let mut out = [0u8; N];
  for (c, w) in out.chunks_mut(4).zip(words) {
    c.copy_from_slice(&w.to_be_bytes()[..c.len()]);
  }
  out
}

#[inline(always)]
pub fn store_le32<const N: usize>(words: &[u32]) -> [u8; N] {
  let mut out = [0u8; N];
  for (c, w) in out.chunks_mut(4).zip(words) {
    c.copy_from_slice(&w.to_le_bytes()[..c.len()]);
  }
  out
}

#[inline(always)]
pub fn store_be64<const N: usize>(words: &[u64]) -> [u8; N] {
  let mut out = [0u8; N];
  for (c, w) in out.chunks_mut(8).zip(words) {
    c.copy_from_slice(&w.to_be_bytes()[..c.len()]);
  }
  out
}

#[inline(always)]
pub fn store_le64<const N: usize>(words: &[u64]) -> [u8; N] {
  let mut out = [0u8; N];
  for (c, w) in out.chunks_mut(8).zip(words) {
    c.copy_from_slice(&w.to_le_bytes()[..c.len()]);
  }
  out
}
