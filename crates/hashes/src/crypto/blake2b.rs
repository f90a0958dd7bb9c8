//! BLAKE2b-512 (RFC 7693).
//!
//! Portable, `no_std`, pure Rust implementation (unkeyed). The final block is
//! held back by the engine and compressed with the last-block flag.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use crate::{
  engine::{BlockContext, BufferedEngine, Compressor, Padding},
  util::{load_le64, rotr64, store_le64},
};

const BLOCK_LEN: usize = 128;

pub(crate) const IV: [u64; 8] = [
  0x6a09_e667_f3bc_c908,
  0xbb67_ae85_84ca_a73b,
  0x3c6e_f372_fe94_f82b,
  0xa54f_f53a_5f1d_36f1,
  0x510e_527f_ade6_82d1,
  0x9b05_688c_2b3e_6c1f,
  0x1f83_d9ab_fb41_bd6b,
  0x5be0_cd19_137e_2179,
];

pub(crate) const SIGMA: [[usize; 16]; 10] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
  [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
  [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
  [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
  [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
  [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
  [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
  [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
  [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
  [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

const ROUNDS: usize = 12;

/// Column then diagonal quarter-round lanes.
pub(crate) const LANES: [[usize; 4]; 8] = [
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
fn g(v: &mut [u64; 16], [a, b, c, d]: [usize; 4], x: u64, y: u64) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = rotr64(v[d] ^ v[a], 32);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr64(v[b] ^ v[c], 24);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = rotr64(v[d] ^ v[a], 16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr64(v[b] ^ v[c], 63);
}

fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u128, is_last: bool) {
  let m: [u64; 16] = load_le64(block);

  let mut v = [0u64; 16];
  v[..8].copy_from_slice(&h[..]);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u64;
  v[13] ^= (t >> 64) as u64;
  if is_last {
    v[14] = !v[14];
  }

  for r in 0..ROUNDS {
    let s = &SIGMA[r % 10];
    for (i, lane) in LANES.iter().enumerate() {
      g(&mut v, *lane, m[s[2 * i]], m[s[2 * i + 1]]);
    }
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}

const fn initial_state() -> [u64; 8] {
  let mut h = IV;
  // Parameter block: outlen=64, keylen=0, fanout=1, depth=1.
  h[0] ^= 0x0101_0040;
  h
}

/// BLAKE2b-512 compression descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake2b512Core;

impl Compressor<BLOCK_LEN> for Blake2b512Core {
  type State = [u64; 8];
  type Output = [u8; 64];

  const OUTPUT_LEN: usize = 64;
  const INITIAL_STATE: [u64; 8] = initial_state();
  const PADDING: Padding = Padding::FinalBlockFlag;

  #[inline]
  fn compress(state: &mut [u64; 8], block: &[u8; BLOCK_LEN], ctx: BlockContext) {
    compress(state, block, ctx.counter, ctx.last);
  }

  #[inline]
  fn serialize(state: &[u64; 8]) -> [u8; 64] {
    store_le64(state)
  }
}

/// BLAKE2b-512 hasher.
pub type Blake2b512 = BufferedEngine<Blake2b512Core, BLOCK_LEN>;
