//! BLAKE2s-256 (RFC 7693).
//!
//! Portable, `no_std`, pure Rust implementation (unkeyed).

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices

use super::blake2b::{LANES, SIGMA};
use crate::{
  engine::{BlockContext, BufferedEngine, Compressor, Padding},
  util::{load_le32, rotr32, store_le32},
};

const BLOCK_LEN: usize = 64;

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

#[inline(always)]
fn g(v: &mut [u32; 16], [a, b, c, d]: [usize; 4], x: u32, y: u32) {
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
  v[d] = rotr32(v[d] ^ v[a], 16);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr32(v[b] ^ v[c], 12);
  v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
  v[d] = rotr32(v[d] ^ v[a], 8);
  v[c] = v[c].wrapping_add(v[d]);
  v[b] = rotr32(v[b] ^ v[c], 7);
}

fn compress(h: &mut [u32; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  let m: [u32; 16] = load_le32(block);

  let mut v = [0u32; 16];
  v[..8].copy_from_slice(&h[..]);
  v[8..].copy_from_slice(&IV);
  v[12] ^= t as u32;
  v[13] ^= (t >> 32) as u32;
  if is_last {
    v[14] = !v[14];
  }

  for s in &SIGMA {
    for (i, lane) in LANES.iter().enumerate() {
      g(&mut v, *lane, m[s[2 * i]], m[s[2 * i + 1]]);
    }
  }

  for i in 0..8 {
    h[i] ^= v[i] ^ v[i + 8];
  }
}

const fn initial_state() -> [u32; 8] {
  let mut h = IV;
  // Parameter block word 0: outlen=32, keylen=0, fanout=1, depth=1.
  h[0] ^= 0x0101_0020;
  h
}

/// BLAKE2s-256 compression descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake2s256Core;

impl Compressor<BLOCK_LEN> for Blake2s256Core {
  type State = [u32; 8];
  type Output = [u8; 32];

  const OUTPUT_LEN: usize = 32;
  const INITIAL_STATE: [u32; 8] = initial_state();
  const PADDING: Padding = Padding::FinalBlockFlag;

  #[inline]
  fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN], ctx: BlockContext) {
    compress(state, block, ctx.counter as u64, ctx.last);
  }

  #[inline]
  fn serialize(state: &[u32; 8]) -> [u8; 32] {
    store_le32(state)
  }
}

/// BLAKE2s-256 hasher.
pub type Blake2s256 = BufferedEngine<Blake2s256Core, BLOCK_LEN>;
