//! SHA-224 and SHA-256 (FIPS 180-4).
//!
//! Both variants share one compression function and differ only in the
//! initial hash value and output truncation.

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + compression schedule

use crate::{
  engine::{BlockContext, BufferedEngine, Compressor, LengthField, Padding},
  util::{load_be32, rotr32, store_be32},
};

const BLOCK_LEN: usize = 64;

const H0_256: [u32; 8] = [
  0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const H0_224: [u32; 8] = [
  0xc105_9ed8,
  0x367c_d507,
  0x3070_dd17,
  0xf70e_5939,
  0xffc0_0b31,
  0x6858_1511,
  0x64f9_8fa7,
  0xbefa_4fa4,
];

const K: [u32; 64] = [
  0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5, 0xd807aa98,
  0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
  0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8,
  0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
  0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819,
  0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
  0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
  0xc67178f2,
];

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
  rotr32(x, 2) ^ rotr32(x, 13) ^ rotr32(x, 22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
  rotr32(x, 6) ^ rotr32(x, 11) ^ rotr32(x, 25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
  rotr32(x, 7) ^ rotr32(x, 18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
  rotr32(x, 17) ^ rotr32(x, 19) ^ (x >> 10)
}

fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
  // 16-word ring buffer message schedule.
  let mut w: [u32; 16] = load_be32(block);
  let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

  for (i, &k) in K.iter().enumerate() {
    if i >= 16 {
      w[i & 15] = small_sigma1(w[(i + 14) & 15])
        .wrapping_add(w[(i + 9) & 15])
        .wrapping_add(small_sigma0(w[(i + 1) & 15]))
        .wrapping_add(w[i & 15]);
    }
    let t1 = h
      .wrapping_add(big_sigma1(e))
      .wrapping_add((e & f) ^ (!e & g))
      .wrapping_add(k)
      .wrapping_add(w[i & 15]);
    let t2 = big_sigma0(a).wrapping_add((a & b) ^ (a & c) ^ (b & c));

    h = g;
    g = f;
    f = e;
    e = d.wrapping_add(t1);
    d = c;
    c = b;
    b = a;
    a = t1.wrapping_add(t2);
  }

  for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
    *s = s.wrapping_add(v);
  }
}

/// SHA-256 compression descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Core;

impl Compressor<BLOCK_LEN> for Sha256Core {
  type State = [u32; 8];
  type Output = [u8; 32];

  const OUTPUT_LEN: usize = 32;
  const INITIAL_STATE: [u32; 8] = H0_256;
  const PADDING: Padding = Padding::MerkleDamgard(LengthField::U64Be);

  #[inline]
  fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN], _ctx: BlockContext) {
    compress(state, block);
  }

  #[inline]
  fn serialize(state: &[u32; 8]) -> [u8; 32] {
    store_be32(state)
  }
}

/// SHA-224 compression descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha224Core;

impl Compressor<BLOCK_LEN> for Sha224Core {
  type State = [u32; 8];
  type Output = [u8; 28];

  const OUTPUT_LEN: usize = 28;
  const INITIAL_STATE: [u32; 8] = H0_224;
  const PADDING: Padding = Padding::MerkleDamgard(LengthField::U64Be);

  #[inline]
  fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN], _ctx: BlockContext) {
    compress(state, block);
  }

  #[inline]
  fn serialize(state: &[u32; 8]) -> [u8; 28] {
    store_be32(state)
  }
}

/// SHA-256 hasher.
pub type Sha256 = BufferedEngine<Sha256Core, BLOCK_LEN>;

/// SHA-224 hasher.
pub type Sha224 = BufferedEngine<Sha224Core, BLOCK_LEN>;
