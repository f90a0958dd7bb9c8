//! SHA-1 (FIPS 180-4).
//!
//! Collision attacks are practical; use only where a protocol mandates it.

#![allow(clippy::indexing_slicing)] // Fixed-size arrays + message schedule

use crate::{
  engine::{BlockContext, BufferedEngine, Compressor, LengthField, Padding},
  util::{load_be32, store_be32},
};

const BLOCK_LEN: usize = 64;

const H0: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

const K: [u32; 4] = [0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc, 0xca62_c1d6];

/// SHA-1 compression descriptor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha1Core;

impl Compressor<BLOCK_LEN> for Sha1Core {
  type State = [u32; 5];
  type Output = [u8; 20];

  const OUTPUT_LEN: usize = 20;
  const INITIAL_STATE: [u32; 5] = H0;
  const PADDING: Padding = Padding::MerkleDamgard(LengthField::U64Be);

  fn compress(state: &mut [u32; 5], block: &[u8; BLOCK_LEN], _ctx: BlockContext) {
    // 16-word ring buffer schedule.
    let mut w: [u32; 16] = load_be32(block);
    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for i in 0..80 {
      let wi = if i < 16 {
        w[i]
      } else {
        let x = (w[(i + 13) & 15] ^ w[(i + 8) & 15] ^ w[(i + 2) & 15] ^ w[i & 15]).rotate_left(1);
        w[i & 15] = x;
        x
      };
      let (f, k) = match i / 20 {
        0 => ((b & c) | (!b & d), K[0]),
        1 => (b ^ c ^ d, K[1]),
        2 => ((b & c) | (b & d) | (c & d), K[2]),
        _ => (b ^ c ^ d, K[3]),
      };
      let t = a
        .rotate_left(5)
        .wrapping_add(f)
        .wrapping_add(e)
        .wrapping_add(k)
        .wrapping_add(wi);
      e = d;
      d = c;
      c = b.rotate_left(30);
      b = a;
      a = t;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
  }

  #[inline]
  fn serialize(state: &[u32; 5]) -> [u8; 20] {
    store_be32(state)
  }
}

/// SHA-1 hasher.
pub type Sha1 = BufferedEngine<Sha1Core, BLOCK_LEN>;
