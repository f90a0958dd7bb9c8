//! Keccak-f[1600] sponge core (internal).
//!
//! Exposes the permutation as a [`Compressor`] parameterized by rate, domain
//! byte, and output length, plus the squeezing side used by SHAKE.

#![allow(clippy::indexing_slicing)] // Keccak state is fixed-size; indexing is audited

use crate::{
  engine::{BlockContext, Compressor, Padding},
  util::store_le64,
  xof::XofSource,
};

const KECCAKF_ROUNDS: usize = 24;

// Round constants.
const RC: [u64; KECCAKF_ROUNDS] = [
  0x0000_0000_0000_0001,
  0x0000_0000_0000_8082,
  0x8000_0000_0000_808a,
  0x8000_0000_8000_8000,
  0x0000_0000_0000_808b,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8009,
  0x0000_0000_0000_008a,
  0x0000_0000_0000_0088,
  0x0000_0000_8000_8009,
  0x0000_0000_8000_000a,
  0x0000_0000_8000_808b,
  0x8000_0000_0000_008b,
  0x8000_0000_0000_8089,
  0x8000_0000_0000_8003,
  0x8000_0000_0000_8002,
  0x8000_0000_0000_0080,
  0x0000_0000_0000_800a,
  0x8000_0000_8000_000a,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8080,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8008,
];

// ρ rotation offsets, in π visiting order starting from lane 1.
const RHO: [u32; 24] = [
  1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

// π destination lanes.
const PI: [usize; 24] = [
  10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

pub(crate) fn keccakf(a: &mut [u64; 25]) {
  for rc in RC {
    // θ
    let mut c = [0u64; 5];
    for (x, cx) in c.iter_mut().enumerate() {
      *cx = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }
    for x in 0..5 {
      let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
      for y in (0..25).step_by(5) {
        a[y + x] ^= d;
      }
    }

    // ρ + π
    let mut carry = a[1];
    for (&dst, &rot) in PI.iter().zip(RHO.iter()) {
      let next = a[dst];
      a[dst] = carry.rotate_left(rot);
      carry = next;
    }

    // χ
    for y in (0..25).step_by(5) {
      let row = [a[y], a[y + 1], a[y + 2], a[y + 3], a[y + 4]];
      for x in 0..5 {
        a[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
      }
    }

    // ι
    a[0] ^= rc;
  }
}

/// Keccak sponge descriptor: `RATE`-byte blocks, padding domain byte
/// `DOMAIN`, and an `OUT`-byte fixed digest taken from the first squeeze.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeccakCore<const RATE: usize, const DOMAIN: u8, const OUT: usize>;

impl<const RATE: usize, const DOMAIN: u8, const OUT: usize> Compressor<RATE> for KeccakCore<RATE, DOMAIN, OUT> {
  type State = [u64; 25];
  type Output = [u8; OUT];

  const OUTPUT_LEN: usize = OUT;
  const INITIAL_STATE: [u64; 25] = [0u64; 25];
  const PADDING: Padding = Padding::Keccak { domain: DOMAIN };

  #[inline]
  fn compress(state: &mut [u64; 25], block: &[u8; RATE], _ctx: BlockContext) {
    debug_assert_eq!(RATE % 8, 0);
    let (lanes, _) = block.as_chunks::<8>();
    for (lane, bytes) in state.iter_mut().zip(lanes) {
      *lane ^= u64::from_le_bytes(*bytes);
    }
    keccakf(state);
  }

  #[inline]
  fn serialize(state: &[u64; 25]) -> [u8; OUT] {
    debug_assert!(OUT <= RATE);
    store_le64(state)
  }
}

/// Squeezing side of a finalized sponge. Sub-blocks are one rate wide.
#[derive(Clone)]
pub struct KeccakSqueeze<const RATE: usize> {
  state: [u64; 25],
}

impl<const RATE: usize> KeccakSqueeze<RATE> {
  #[inline]
  pub(crate) fn new(state: [u64; 25]) -> Self {
    Self { state }
  }
}

impl<const RATE: usize> XofSource<RATE> for KeccakSqueeze<RATE> {
  fn fill_block(&mut self, index: u64, out: &mut [u8; RATE]) {
    // The absorbed state already holds block zero.
    if index > 0 {
      keccakf(&mut self.state);
    }
    let (lanes, _) = out.as_chunks_mut::<8>();
    for (bytes, lane) in lanes.iter_mut().zip(self.state.iter()) {
      *bytes = lane.to_le_bytes();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::keccakf;

  #[test]
  fn permutation_of_zero_state() {
    // First lanes of Keccak-f[1600] applied to the all-zero state.
    let mut state = [0u64; 25];
    keccakf(&mut state);
    assert_eq!(state[0], 0xf125_8f79_40e1_dde7);
    assert_eq!(state[1], 0x84d5_ccf9_33c0_478a);
    assert_eq!(state[24], 0xeaf1_ff7b_5cec_a249);
  }
}
