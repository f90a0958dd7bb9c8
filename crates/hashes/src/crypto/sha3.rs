//! SHA-3 (FIPS 202), legacy Keccak-256, and the SHAKE XOFs.
//!
//! Every variant is the same Keccak-f[1600] sponge with a different rate and
//! padding domain byte. SHAKE128 and SHAKE256 also implement
//! [`ExtendableOutput`]; their fixed-size [`Digest`](traits::Digest) output is
//! the prefix of the XOF stream.

use traits::ExtendableOutput;

use super::keccak::{KeccakCore, KeccakSqueeze};
use crate::{
  engine::BufferedEngine,
  xof::{UNBOUNDED_OUTPUT_BITS, XofReader},
};

const SHA3_DOMAIN: u8 = 0x06;
const KECCAK_DOMAIN: u8 = 0x01;
const SHAKE_DOMAIN: u8 = 0x1f;

const RATE_128: usize = 168;
const RATE_224: usize = 144;
const RATE_256: usize = 136;
const RATE_384: usize = 104;
const RATE_512: usize = 72;

/// SHA3-224 hasher.
pub type Sha3_224 = BufferedEngine<KeccakCore<RATE_224, SHA3_DOMAIN, 28>, RATE_224>;
/// SHA3-256 hasher.
pub type Sha3_256 = BufferedEngine<KeccakCore<RATE_256, SHA3_DOMAIN, 32>, RATE_256>;
/// SHA3-384 hasher.
pub type Sha3_384 = BufferedEngine<KeccakCore<RATE_384, SHA3_DOMAIN, 48>, RATE_384>;
/// SHA3-512 hasher.
pub type Sha3_512 = BufferedEngine<KeccakCore<RATE_512, SHA3_DOMAIN, 64>, RATE_512>;

/// Keccak-256 with the original `0x01` padding (pre-FIPS 202, as used by Ethereum).
pub type Keccak256 = BufferedEngine<KeccakCore<RATE_256, KECCAK_DOMAIN, 32>, RATE_256>;

/// SHAKE128 hasher. `finalize` yields the first 32 bytes of the stream.
pub type Shake128 = BufferedEngine<KeccakCore<RATE_128, SHAKE_DOMAIN, 32>, RATE_128>;
/// SHAKE256 hasher. `finalize` yields the first 64 bytes of the stream.
pub type Shake256 = BufferedEngine<KeccakCore<RATE_256, SHAKE_DOMAIN, 64>, RATE_256>;

/// SHAKE128 output reader.
pub type Shake128Xof = XofReader<KeccakSqueeze<RATE_128>, RATE_128>;
/// SHAKE256 output reader.
pub type Shake256Xof = XofReader<KeccakSqueeze<RATE_256>, RATE_256>;

impl ExtendableOutput for Shake128 {
  type Reader = Shake128Xof;
  const MAX_OUTPUT_BITS: u64 = UNBOUNDED_OUTPUT_BITS;

  #[inline]
  fn finalize_xof(&self) -> Shake128Xof {
    XofReader::new(KeccakSqueeze::new(self.finalize_state()))
  }
}

impl ExtendableOutput for Shake256 {
  type Reader = Shake256Xof;
  const MAX_OUTPUT_BITS: u64 = UNBOUNDED_OUTPUT_BITS;

  #[inline]
  fn finalize_xof(&self) -> Shake256Xof {
    XofReader::new(KeccakSqueeze::new(self.finalize_state()))
  }
}
