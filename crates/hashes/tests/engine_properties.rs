//! Streaming properties shared by every fixed-output algorithm.

use hashes::{
  Digest,
  crypto::{
    Blake2b512, Blake2s256, Blake3, Keccak256, Md5, Sha1, Sha3_224, Sha3_256, Sha3_384, Sha3_512, Sha224, Sha256,
    Sha384, Sha512, Sha512_256, Shake128, Shake256,
  },
};
use proptest::prelude::*;

fn pattern(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8).collect()
}

fn chunked<D: Digest>(data: &[u8], cuts: &[usize]) -> D::Output {
  let mut h = D::new();
  let mut rest = data;
  for &cut in cuts {
    let at = cut % (rest.len() + 1);
    let (head, tail) = rest.split_at(at);
    h.update(head);
    rest = tail;
  }
  h.update(rest);
  h.finalize()
}

fn check_boundaries<D: Digest>() {
  let b = D::BLOCK_SIZE;
  for len in [0, 1, b - 1, b, b + 1, 2 * b, 4 * b + 1] {
    let data = pattern(len);
    let one_shot = D::digest(&data);

    let mut bytewise = D::new();
    for byte in &data {
      bytewise.update(core::slice::from_ref(byte));
    }
    assert_eq!(bytewise.finalize(), one_shot, "bytewise len={len}");

    let mut split = D::new();
    let (head, tail) = data.split_at(len / 2);
    split.update(head);
    split.update(&[]);
    split.update(tail);
    assert_eq!(split.finalize(), one_shot, "split len={len}");
  }
}

fn check_reuse<D: Digest>() {
  let data = pattern(3 * D::BLOCK_SIZE + 5);
  let expected = D::digest(&data);

  let mut h = D::new();
  h.update(b"discarded prefix");
  h.reset();
  h.update(&data);
  assert_eq!(h.finalize(), expected);
  assert_eq!(h.finalize(), expected, "finalize must not disturb state");

  assert_eq!(h.finalize_reset(), expected);
  h.update(&data);
  assert_eq!(h.finalize(), expected, "finalize_reset must reinitialize");
}

fn check_clone_independence<D: Digest>() {
  let mut a = D::new();
  a.update(&pattern(D::BLOCK_SIZE + 3));
  let mut b = a.clone();

  a.update(b"left");
  b.update(b"right");

  let mut left = D::new();
  left.update(&pattern(D::BLOCK_SIZE + 3));
  left.update(b"left");
  let mut right = D::new();
  right.update(&pattern(D::BLOCK_SIZE + 3));
  right.update(b"right");

  assert_eq!(a.finalize(), left.finalize());
  assert_eq!(b.finalize(), right.finalize());
}

fn check_large_feed<D: Digest>() {
  let data = pattern(64 * 1024);
  let expected = D::digest(&data);

  let mut h = D::new();
  for byte in &data {
    h.update(core::slice::from_ref(byte));
  }
  assert_eq!(h.finalize(), expected);

  assert_eq!(D::digest_vectored(&[&data[..1000], &data[1000..]]), expected);
}

macro_rules! engine_properties {
  ($($module:ident => $ty:ty),* $(,)?) => {
    $(
      mod $module {
        use super::*;

        #[test]
        fn block_boundaries() {
          check_boundaries::<$ty>();
        }

        #[test]
        fn reset_and_finalize_reset() {
          check_reuse::<$ty>();
        }

        #[test]
        fn clones_are_independent() {
          check_clone_independence::<$ty>();
        }

        #[test]
        fn byte_at_a_time_matches_one_shot() {
          check_large_feed::<$ty>();
        }

        proptest! {
          #[test]
          fn chunking_does_not_change_digest(
            data in proptest::collection::vec(any::<u8>(), 0..2048),
            cuts in proptest::collection::vec(any::<usize>(), 0..8),
          ) {
            prop_assert_eq!(chunked::<$ty>(&data, &cuts), <$ty>::digest(&data));
          }
        }
      }
    )*
  };
}

engine_properties! {
  md5 => Md5,
  sha1 => Sha1,
  sha224 => Sha224,
  sha256 => Sha256,
  sha384 => Sha384,
  sha512 => Sha512,
  sha512_256 => Sha512_256,
  sha3_224 => Sha3_224,
  sha3_256 => Sha3_256,
  sha3_384 => Sha3_384,
  sha3_512 => Sha3_512,
  keccak256 => Keccak256,
  shake128 => Shake128,
  shake256 => Shake256,
  blake2b512 => Blake2b512,
  blake2s256 => Blake2s256,
  blake3 => Blake3,
}
