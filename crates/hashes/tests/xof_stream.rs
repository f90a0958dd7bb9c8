//! Output-stream lifecycle and limit behavior across the XOF algorithms.

use hashes::{
  ConfigError, Digest, ExtendableOutput, HashError, Xof,
  crypto::{Blake3, Shake128, Shake256},
  xof::{UNBOUNDED_OUTPUT_BITS, XofHasher},
};
use proptest::prelude::*;

fn full_stream<H: ExtendableOutput>(data: &[u8], len: usize) -> Vec<u8> {
  let mut h = H::new();
  h.update(data);
  let mut out = vec![0u8; len];
  h.finalize_xof().squeeze(&mut out).unwrap();
  out
}

fn split_stream<H: ExtendableOutput>(data: &[u8], len: usize, cuts: &[usize]) -> Vec<u8> {
  let mut h = H::new();
  h.update(data);
  let mut reader = h.finalize_xof();
  let mut out = vec![0u8; len];
  let mut rest = out.as_mut_slice();
  for &cut in cuts {
    let at = cut % (rest.len() + 1);
    let (head, tail) = rest.split_at_mut(at);
    reader.squeeze(head).unwrap();
    rest = tail;
  }
  reader.squeeze(rest).unwrap();
  assert_eq!(reader.position(), len as u64);
  out
}

proptest! {
  #[test]
  fn shake128_split_reads_match_single_read(
    data in proptest::collection::vec(any::<u8>(), 0..512),
    len in 0usize..1200,
    cuts in proptest::collection::vec(any::<usize>(), 0..10),
  ) {
    prop_assert_eq!(split_stream::<Shake128>(&data, len, &cuts), full_stream::<Shake128>(&data, len));
  }

  #[test]
  fn shake256_split_reads_match_single_read(
    data in proptest::collection::vec(any::<u8>(), 0..512),
    len in 0usize..1200,
    cuts in proptest::collection::vec(any::<usize>(), 0..10),
  ) {
    prop_assert_eq!(split_stream::<Shake256>(&data, len, &cuts), full_stream::<Shake256>(&data, len));
  }

  #[test]
  fn blake3_split_reads_match_single_read(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    len in 0usize..1200,
    cuts in proptest::collection::vec(any::<usize>(), 0..10),
  ) {
    prop_assert_eq!(split_stream::<Blake3>(&data, len, &cuts), full_stream::<Blake3>(&data, len));
  }
}

#[test]
fn digest_is_prefix_of_stream() {
  let data = b"prefix check";
  assert_eq!(full_stream::<Shake128>(data, 32), Shake128::digest(data).to_vec());
  assert_eq!(full_stream::<Shake256>(data, 64), Shake256::digest(data).to_vec());
  assert_eq!(full_stream::<Blake3>(data, 32), Blake3::digest(data).to_vec());
}

#[test]
fn declared_length_is_enforced_atomically() {
  let mut h = XofHasher::<Shake128>::with_output_bits(8 * 100).unwrap();
  h.update(b"abc").unwrap();

  let mut first = [0u8; 60];
  h.output(&mut first).unwrap();
  assert_eq!(h.position(), 60);
  assert_eq!(h.remaining(), 40);

  let mut too_much = [0xEEu8; 41];
  let err = h.output(&mut too_much).unwrap_err();
  assert_eq!(
    err,
    HashError::OutputLengthExceeded {
      position: 60,
      requested: 41,
      limit: 100,
    }
  );
  assert!(too_much.iter().all(|&b| b == 0xEE), "nothing written on failure");
  assert_eq!(h.position(), 60);

  let mut rest = [0u8; 40];
  h.output(&mut rest).unwrap();
  assert_eq!(h.remaining(), 0);
  h.output(&mut []).unwrap();

  let expected = full_stream::<Shake128>(b"abc", 100);
  assert_eq!(&expected[..60], &first[..]);
  assert_eq!(&expected[60..], &rest[..]);
}

#[test]
fn update_after_output_is_rejected() {
  let mut h = XofHasher::<Blake3>::new();
  h.update(b"before").unwrap();
  let mut out = [0u8; 16];
  h.output(&mut out).unwrap();
  assert!(h.is_finalized());

  assert_eq!(h.update(b"after"), Err(HashError::WriteAfterFinalize));

  let mut more = [0u8; 16];
  h.output(&mut more).unwrap();
  let expected = full_stream::<Blake3>(b"before", 32);
  assert_eq!(&expected[..16], &out[..]);
  assert_eq!(&expected[16..], &more[..]);
}

#[test]
fn invalid_output_lengths_are_configuration_errors() {
  assert_eq!(
    XofHasher::<Shake256>::with_output_bits(0).unwrap_err(),
    HashError::InvalidConfiguration(ConfigError::OutputBitsZero)
  );
  assert_eq!(
    XofHasher::<Shake256>::with_output_bits(12).unwrap_err(),
    HashError::InvalidConfiguration(ConfigError::OutputBitsNotByteAligned { bits: 12 })
  );
  assert_eq!(
    XofHasher::<Shake256>::with_output_bits(u64::MAX).unwrap_err(),
    HashError::InvalidConfiguration(ConfigError::OutputBitsNotByteAligned { bits: u64::MAX })
  );

  let h = XofHasher::<Blake3>::with_output_bits(UNBOUNDED_OUTPUT_BITS).unwrap();
  assert_eq!(h.output_bits(), UNBOUNDED_OUTPUT_BITS);
}

#[test]
fn output_length_is_fixed_once_output_begins() {
  let mut h = XofHasher::<Shake128>::with_output_bits(256).unwrap();
  h.set_output_bits(512).unwrap();
  assert_eq!(h.output_bits(), 512);

  let mut out = [0u8; 8];
  h.output(&mut out).unwrap();
  assert_eq!(
    h.set_output_bits(1024),
    Err(HashError::InvalidConfiguration(ConfigError::OutputInProgress))
  );
  assert_eq!(h.output_bits(), 512);
}

#[test]
fn finalize_into_reset_reinitializes_and_keeps_length() {
  let mut h = XofHasher::<Shake256>::with_output_bits(8 * 48).unwrap();
  h.update(b"first message").unwrap();
  let mut out = [0u8; 48];
  h.finalize_into_reset(&mut out).unwrap();
  assert_eq!(out.to_vec(), full_stream::<Shake256>(b"first message", 48));
  assert!(!h.is_finalized());
  assert_eq!(h.output_bits(), 8 * 48);

  h.update(b"second").unwrap();
  let mut too_long = [0u8; 49];
  assert!(matches!(
    h.finalize_into_reset(&mut too_long),
    Err(HashError::OutputLengthExceeded { requested: 49, limit: 48, .. })
  ));

  h.finalize_into_reset(&mut out).unwrap();
  assert_eq!(out.to_vec(), full_stream::<Shake256>(b"second", 48));
}

#[test]
fn output_vec_reads_the_next_bytes() {
  let mut h = XofHasher::<Blake3>::with_output_bits(8 * 40).unwrap();
  h.update(b"vec").unwrap();
  let head = h.output_vec(10).unwrap();
  let tail = h.output_vec(30).unwrap();
  assert!(h.output_vec(1).is_err());

  let expected = full_stream::<Blake3>(b"vec", 40);
  assert_eq!(head, expected[..10]);
  assert_eq!(tail, expected[10..]);
}

#[test]
fn long_reads_cross_many_sub_blocks() {
  // SHAKE128 rate is 168 bytes and BLAKE3 blocks are 64 bytes.
  for len in [167usize, 168, 169, 10 * 168 + 7, 64 * 33 + 1] {
    let shake = split_stream::<Shake128>(b"long", len, &[1, 167, 168, 500]);
    assert_eq!(shake, full_stream::<Shake128>(b"long", len), "shake len={len}");
    let b3 = split_stream::<Blake3>(b"long", len, &[1, 63, 64, 65]);
    assert_eq!(b3, full_stream::<Blake3>(b"long", len), "blake3 len={len}");
  }
}
