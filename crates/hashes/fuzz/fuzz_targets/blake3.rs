#![no_main]

use hashes::{Digest as _, Xof as _, crypto::Blake3};
use libfuzzer_sys::fuzz_target;

fn read_u16_le(input: &[u8]) -> u16 {
  match input {
    [] => 0,
    [lo] => *lo as u16,
    [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
  }
}

fuzz_target!(|data: &[u8]| {
  assert_eq!(Blake3::digest(data), *blake3::hash(data).as_bytes());

  let mut key = [0u8; 32];
  let key_src = data.get(..32).unwrap_or(data);
  key[..key_src.len()].copy_from_slice(key_src);
  assert_eq!(Blake3::keyed_digest(&key, data), *blake3::keyed_hash(&key, data).as_bytes());

  // Two-part absorb and two-part read against the reference reader.
  let out_len = read_u16_le(data) as usize % 2049;
  let split_out = data.get(2).copied().unwrap_or(0) as usize % (out_len + 1);
  let split_in = data.get(3).copied().unwrap_or(0) as usize % (data.len() + 1);

  let mut h = Blake3::new();
  h.update(&data[..split_in]);
  h.update(&data[split_in..]);
  let mut reader = h.finalize_xof();
  let mut ours = vec![0u8; out_len];
  reader.squeeze(&mut ours[..split_out]).unwrap();
  reader.squeeze(&mut ours[split_out..]).unwrap();

  let mut expected = vec![0u8; out_len];
  let mut reference = blake3::Hasher::new();
  reference.update(data);
  reference.finalize_xof().fill(&mut expected);
  assert_eq!(ours, expected);
});
