#![no_main]

use hashes::{
  Digest as _, ExtendableOutput, Xof as _,
  crypto::{Shake128, Shake256},
};
use libfuzzer_sys::fuzz_target;

fn reference<D>(data: &[u8], out_len: usize) -> Vec<u8>
where
  D: Default + sha3::digest::Update + sha3::digest::ExtendableOutput,
{
  use sha3::digest::XofReader as _;
  let mut h = D::default();
  h.update(data);
  let mut out = vec![0u8; out_len];
  h.finalize_xof().read(&mut out);
  out
}

fn squeeze_split<H: ExtendableOutput>(data: &[u8], split_in: usize, out_len: usize, split_out: usize) -> Vec<u8> {
  let mut h = H::new();
  h.update(&data[..split_in]);
  h.update(&data[split_in..]);
  let mut reader = h.finalize_xof();
  let mut out = vec![0u8; out_len];
  reader.squeeze(&mut out[..split_out]).unwrap();
  reader.squeeze(&mut out[split_out..]).unwrap();
  out
}

fuzz_target!(|input: &[u8]| {
  // Layout: 2 bytes out_len, 1 byte output split, 1 byte input split, rest data.
  let out_len = match input {
    [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]) as usize % 2049,
    _ => 0,
  };
  let split_out = input.get(2).copied().unwrap_or(0) as usize % (out_len + 1);
  let data = input.get(4..).unwrap_or(&[]);
  let split_in = input.get(3).copied().unwrap_or(0) as usize % (data.len() + 1);

  assert_eq!(
    squeeze_split::<Shake128>(data, split_in, out_len, split_out),
    reference::<sha3::Shake128>(data, out_len)
  );
  assert_eq!(
    squeeze_split::<Shake256>(data, split_in, out_len, split_out),
    reference::<sha3::Shake256>(data, out_len)
  );
});
