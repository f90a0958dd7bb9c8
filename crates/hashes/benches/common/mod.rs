use core::hint::black_box;

use criterion::{BenchmarkGroup, Throughput, measurement::WallTime};

/// Splitmix64 step; inputs only need to look unstructured, not be secure.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
  *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
  let mut z = *state;
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}

pub fn input_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut state = seed ^ len as u64;
  let mut out = Vec::with_capacity(len + 8);
  while out.len() < len {
    out.extend_from_slice(&splitmix64(&mut state).to_le_bytes());
  }
  out.truncate(len);
  black_box(&out);
  out
}

/// Payloads at block and chunk edges plus a few bulk sizes.
pub fn payloads() -> Vec<(usize, Vec<u8>)> {
  [0usize, 1, 55, 64, 127, 128, 136, 168, 1024, 1025, 8 * 1024, 64 * 1024, 1024 * 1024]
    .into_iter()
    .map(|len| (len, input_bytes(len, 0x5EED_CAFE_F00D_0001)))
    .collect()
}

/// Write sizes for the streaming benchmarks, smallest first.
pub const STREAM_WRITES: [usize; 4] = [1, 13, 64, 4096];

pub fn set_throughput(group: &mut BenchmarkGroup<'_, WallTime>, len: usize) {
  group.throughput(if len == 0 {
    Throughput::Elements(1)
  } else {
    Throughput::Bytes(len as u64)
  });
}
