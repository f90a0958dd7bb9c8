use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hashes::{
  Digest, ExtendableOutput, Xof,
  crypto::{
    Blake2b512, Blake2s256, Blake3, Keccak256, Md5, Sha1, Sha3_256, Sha3_512, Sha256, Sha512, Shake128, Shake256,
  },
};

mod common;

fn one_shot_for<D: Digest>(c: &mut Criterion, name: &str) {
  let mut group = c.benchmark_group(format!("hashes/one_shot/{name}"));
  for (len, data) in &common::payloads() {
    common::set_throughput(&mut group, *len);
    group.bench_with_input(BenchmarkId::from_parameter(len), data, |b, d| {
      b.iter(|| black_box(D::digest(black_box(d))))
    });
  }
  group.finish();
}

fn streaming_for<D: Digest>(c: &mut Criterion, name: &str) {
  let data = common::input_bytes(64 * 1024, 0x0DDB_A11C_AB1E_0002);
  let mut group = c.benchmark_group(format!("hashes/streaming/{name}"));
  common::set_throughput(&mut group, data.len());
  for write in common::STREAM_WRITES {
    group.bench_with_input(BenchmarkId::new("write", write), &data, |b, d| {
      b.iter(|| {
        let mut h = D::new();
        for piece in d.chunks(write) {
          h.update(black_box(piece));
        }
        black_box(h.finalize())
      })
    });
  }
  group.finish();
}

fn xof_for<H: ExtendableOutput>(c: &mut Criterion, name: &str) {
  let mut group = c.benchmark_group(format!("hashes/xof/{name}"));
  for out_len in [32usize, 200, 4096, 64 * 1024] {
    common::set_throughput(&mut group, out_len);
    let mut out = vec![0u8; out_len];
    group.bench_function(BenchmarkId::from_parameter(out_len), |b| {
      b.iter(|| {
        let mut h = H::new();
        h.update(black_box(b"xof bench input"));
        let mut reader = h.finalize_xof();
        // Within the u64 position bound, so the read cannot fail.
        let _ = reader.squeeze(&mut out);
        black_box(&out);
      })
    });
  }
  group.finish();
}

fn one_shot(c: &mut Criterion) {
  one_shot_for::<Md5>(c, "md5");
  one_shot_for::<Sha1>(c, "sha1");
  one_shot_for::<Sha256>(c, "sha256");
  one_shot_for::<Sha512>(c, "sha512");
  one_shot_for::<Sha3_256>(c, "sha3_256");
  one_shot_for::<Sha3_512>(c, "sha3_512");
  one_shot_for::<Keccak256>(c, "keccak256");
  one_shot_for::<Blake2b512>(c, "blake2b512");
  one_shot_for::<Blake2s256>(c, "blake2s256");
  one_shot_for::<Blake3>(c, "blake3");
}

fn streaming(c: &mut Criterion) {
  streaming_for::<Sha256>(c, "sha256");
  streaming_for::<Sha3_256>(c, "sha3_256");
  streaming_for::<Blake2b512>(c, "blake2b512");
  streaming_for::<Blake3>(c, "blake3");
}

fn xof(c: &mut Criterion) {
  xof_for::<Shake128>(c, "shake128");
  xof_for::<Shake256>(c, "shake256");
  xof_for::<Blake3>(c, "blake3");
}

fn reference(c: &mut Criterion) {
  let mut group = c.benchmark_group("hashes/reference");
  for (len, data) in &common::payloads() {
    common::set_throughput(&mut group, *len);
    group.bench_with_input(BenchmarkId::new("sha256/sha2", len), data, |b, d| {
      b.iter(|| {
        use sha2::Digest as _;
        black_box(sha2::Sha256::digest(black_box(d)))
      })
    });
    group.bench_with_input(BenchmarkId::new("sha3_256/sha3", len), data, |b, d| {
      b.iter(|| {
        use sha3::Digest as _;
        black_box(sha3::Sha3_256::digest(black_box(d)))
      })
    });
    group.bench_with_input(BenchmarkId::new("blake3/blake3", len), data, |b, d| {
      b.iter(|| black_box(blake3::hash(black_box(d))))
    });
  }
  group.finish();
}

criterion_group!(benches, one_shot, streaming, xof, reference);
criterion_main!(benches);
