#![no_main]

//! Arbitrary write schedules must not change any digest.

use hashes::{
  Digest,
  crypto::{Blake2b512, Blake2s256, Blake3, Md5, Sha1, Sha256, Sha3_256, Sha512},
};
use libfuzzer_sys::fuzz_target;

fn check<D: Digest>(schedule: &[u8], data: &[u8]) {
  let mut h = D::new();
  let mut rest = data;
  for &step in schedule {
    let at = core::cmp::min(step as usize, rest.len());
    let (head, tail) = rest.split_at(at);
    h.update(head);
    rest = tail;
  }
  h.update(rest);

  let expected = D::digest(data);
  assert_eq!(h.finalize(), expected);
  assert_eq!(h.finalize_reset(), expected);
  assert_eq!(h.finalize(), D::digest(&[]));
}

fuzz_target!(|input: &[u8]| {
  // Layout: 1 byte schedule length, schedule bytes, rest data.
  let sched_len = input.first().copied().unwrap_or(0) as usize;
  let body = input.get(1..).unwrap_or(&[]);
  let (schedule, data) = body.split_at(core::cmp::min(sched_len, body.len()));

  check::<Md5>(schedule, data);
  check::<Sha1>(schedule, data);
  check::<Sha256>(schedule, data);
  check::<Sha512>(schedule, data);
  check::<Sha3_256>(schedule, data);
  check::<Blake2b512>(schedule, data);
  check::<Blake2s256>(schedule, data);
  check::<Blake3>(schedule, data);
});
