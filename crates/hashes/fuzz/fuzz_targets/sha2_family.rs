#![no_main]

use hashes::{
  Digest,
  crypto::{Sha224, Sha256, Sha384, Sha512, Sha512_256},
};
use libfuzzer_sys::fuzz_target;

fn check<Ours: Digest, Theirs: sha2::Digest>(input: &[u8], split: usize) {
  let ours = Ours::digest(input);
  let (a, b) = input.split_at(split);
  let mut h = Ours::new();
  h.update(a);
  h.update(b);
  assert_eq!(ours, h.finalize());
  assert_eq!(ours.as_ref(), Theirs::digest(input).as_slice());
}

fuzz_target!(|input: &[u8]| {
  let split = input.first().map_or(0, |&b| b as usize % (input.len() + 1));
  check::<Sha224, sha2::Sha224>(input, split);
  check::<Sha256, sha2::Sha256>(input, split);
  check::<Sha384, sha2::Sha384>(input, split);
  check::<Sha512, sha2::Sha512>(input, split);
  check::<Sha512_256, sha2::Sha512_256>(input, split);
});
