#![no_main]

use hashes::{
  Digest,
  crypto::{Keccak256, Sha3_224, Sha3_256, Sha3_384, Sha3_512},
};
use libfuzzer_sys::fuzz_target;

fn check<Ours: Digest, Theirs: sha3::Digest>(input: &[u8], split: usize) {
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
  check::<Sha3_224, sha3::Sha3_224>(input, split);
  check::<Sha3_256, sha3::Sha3_256>(input, split);
  check::<Sha3_384, sha3::Sha3_384>(input, split);
  check::<Sha3_512, sha3::Sha3_512>(input, split);
  check::<Keccak256, sha3::Keccak256>(input, split);
});
