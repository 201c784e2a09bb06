//! Encoded block representation and seed expansion.
//!
//! An encoded block travels as `(seed, degree, payload)`; the neighbor set
//! is never transmitted. Encoder and decoder expand the seed identically:
//! a block-local [`Prng`] yields one unit draw for the degree, then the
//! neighbor indices by rejection sampling. The draw order is normative,
//! any deviation makes the two sides disagree silently.

use crate::prng::Prng;
use crate::soliton::RobustSoliton;

/// One encoded block.
///
/// The elementwise XOR of `degree` distinct source blocks, identified by
/// `indices`. Only `seed`, `degree` and `payload` need to reach the
/// decoder; `indices` is regenerated from `seed` on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlock {
    /// Seed that determines degree and neighbor selection.
    pub seed: u64,
    /// Number of source blocks XOR-combined into the payload.
    pub degree: u32,
    /// The combined source indices, in draw order.
    ///
    /// Derived from `seed`; carried so callers can inspect or debug the
    /// selection, and safe to drop before transport.
    pub indices: Vec<u32>,
    /// Elementwise XOR of the selected source blocks.
    pub payload: Vec<i32>,
}

/// Expand a block seed into its degree and neighbor indices.
///
/// The degree comes from the block-local PRNG's first [`Prng::gen_unit`]
/// draw; the indices follow from repeated `gen_range(0, k)` draws with
/// duplicates rejected, kept in insertion order.
pub(crate) fn expand_seed(seed: u64, dist: &RobustSoliton) -> (u32, Vec<u32>) {
    let mut rng = Prng::new(seed);
    let degree = dist.sample(&mut rng);
    let indices = sample_indices(&mut rng, degree, dist.k());
    (degree, indices)
}

/// Draw `degree` distinct indices in `[0, k)` by rejection sampling.
fn sample_indices(rng: &mut Prng, degree: u32, k: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(degree as usize);
    while indices.len() < degree as usize {
        let candidate = rng.gen_range(0, u64::from(k)) as u32;
        if !indices.contains(&candidate) {
            indices.push(candidate);
        }
    }
    indices
}

/// XOR `src` into `dest` elementwise.
#[inline]
pub(crate) fn xor_into(dest: &mut [i32], src: &[i32]) {
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}
