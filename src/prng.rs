//! Deterministic PRNG shared by encoder and decoder.
//!
//! The generator is the contract that lets a decoder rebuild an encoded
//! block's neighbor set from its seed alone: both sides must produce the
//! same draw sequence bit for bit, without ever communicating it. The
//! algorithm is therefore fixed and normative:
//!
//! - Seeding runs the 64-bit seed through a SplitMix64-style finalizer
//!   (add `0x9E3779B97F4A7C15`, then xor-shift by 30/27/31 with multipliers
//!   `0xBF58476D1CE4E5B9` and `0x94D049BB133111EB`).
//! - The stream is Xorshift64*: shifts 12/25/27, output multiplied by
//!   `0x2545F4914F6CDD1D`.
//! - [`Prng::gen_range`] reduces by modulo; [`Prng::gen_unit`] takes the
//!   top 53 bits of a draw.
//!
//! Changing any of these silently breaks decoding of previously emitted
//! blocks. Implementations in other languages must reproduce the same
//! sequence to interoperate.
//!
//! [`rand_core::RngCore`] and [`rand_core::SeedableRng`] are implemented
//! for compatibility with the Rust random ecosystem; they delegate to the
//! same stream.

use crate::error::{Error, Result};

/// Additive constant of the seed finalizer (the SplitMix64 golden gamma).
const GOLDEN_GAMMA: u64 = 0x9E3779B97F4A7C15;

/// Deterministic seedable random number generator.
///
/// Pure and self-contained: the only state is one 64-bit word, and the
/// output sequence is a function of the seed alone.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    /// Create a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        let mut state = seed.wrapping_add(GOLDEN_GAMMA);
        state ^= state >> 30;
        state = state.wrapping_mul(0xBF58476D1CE4E5B9);
        state ^= state >> 27;
        state = state.wrapping_mul(0x94D049BB133111EB);
        state ^= state >> 31;
        if state == 0 {
            // Zero is the xorshift fixed point; remap the one dead seed.
            state = GOLDEN_GAMMA;
        }
        Self { state }
    }

    /// Create a generator seeded from the operating system entropy source.
    pub fn from_entropy() -> Result<Self> {
        let mut seed = [0u8; 8];
        getrandom::getrandom(&mut seed).map_err(|_| Error::EntropySource)?;
        Ok(Self::new(u64::from_le_bytes(seed)))
    }

    /// Next 64-bit value of the stream.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform value in `[lo, hi)`.
    ///
    /// Reduction is by modulo. The bias is negligible for the block counts
    /// the codec draws over, and the reduction is part of the frozen
    /// contract.
    pub fn gen_range(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo < hi, "gen_range requires lo < hi");
        lo + self.next_u64() % (hi - lo)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn gen_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl rand_core::RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        (Prng::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Prng::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&Prng::next_u64(self).to_le_bytes());
        }
        let rest = chunks.into_remainder();
        if !rest.is_empty() {
            let last = Prng::next_u64(self).to_le_bytes();
            rest.copy_from_slice(&last[..rest.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand_core::SeedableRng for Prng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
