//! LT encoder: turns `k` source blocks into an unbounded encoded stream.
//!
//! Each encoded block is a pure function of a 64-bit seed: the seed drives
//! a block-local PRNG that picks a degree from the Robust Soliton
//! distribution and then that many distinct source indices, and the
//! payload is their elementwise XOR. Seeds come from a master PRNG, so a
//! single `u64` master seed reproduces an entire stream.
//!
//! # Example
//!
//! ```
//! use lt_fountain::Encoder;
//!
//! let sources = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
//! let mut encoder = Encoder::new(sources, Some(42)).unwrap();
//!
//! let block = encoder.next_block();
//! assert_eq!(block.payload.len(), 2);
//! assert!((1..=3).contains(&block.degree));
//!
//! // The same seed always regenerates the same block.
//! let again = encoder.generate_block(Some(block.seed));
//! assert_eq!(again, block);
//! ```

use crate::block::{expand_seed, xor_into, EncodedBlock};
use crate::error::{Error, Result};
use crate::prng::Prng;
use crate::soliton::{RobustSoliton, DEFAULT_C, DEFAULT_DELTA};

/// Fountain encoder owning the source blocks.
pub struct Encoder {
    source: Vec<Vec<i32>>,
    block_size: usize,
    master: Prng,
    dist: RobustSoliton,
}

impl Encoder {
    /// Create an encoder over `source_blocks` with default soliton tuning.
    ///
    /// All blocks must be non-empty and share one length. With
    /// `Some(master_seed)` the emitted stream is fully reproducible;
    /// with `None` the master PRNG is seeded from OS entropy.
    pub fn new(source_blocks: Vec<Vec<i32>>, master_seed: Option<u64>) -> Result<Self> {
        Self::with_params(source_blocks, master_seed, DEFAULT_C, DEFAULT_DELTA)
    }

    /// Create an encoder with explicit Robust Soliton tuning constants.
    ///
    /// The decoder must be built with the same `c` and `delta`.
    pub fn with_params(
        source_blocks: Vec<Vec<i32>>,
        master_seed: Option<u64>,
        c: f64,
        delta: f64,
    ) -> Result<Self> {
        if source_blocks.is_empty() {
            return Err(Error::EmptySource);
        }
        let block_size = source_blocks[0].len();
        if block_size == 0 {
            return Err(Error::ZeroBlockSize);
        }
        for (index, block) in source_blocks.iter().enumerate() {
            if block.len() != block_size {
                return Err(Error::UnequalBlockLength {
                    index,
                    len: block.len(),
                    expected: block_size,
                });
            }
        }

        let master = match master_seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_entropy()?,
        };
        let k = source_blocks.len() as u32;

        Ok(Self {
            source: source_blocks,
            block_size,
            master,
            dist: RobustSoliton::with_params(k, c, delta),
        })
    }

    /// Generate one encoded block.
    ///
    /// With `Some(seed)` the result is a pure function of the seed and the
    /// source blocks. With `None` a fresh seed is drawn from the master
    /// PRNG and recorded on the emitted block.
    pub fn generate_block(&mut self, block_seed: Option<u64>) -> EncodedBlock {
        let seed = block_seed.unwrap_or_else(|| self.master.next_u64());
        let (degree, indices) = expand_seed(seed, &self.dist);

        let mut payload = vec![0i32; self.block_size];
        for &i in &indices {
            xor_into(&mut payload, &self.source[i as usize]);
        }

        EncodedBlock {
            seed,
            degree,
            indices,
            payload,
        }
    }

    /// Generate the next block from the master seed stream.
    pub fn next_block(&mut self) -> EncodedBlock {
        self.generate_block(None)
    }

    /// Number of source blocks (`k`).
    pub fn source_block_count(&self) -> u32 {
        self.source.len() as u32
    }

    /// Elements per block.
    pub fn block_size(&self) -> u32 {
        self.block_size as u32
    }
}

/// Encode `n` blocks from `blocks` in one call.
///
/// Convenience wrapper: builds an [`Encoder`] with the optional master
/// seed and drains `n` blocks from it.
pub fn encode_file_blocks(
    blocks: Vec<Vec<i32>>,
    seed: Option<u64>,
    n: usize,
) -> Result<Vec<EncodedBlock>> {
    let mut encoder = Encoder::new(blocks, seed)?;
    Ok((0..n).map(|_| encoder.next_block()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sources() -> Vec<Vec<i32>> {
        vec![vec![1, 0], vec![0, 2], vec![4, 0], vec![0, 8]]
    }

    #[test]
    fn rejects_empty_source_set() {
        let result = Encoder::new(Vec::new(), Some(1));
        assert!(matches!(result, Err(Error::EmptySource)));
    }

    #[test]
    fn rejects_zero_length_blocks() {
        let result = Encoder::new(vec![Vec::new(), Vec::new()], Some(1));
        assert!(matches!(result, Err(Error::ZeroBlockSize)));
    }

    #[test]
    fn rejects_unequal_block_lengths() {
        let result = Encoder::new(vec![vec![1, 2], vec![3]], Some(1));
        assert!(matches!(
            result,
            Err(Error::UnequalBlockLength {
                index: 1,
                len: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn payload_equals_xor_of_selected_sources() {
        let sources = sample_sources();
        let mut encoder = Encoder::new(sources.clone(), Some(3)).unwrap();

        for _ in 0..100 {
            let block = encoder.next_block();
            assert_eq!(block.indices.len(), block.degree as usize);

            let mut expected = vec![0i32; 2];
            for &i in &block.indices {
                for (e, s) in expected.iter_mut().zip(&sources[i as usize]) {
                    *e ^= s;
                }
            }
            assert_eq!(block.payload, expected);
        }
    }

    #[test]
    fn identical_master_seeds_emit_identical_streams() {
        let mut a = Encoder::new(sample_sources(), Some(10)).unwrap();
        let mut b = Encoder::new(sample_sources(), Some(10)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_block(), b.next_block());
        }
    }

    #[test]
    fn explicit_seed_reproduces_across_encoders() {
        let mut a = Encoder::new(sample_sources(), Some(1)).unwrap();
        let mut b = Encoder::new(sample_sources(), Some(2)).unwrap();
        for seed in [0u64, 1, 99, u64::MAX] {
            assert_eq!(a.generate_block(Some(seed)), b.generate_block(Some(seed)));
        }
    }

    #[test]
    fn explicit_seed_does_not_advance_master_stream() {
        let mut a = Encoder::new(sample_sources(), Some(10)).unwrap();
        let mut b = Encoder::new(sample_sources(), Some(10)).unwrap();

        let _ = a.generate_block(Some(7));
        assert_eq!(a.next_block(), b.next_block());
    }

    #[test]
    fn single_source_always_degree_one() {
        let mut encoder = Encoder::new(vec![vec![7, 7, 7, 7]], Some(5)).unwrap();
        for _ in 0..20 {
            let block = encoder.next_block();
            assert_eq!(block.degree, 1);
            assert_eq!(block.indices, vec![0]);
            assert_eq!(block.payload, vec![7, 7, 7, 7]);
        }
    }

    #[test]
    fn entropy_seeded_encoder_works() {
        let mut encoder = Encoder::new(sample_sources(), None).unwrap();
        let block = encoder.next_block();
        assert_eq!(block.payload.len(), 2);
    }

    #[test]
    fn accessors_report_dimensions() {
        let encoder = Encoder::new(sample_sources(), Some(1)).unwrap();
        assert_eq!(encoder.source_block_count(), 4);
        assert_eq!(encoder.block_size(), 2);
    }

    #[test]
    fn bulk_helper_matches_encoder_stream() {
        let blocks = encode_file_blocks(sample_sources(), Some(10), 25).unwrap();
        assert_eq!(blocks.len(), 25);

        let mut encoder = Encoder::new(sample_sources(), Some(10)).unwrap();
        for block in &blocks {
            assert_eq!(*block, encoder.next_block());
        }
    }
}
