//! Luby Transform fountain codes.
//!
//! A rateless erasure code: an [`Encoder`] turns `k` equal-length source
//! blocks into an unbounded stream of encoded blocks, and a [`Decoder`]
//! recovers all originals from any sufficient subset (slightly more than
//! `k` blocks, with high probability). Useful wherever loss is unknown and
//! feedback is unavailable: one-to-many broadcast, QR-stream transfer,
//! store-and-forward delivery over lossy links.
//!
//! Encoded blocks travel as `(seed, degree, payload)`. The set of source
//! indices combined into a block is never transmitted: the decoder
//! regenerates it from the seed with the same deterministic PRNG and
//! Robust Soliton degree distribution the encoder used. The PRNG contract
//! is therefore frozen; see [`prng`] for the normative algorithm.
//!
//! # Constraints
//!
//! This library intentionally does NOT:
//! - Access the network or perform file I/O
//! - Frame or checksum blocks (callers authenticate and transport them)
//! - Emit source blocks uncoded (no systematic variant)
//! - Chunk files into blocks or reassemble them
//! - Hold any global state
//!
//! # Example
//!
//! ```
//! use lt_fountain::{Decoder, Encoder};
//!
//! let sources = vec![vec![1, 0], vec![0, 2], vec![4, 0], vec![0, 8]];
//! let mut encoder = Encoder::new(sources.clone(), Some(7)).unwrap();
//! let mut decoder = Decoder::new(4, 2).unwrap();
//!
//! while !decoder.is_complete() {
//!     let block = encoder.next_block();
//!     decoder
//!         .add_encoded_block(block.seed, block.degree, block.payload)
//!         .unwrap();
//! }
//!
//! assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod prng;
pub mod soliton;

pub use block::EncodedBlock;
pub use decoder::Decoder;
pub use encoder::{encode_file_blocks, Encoder};
pub use error::{Error, Result};
pub use prng::Prng;
pub use soliton::{RobustSoliton, DEFAULT_C, DEFAULT_DELTA};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut Decoder, block: &EncodedBlock) -> u32 {
        decoder
            .add_encoded_block(block.seed, block.degree, block.payload.clone())
            .unwrap()
    }

    #[test]
    fn small_fixed_sources_round_trip() {
        let sources = vec![vec![1, 0], vec![0, 2], vec![4, 0], vec![0, 8]];
        let mut encoder = Encoder::new(sources.clone(), Some(2024)).unwrap();
        let mut decoder = Decoder::new(4, 2).unwrap();

        let mut used = 0;
        while !decoder.is_complete() {
            feed(&mut decoder, &encoder.next_block());
            used += 1;
            assert!(used < 500, "stream failed to complete");
        }

        assert_eq!(decoder.decoded_count(), 4);
        assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
    }

    #[test]
    fn large_stream_completes_within_twice_k() {
        let k = 512u32;
        let sources: Vec<Vec<i32>> = (0..k).map(|_| vec![1, 2, 3]).collect();
        let mut encoder = Encoder::new(sources.clone(), Some(10)).unwrap();
        let mut decoder = Decoder::new(k, 3).unwrap();

        let mut used = 0;
        while !decoder.is_complete() {
            feed(&mut decoder, &encoder.next_block());
            used += 1;
            assert!(used <= 2 * k, "needed more than {} blocks", 2 * k);
        }

        assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
    }

    #[test]
    fn single_block_transfer() {
        let sources = vec![vec![7, 7, 7, 7]];
        let mut encoder = Encoder::new(sources.clone(), Some(1)).unwrap();
        let mut decoder = Decoder::new(1, 4).unwrap();

        feed(&mut decoder, &encoder.next_block());
        assert!(decoder.is_complete());
        assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
    }

    #[test]
    fn encoders_with_equal_seeds_agree() {
        let sources: Vec<Vec<i32>> = (0..20).map(|i| vec![i, -i, i * i]).collect();
        let mut a = Encoder::new(sources.clone(), Some(404)).unwrap();
        let mut b = Encoder::new(sources, Some(404)).unwrap();

        for _ in 0..100 {
            assert_eq!(a.next_block(), b.next_block());
        }
    }

    #[test]
    fn independent_decoders_trace_identically() {
        let sources: Vec<Vec<i32>> = (0..16).map(|i| vec![i * 2 + 1, i - 40]).collect();
        let mut encoder = Encoder::new(sources, Some(33)).unwrap();
        let mut left = Decoder::new(16, 2).unwrap();
        let mut right = Decoder::new(16, 2).unwrap();

        let mut used = 0;
        while !left.is_complete() {
            let block = encoder.next_block();
            assert_eq!(feed(&mut left, &block), feed(&mut right, &block));
            assert_eq!(left.current_round(), right.current_round());
            used += 1;
            assert!(used < 500, "stream failed to complete");
        }

        assert!(right.is_complete());
        assert_eq!(
            left.get_all_decoded_blocks().unwrap(),
            right.get_all_decoded_blocks().unwrap()
        );
    }

    #[test]
    fn shuffled_delivery_still_decodes() {
        let k = 16usize;
        let sources: Vec<Vec<i32>> = (0..k as i32).map(|i| vec![i * 13, i ^ 21, -i]).collect();
        let blocks = encode_file_blocks(sources.clone(), Some(55), 4 * k).unwrap();

        // Deterministic shuffle so delivery order differs from emission order.
        let mut shuffled = blocks;
        let mut s = 12345u64;
        for i in (1..shuffled.len()).rev() {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            shuffled.swap(i, s as usize % (i + 1));
        }

        let mut decoder = Decoder::new(k as u32, 3).unwrap();
        for block in &shuffled {
            feed(&mut decoder, block);
            if decoder.is_complete() {
                break;
            }
        }

        assert!(decoder.is_complete());
        assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
    }

    #[test]
    fn bulk_helper_stream_decodes() {
        let sources: Vec<Vec<i32>> = (0..8).map(|i| vec![i; 5]).collect();
        let blocks = encode_file_blocks(sources.clone(), Some(3), 64).unwrap();

        let mut decoder = Decoder::new(8, 5).unwrap();
        for block in &blocks {
            feed(&mut decoder, block);
            if decoder.is_complete() {
                break;
            }
        }

        assert!(decoder.is_complete());
        assert_eq!(decoder.get_all_decoded_blocks().unwrap(), sources);
    }
}
