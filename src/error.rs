//! Error types for lt-fountain.
//!
//! Invalid arguments are reported at the failing call. A [`Error::SeedMismatch`]
//! from the decoder is non-fatal: the offending block is rejected without
//! touching decoder state, so streaming callers can keep feeding blocks.
//!
//! # Error Categories
//!
//! - **Construction errors**: `EmptySource`, `ZeroBlockSize`, `ZeroSourceCount`, `UnequalBlockLength`
//! - **Block errors**: `PayloadLengthMismatch`, `DegreeOutOfRange`, `SeedMismatch`
//! - **Environment errors**: `EntropySource`

/// Result type alias for lt-fountain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during encoding or decoding.
///
/// Each variant includes relevant context for debugging and error messages
/// are designed to be clear when displayed to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Construction Errors ====================
    /// Encoder was given no source blocks.
    #[error("source block set is empty")]
    EmptySource,

    /// Blocks must contain at least one element.
    ///
    /// Raised for zero-length source blocks and for `block_size == 0`.
    #[error("block size must be at least 1")]
    ZeroBlockSize,

    /// Decoder needs at least one source block.
    #[error("source block count must be at least 1")]
    ZeroSourceCount,

    /// Source blocks do not all share one length.
    #[error("source block {index} has {len} elements, expected {expected}")]
    UnequalBlockLength {
        /// Index of the offending block.
        index: usize,
        /// Its actual length.
        len: usize,
        /// Length of the first block.
        expected: usize,
    },

    // ==================== Block Errors ====================
    /// Encoded payload length does not match the decoder's block size.
    #[error("payload has {len} elements, expected {expected}")]
    PayloadLengthMismatch {
        /// Actual payload length.
        len: usize,
        /// The decoder's fixed block size.
        expected: usize,
    },

    /// Transmitted degree lies outside `[1, k]`.
    #[error("degree {degree} out of range for {k} source blocks")]
    DegreeOutOfRange {
        /// The invalid degree.
        degree: u32,
        /// Number of source blocks.
        k: u32,
    },

    /// Transmitted degree disagrees with the degree regenerated from the seed.
    ///
    /// The block was rejected without touching decoder state.
    #[error("seed {seed:#018x} derives degree {derived}, block claims {claimed}")]
    SeedMismatch {
        /// Seed carried by the rejected block.
        seed: u64,
        /// Degree the block claimed.
        claimed: u32,
        /// Degree the seed actually derives.
        derived: u32,
    },

    // ==================== Environment Errors ====================
    /// The operating system entropy source failed.
    #[error("OS entropy source unavailable")]
    EntropySource,
}
