//! LT decoder: iterative peeling over a residual block graph.
//!
//! The decoder keeps every encoded block it cannot yet resolve as a
//! residual equation: the set of still-unknown source indices it touches
//! and its payload with all known sources already XOR-subtracted out.
//! Whenever a residual narrows to a single index, that source block is
//! recovered and substituted into every other residual that references it,
//! which may narrow further residuals in turn. The cascade (belief
//! propagation by peeling) runs to fixpoint on every add.
//!
//! Pending residuals live in an arena with stable handles; a per-source
//! adjacency list maps each index to the handles that reference it.
//! Discarded residuals are tombstoned rather than removed, and handles are
//! validated against the arena before use, so the adjacency lists never
//! need eager cleanup.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::block::{expand_seed, xor_into};
use crate::error::{Error, Result};
use crate::soliton::{RobustSoliton, DEFAULT_C, DEFAULT_DELTA};

/// A received block that still references undecoded source indices.
#[derive(Debug)]
struct Pending {
    /// Unresolved source indices, in seed draw order.
    remaining: Vec<u32>,
    /// Payload with every resolved index already XOR-subtracted.
    residual: Vec<i32>,
}

/// Fountain decoder reconstructing `k` source blocks from an encoded stream.
pub struct Decoder {
    k: u32,
    block_size: usize,
    dist: RobustSoliton,
    /// Recovered source blocks by index.
    decoded: Vec<Option<Vec<i32>>>,
    decoded_count: u32,
    /// Arena of unresolved residuals; slots are tombstoned on discard so
    /// stale adjacency handles stay safe to probe.
    pending: Vec<Option<Pending>>,
    pending_count: usize,
    /// Source index to handles of pending residuals that reference it.
    adjacency: Vec<Vec<usize>>,
    /// Residuals narrowed to one index, awaiting a peel.
    ready: VecDeque<(u32, Vec<i32>)>,
    round: u32,
    blocks_received: u64,
    corrupt_blocks: u64,
}

impl Decoder {
    /// Create a decoder for `k` source blocks of `block_size` elements,
    /// with default soliton tuning.
    pub fn new(k: u32, block_size: u32) -> Result<Self> {
        Self::with_params(k, block_size, DEFAULT_C, DEFAULT_DELTA)
    }

    /// Create a decoder with explicit Robust Soliton tuning constants.
    ///
    /// Must match the encoder's `c` and `delta`.
    pub fn with_params(k: u32, block_size: u32, c: f64, delta: f64) -> Result<Self> {
        if k == 0 {
            return Err(Error::ZeroSourceCount);
        }
        if block_size == 0 {
            return Err(Error::ZeroBlockSize);
        }

        Ok(Self {
            k,
            block_size: block_size as usize,
            dist: RobustSoliton::with_params(k, c, delta),
            decoded: vec![None; k as usize],
            decoded_count: 0,
            pending: Vec::new(),
            pending_count: 0,
            adjacency: vec![Vec::new(); k as usize],
            ready: VecDeque::new(),
            round: 0,
            blocks_received: 0,
            corrupt_blocks: 0,
        })
    }

    /// Feed one encoded block and run peeling to fixpoint.
    ///
    /// The neighbor indices are regenerated from `seed`; the transmitted
    /// `degree` is only used to validate that regeneration. Returns the
    /// updated decoded count. Blocks arriving after completion are
    /// absorbed without effect.
    pub fn add_encoded_block(&mut self, seed: u64, degree: u32, mut payload: Vec<i32>) -> Result<u32> {
        if payload.len() != self.block_size {
            return Err(Error::PayloadLengthMismatch {
                len: payload.len(),
                expected: self.block_size,
            });
        }
        if degree == 0 || degree > self.k {
            return Err(Error::DegreeOutOfRange { degree, k: self.k });
        }

        let (derived, indices) = expand_seed(seed, &self.dist);
        if derived != degree {
            return Err(Error::SeedMismatch {
                seed,
                claimed: degree,
                derived,
            });
        }

        self.blocks_received += 1;

        // Substitute every already-recovered source out of the payload.
        let mut remaining = Vec::with_capacity(indices.len());
        for i in indices {
            match &self.decoded[i as usize] {
                Some(block) => xor_into(&mut payload, block),
                None => remaining.push(i),
            }
        }

        match remaining.len() {
            0 => {
                // Nothing new in this block. Also the path every block
                // takes once decoding is complete.
                debug!(seed, degree, "encoded block fully absorbed, dropped");
            }
            1 => self.ready.push_back((remaining[0], payload)),
            _ => self.install_pending(remaining, payload),
        }

        self.peel();
        Ok(self.decoded_count)
    }

    /// Record a residual that still spans several unknown indices.
    fn install_pending(&mut self, remaining: Vec<u32>, residual: Vec<i32>) {
        let handle = self.pending.len();
        for &i in &remaining {
            self.adjacency[i as usize].push(handle);
        }
        self.pending.push(Some(Pending { remaining, residual }));
        self.pending_count += 1;
    }

    /// Peel single-index residuals until none are left.
    fn peel(&mut self) {
        while let Some((index, value)) = self.ready.pop_front() {
            self.round += 1;
            if self.decoded[index as usize].is_some() {
                continue;
            }

            let handles = std::mem::take(&mut self.adjacency[index as usize]);
            for handle in handles {
                let remaining_len = match self.pending[handle].as_mut() {
                    Some(p) => {
                        xor_into(&mut p.residual, &value);
                        p.remaining.retain(|&r| r != index);
                        p.remaining.len()
                    }
                    // Tombstoned earlier in this cascade.
                    None => continue,
                };

                match remaining_len {
                    0 => {
                        if let Some(p) = self.pending[handle].take() {
                            self.pending_count -= 1;
                            // A residual that references nothing must be all
                            // zero; anything else means a corrupt block got in.
                            if p.residual.iter().any(|&v| v != 0) {
                                self.corrupt_blocks += 1;
                                warn!(handle, "non-zero residual on exhausted block, input corrupt");
                            }
                        }
                    }
                    1 => {
                        if let Some(p) = self.pending[handle].take() {
                            self.pending_count -= 1;
                            self.ready.push_back((p.remaining[0], p.residual));
                        }
                    }
                    _ => {}
                }
            }

            self.decoded[index as usize] = Some(value);
            self.decoded_count += 1;
        }
    }

    /// Number of recovered source blocks.
    pub fn decoded_count(&self) -> u32 {
        self.decoded_count
    }

    /// Whether every source block has been recovered.
    pub fn is_complete(&self) -> bool {
        self.decoded_count == self.k
    }

    /// Number of peeling rounds performed so far.
    pub fn current_round(&self) -> u32 {
        self.round
    }

    /// Decoding progress from 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        f64::from(self.decoded_count) / f64::from(self.k)
    }

    /// Number of encoded blocks accepted so far (rejected blocks excluded).
    pub fn blocks_received(&self) -> u64 {
        self.blocks_received
    }

    /// Number of residuals still spanning several unknown indices.
    pub fn pending_count(&self) -> usize {
        self.pending_count
    }

    /// Number of corrupt blocks detected and discarded during peeling.
    ///
    /// Corruption is never fatal; this counter and a log line are the only
    /// signal.
    pub fn corrupt_block_count(&self) -> u64 {
        self.corrupt_blocks
    }

    /// All recovered source blocks in index order, once complete.
    ///
    /// Returns `None` while any block is still missing.
    pub fn get_all_decoded_blocks(&self) -> Option<Vec<Vec<i32>>> {
        if !self.is_complete() {
            return None;
        }

        let mut blocks = Vec::with_capacity(self.k as usize);
        for block in &self.decoded {
            blocks.push(block.as_ref()?.clone());
        }
        Some(blocks)
    }
}
