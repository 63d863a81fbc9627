//! # Blocks — Odd-Only Packed Bit Store
//!
//! Owned bit array backing every sieve pass. Even numbers are never stored:
//! each `u64` word ("block") covers the 64 odd integers of one 128-wide span.
//!
//! ## Addressing
//!
//! Block `b` covers the odd integers `[128b + 1, 128b + 127]`, and bit `i` of
//! that word represents `128b + 2i + 1`:
//!
//! - [`block_of`]`(n) = n >> 7`
//! - [`bit_of`]`(n) = (n & 127) >> 1`
//! - [`number_of`]`(b, i) = 128b + 2i + 1`
//!
//! A set bit (1) means the integer is known composite or lies outside the
//! sieve; a clear bit (0) means it is still a prime candidate. After a full
//! pass the clear bits are exactly the odd primes `<= limit`.
//!
//! All words are `u64`, so every `>>` in this crate is a logical shift. The
//! boundary mask relies on that: an arithmetic shift would smear the sign bit
//! into the candidate range.

use crate::error::{Result, SieveError};

/// Largest accepted sieve limit. Keeps `p * p` and `m + 2p` in the marking
/// loops far away from `u64` overflow.
pub const MAX_LIMIT: u64 = 1 << 62;

/// Integers covered by one block (64 odd positions).
pub const BLOCK_SPAN: u64 = 128;

/// Bits per block word.
pub const BLOCK_BITS: u32 = u64::BITS;

/// Block index holding the odd integer `n`.
#[inline]
pub fn block_of(n: u64) -> usize {
    (n >> 7) as usize
}

/// Bit position of the odd integer `n` inside its block.
#[inline]
pub fn bit_of(n: u64) -> u32 {
    ((n & 127) >> 1) as u32
}

/// Odd integer represented by bit `bit` of block `block`.
#[inline]
pub fn number_of(block: usize, bit: u32) -> u64 {
    ((block as u64) << 7) + 2 * bit as u64 + 1
}

/// Number of blocks needed for `limit`: `ceil(limit / 128)`.
pub fn block_count(limit: u64) -> Result<usize> {
    if limit > MAX_LIMIT {
        return Err(SieveError::InvalidArgument(format!(
            "limit {} exceeds maximum {}",
            limit, MAX_LIMIT
        )));
    }
    usize::try_from(limit.div_ceil(BLOCK_SPAN)).map_err(|_| {
        SieveError::InvalidArgument(format!(
            "limit {} needs more blocks than this platform can address",
            limit
        ))
    })
}

/// Packed odd-only bit array for one sieve limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStore {
    words: Vec<u64>,
    limit: u64,
}

impl BlockStore {
    /// Allocate `ceil(limit / 128)` candidate blocks with both boundaries
    /// masked: the bit for 1 and every bit above `limit` are set.
    pub fn new(limit: u64) -> Result<Self> {
        let count = block_count(limit)?;
        let mut store = BlockStore {
            words: vec![0u64; count],
            limit,
        };
        store.mask_boundaries();
        Ok(store)
    }

    fn mask_boundaries(&mut self) {
        let Some(last) = self.words.last_mut() else {
            return;
        };
        // Odd integers in [1, limit]; the tail ones occupy the low bits of the last block.
        let odd_count = (self.limit + 1) / 2;
        let tail = (odd_count % BLOCK_BITS as u64) as u32;
        if tail != 0 {
            *last |= u64::MAX << tail;
        }
        self.words[0] |= 1;
    }

    /// Inclusive upper bound this store was built for.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Current value of block `block`.
    #[inline]
    pub fn word(&self, block: usize) -> u64 {
        self.words[block]
    }

    /// All blocks in ascending order.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// True if the odd integer `n` is still a candidate (bit clear).
    /// Integers past the last block are never candidates.
    #[inline]
    pub fn is_candidate(&self, n: u64) -> bool {
        debug_assert!(n & 1 == 1, "even integer {} has no bit", n);
        match self.words.get(block_of(n)) {
            Some(&word) => word & (1u64 << bit_of(n)) == 0,
            None => false,
        }
    }

    /// Mark the odd integer `n` as composite.
    #[inline]
    pub fn mark(&mut self, n: u64) {
        debug_assert!(n & 1 == 1, "even integer {} has no bit", n);
        self.words[block_of(n)] |= 1u64 << bit_of(n);
    }

    /// Count of clear bits across all blocks (the odd candidates).
    pub fn candidate_count(&self) -> usize {
        self.words.iter().map(|w| w.count_zeros() as usize).sum()
    }
}
