//! # Wheel — Cycle Patterns for Small Primes
//!
//! Multiples of an odd prime `p` hit the odd-only bit layout with period `p`
//! bits. Because `gcd(p, 64) = 1`, the pattern a single block sees repeats
//! every `p` blocks, so the `p` distinct words ("phases") can be computed once
//! and OR-ed across the whole store: one OR per block instead of one division
//! per multiple.
//!
//! ## Phase construction
//!
//! Phase 0 sets every bit congruent to `bit_of(p²) mod p`. Moving one block
//! forward advances the represented bit index by 64, which in residue terms is
//! a shift by `s = (64/p + 1)·p mod 64` (the smallest non-negative value with
//! `s ≡ -64 mod p`). So phase `c + 1` is phase `c` shifted left by `s`, plus
//! one bit inserted at the wrapped residue below `s`. Since `s < p`, at most
//! one such low bit exists.
//!
//! Only primes below [`WHEEL_LIMIT`] take this path: the phase table has `p`
//! entries, and above 64 a prime marks at most one bit per block anyway.

use crate::blocks::{bit_of, block_of, BLOCK_BITS};

/// Primes below this bound are marked with a [`CyclePattern`].
pub const WHEEL_LIMIT: u64 = 64;

/// Precomputed phase words marking every odd multiple of a small prime,
/// starting at its square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePattern {
    prime: u64,
    start_block: usize,
    start_bit: u32,
    phases: Vec<u64>,
}

impl CyclePattern {
    /// Build the phase table for odd prime `prime < 64`.
    pub fn new(prime: u64) -> Self {
        debug_assert!(
            prime >= 3 && prime < WHEEL_LIMIT && prime & 1 == 1,
            "cycle patterns need an odd prime below {}, got {}",
            WHEEL_LIMIT,
            prime
        );
        let start = prime * prime;
        let start_block = block_of(start);
        let start_bit = bit_of(start);
        let p = prime as u32;

        let mut residue = start_bit % p;
        let mut bits = 0u64;
        let mut pos = residue;
        while pos < BLOCK_BITS {
            bits |= 1u64 << pos;
            pos += p;
        }

        let shift = (BLOCK_BITS / p + 1) * p % BLOCK_BITS;
        let mut phases = Vec::with_capacity(p as usize);
        phases.push(bits);
        for _ in 1..p {
            residue = (residue + shift) % p;
            bits = bits << shift | 1u64 << residue;
            phases.push(bits);
        }

        CyclePattern {
            prime,
            start_block,
            start_bit,
            phases,
        }
    }

    #[inline]
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Block holding `prime²`.
    #[inline]
    pub fn start_block(&self) -> usize {
        self.start_block
    }

    /// Bit of `prime²` inside [`start_block`](Self::start_block).
    #[inline]
    pub fn start_bit(&self) -> u32 {
        self.start_bit
    }

    /// The `prime` phase words; phase `k` applies to block `start_block + k (mod prime)`.
    #[inline]
    pub fn phases(&self) -> &[u64] {
        &self.phases
    }

    /// OR the pattern into `words` from the start block to the end.
    ///
    /// In the start block, bits below `prime²` are left alone: the phase would
    /// otherwise also hit `prime` itself and its odd multiples below the square.
    pub fn apply(&self, words: &mut [u64]) {
        let mut blocks = words.iter_mut().skip(self.start_block);
        let mut phases = self.phases.iter().cycle();
        if let (Some(first), Some(&phase)) = (blocks.next(), phases.next()) {
            *first |= phase & (u64::MAX << self.start_bit);
        }
        for (word, &phase) in blocks.zip(phases) {
            *word |= phase;
        }
    }
}
