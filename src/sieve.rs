//! # Sieve — Odd-Only Block Sieve of Eratosthenes
//!
//! Runs the single marking pass over a [`BlockStore`]. Factor discovery is
//! capped near √limit, but marking triggered by a discovered prime always runs
//! to the end of the store.
//!
//! ## Algorithm
//!
//! 1. Allocate `ceil(limit / 128)` blocks with 1 and everything above `limit`
//!    masked (see [`BlockStore::new`]).
//! 2. `root = ceil(√(blocks · 128))`, `cap = ceil(root / 128)`.
//! 3. Scan blocks `0..cap` bit by bit with a running odd counter. A clear bit
//!    is a prime `p`; its multiples from `p²` are marked:
//!    - `p < 64`: [`CyclePattern`] (one OR per block),
//!    - `p >= 64`: [`mark_direct`] (one bit per odd multiple).
//!
//! When `p²` lands in the block currently being scanned, the scan reloads the
//! live word from the store so the new composites are seen in the same pass.
//!
//! Complexity: O(n log log n) time, n/16 bytes of space.

use tracing::debug;

use crate::blocks::{block_of, BlockStore, BLOCK_BITS, BLOCK_SPAN};
use crate::error::Result;
use crate::wheel::{CyclePattern, WHEEL_LIMIT};

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    let r = n.isqrt();
    if r * r < n {
        r + 1
    } else {
        r
    }
}

/// Number of leading blocks that can hold a prime factor of anything in the store.
fn factor_cap(blocks: usize) -> usize {
    let root = ceil_sqrt(blocks as u64 * BLOCK_SPAN);
    (root.div_ceil(BLOCK_SPAN) as usize).min(blocks)
}

/// Mark every odd multiple of `prime` from `prime²` up to and including the
/// store limit. Used for primes too large for a cycle pattern.
pub fn mark_direct(store: &mut BlockStore, prime: u64) {
    let limit = store.limit();
    let step = prime << 1;
    let mut m = prime * prime;
    while m <= limit {
        store.mark(m);
        m += step;
    }
}

/// Sieve all odd integers up to `limit`. Clear bits in the returned store are
/// exactly the odd primes `<= limit`.
pub fn sieve(limit: u64) -> Result<BlockStore> {
    let mut store = BlockStore::new(limit)?;
    let blocks = store.len();
    let cap = factor_cap(blocks);
    debug!(limit, blocks, cap, "sieve allocated");

    let mut wheel_primes = 0u32;
    let mut direct_primes = 0u32;
    let mut number = 1u64;
    for b in 0..cap {
        let mut word = store.word(b);
        for i in 0..BLOCK_BITS {
            if word & 1 == 0 {
                let start_block = if number < WHEEL_LIMIT {
                    let pattern = CyclePattern::new(number);
                    pattern.apply(store.words_mut());
                    wheel_primes += 1;
                    pattern.start_block()
                } else {
                    mark_direct(&mut store, number);
                    direct_primes += 1;
                    block_of(number * number)
                };
                if start_block == b {
                    word = store.word(b) >> i;
                }
            }
            number += 2;
            word >>= 1;
        }
    }

    debug!(limit, wheel_primes, direct_primes, "sieve pass complete");
    Ok(store)
}

#[cfg(test)]
mod tests {
    //! # Sieve Pass Tests
    //!
    //! Checks the marking pass directly on the block store, independent of the
    //! `PrimeGenerator` facade:
    //!
    //! - **Known counts**: odd candidates + 1 (for 2) must equal pi(x)
    //!   (OEIS [A000720](https://oeis.org/A000720)) for powers of ten to 10^6.
    //! - **Trial division**: every odd number up to a few thousand is compared
    //!   against a naive primality check, which covers the wheel path, the
    //!   direct path and the switch between them at 64.
    //! - **Block boundaries**: limits at 127/128/129 and at squares of primes
    //!   on either side of the wheel limit.

    use super::*;
    use crate::blocks::number_of;
    use crate::enumerate::prime_count;
    use crate::is_prime_trial;

    // ── Helpers ───────────────────────────────────────────────────────

    #[test]
    fn ceil_sqrt_rounds_up() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
        assert_eq!(ceil_sqrt(128), 12);
    }

    #[test]
    fn factor_cap_covers_square_root() {
        assert_eq!(factor_cap(0), 0);
        assert_eq!(factor_cap(1), 1);
        // 1000 blocks = 128000, sqrt ~ 358 → 3 blocks
        assert_eq!(factor_cap(1000), 3);
    }

    // ── Known Counts ──────────────────────────────────────────────────

    /// pi(x) for powers of ten, the classic sanity table.
    #[test]
    fn sieve_known_counts() {
        assert_eq!(prime_count(&sieve(100).unwrap()), 25);
        assert_eq!(prime_count(&sieve(1000).unwrap()), 168);
        assert_eq!(prime_count(&sieve(10_000).unwrap()), 1229);
        assert_eq!(prime_count(&sieve(100_000).unwrap()), 9592);
        assert_eq!(prime_count(&sieve(1_000_000).unwrap()), 78498);
    }

    // ── Trial Division Cross-Check ─────────────────────────────────────

    /// Every odd n up to 20000 must be a candidate iff it is prime.
    #[test]
    fn sieve_matches_trial_division() {
        let limit = 20_000;
        let store = sieve(limit).unwrap();
        for n in (1..=limit).step_by(2) {
            assert_eq!(store.is_candidate(n), is_prime_trial(n), "n={}", n);
        }
    }

    /// Small limits exercise the case where p² lands in the block being
    /// scanned (p = 3, 5, 7, 11) and the store has a single block.
    #[test]
    fn sieve_single_block_limits() {
        for limit in 0..=200u64 {
            let store = sieve(limit).unwrap();
            let expected = (0..=limit).filter(|&n| is_prime_trial(n)).count();
            assert_eq!(prime_count(&store), expected, "limit={}", limit);
        }
    }

    // ── Boundaries ─────────────────────────────────────────────────────

    /// The limit itself is marked when its smallest factor is a direct-path
    /// prime: 67² = 4489 and 67·71 = 4757 must not survive.
    #[test]
    fn sieve_marks_limit_itself() {
        for limit in [4489u64, 4757, 71 * 71, 127 * 131] {
            let store = sieve(limit).unwrap();
            assert!(!store.is_candidate(limit), "limit={} survived", limit);
        }
    }

    /// Squares straddling the wheel limit: 61² uses the cycle pattern, 67² the
    /// direct marker. Both must be removed once the limit reaches them.
    #[test]
    fn sieve_squares_around_wheel_limit() {
        let store = sieve(5000).unwrap();
        assert!(!store.is_candidate(61 * 61));
        assert!(!store.is_candidate(67 * 67));
        assert!(store.is_candidate(61));
        assert!(store.is_candidate(67));
    }

    #[test]
    fn sieve_block_boundaries() {
        for limit in [127u64, 128, 129, 255, 256, 257] {
            let store = sieve(limit).unwrap();
            for n in (1..store.len() as u64 * BLOCK_SPAN).step_by(2) {
                assert_eq!(
                    store.is_candidate(n),
                    n <= limit && is_prime_trial(n),
                    "limit={}, n={}",
                    limit,
                    n
                );
            }
        }
    }

    /// Direct marking stops at the limit and never touches bits above it.
    #[test]
    fn mark_direct_stops_at_limit() {
        let mut store = BlockStore::new(10_000).unwrap();
        mark_direct(&mut store, 67);
        assert!(!store.is_candidate(67 * 67));
        assert!(!store.is_candidate(67 * 69));
        assert!(store.is_candidate(67 * 68 + 1));
        assert!(store.is_candidate(67));
    }

    #[test]
    fn first_survivor_is_three() {
        let store = sieve(1000).unwrap();
        let first = store.words()[0];
        assert_eq!(number_of(0, first.trailing_ones()), 3);
    }
}
