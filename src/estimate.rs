//! # Estimate — Sieve Bounds for "the First N Primes"
//!
//! To list the first `n` primes we need a limit `x` with `pi(x) >= n` before
//! sieving. `f(x) = floor(x / ln x)` is a cheap monotone stand-in for pi(x),
//! and it never overshoots it for x >= 17 (Rosser & Schoenfeld), so a limit
//! with `f(x) >= n` normally suffices on the first try.
//!
//! ## Search
//!
//! 1. Exponential probe: double a candidate until `f(upper) > n`, which
//!    brackets the crossover in `[upper/2, upper)`.
//! 2. Binary search the bracket for `f(x) == n`. If no exact hit exists the
//!    search returns one past its final low index, which always satisfies
//!    `f(x) > n`.
//!
//! [`first_primes`] then sieves up to that bound and counts the result. If the
//! count still falls short, the bound is doubled and the sieve re-run, so the
//! returned list always has exactly `n` entries.
//!
//! ## References
//!
//! - J. B. Rosser and L. Schoenfeld, "Approximate formulas for some functions
//!   of prime numbers", Illinois J. Math. 6 (1962), 64–94.

use tracing::{debug, warn};

use crate::blocks::MAX_LIMIT;
use crate::enumerate::{prime_count, PrimeIter};
use crate::error::{Result, SieveError};
use crate::sieve::sieve;

/// `floor(x / ln x)`, with 0 for x < 2.
pub fn approx_prime_count(x: u64) -> u64 {
    if x < 2 {
        return 0;
    }
    let xf = x as f64;
    (xf / xf.ln()) as u64
}

/// Smallest power of two (>= 4) whose approximate prime count exceeds `count`.
fn probe_upper(count: u64) -> Result<u64> {
    let mut upper = 2u64;
    loop {
        upper <<= 1;
        if upper > MAX_LIMIT {
            return Err(SieveError::InvalidArgument(format!(
                "no sieve limit up to {} holds {} primes",
                MAX_LIMIT, count
            )));
        }
        if approx_prime_count(upper) > count {
            return Ok(upper);
        }
    }
}

/// Binary search over `[from, to)` for `approx_prime_count(x) == key`.
/// Falls back to one past the final low index when there is no exact hit.
fn search_bracket(from: u64, to: u64, key: u64) -> u64 {
    let mut low = from;
    let mut high = to - 1;
    while low <= high {
        let mid = low + (high - low) / 2;
        let mid_val = approx_prime_count(mid);
        if mid_val < key {
            low = mid + 1;
        } else if mid_val > key {
            high = mid - 1;
        } else {
            return mid;
        }
    }
    low + 1
}

/// A sieve limit whose approximate prime count reaches `count`.
pub fn estimate_limit(count: u64) -> Result<u64> {
    let upper = probe_upper(count)?;
    Ok(search_bracket(upper / 2, upper, count))
}

/// The first `count` primes, ascending.
pub fn first_primes(count: usize) -> Result<Vec<u64>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let mut limit = estimate_limit(count as u64)?;
    debug!(count, limit, "estimated sieve bound");
    loop {
        let store = sieve(limit)?;
        let found = prime_count(&store);
        if found >= count {
            return Ok(PrimeIter::new(&store).take(count).collect());
        }
        warn!(count, limit, found, "sieve bound too small, doubling");
        limit = limit
            .checked_mul(2)
            .filter(|&l| l <= MAX_LIMIT)
            .ok_or_else(|| {
                SieveError::InvalidArgument(format!("cannot grow sieve bound past {}", limit))
            })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_prime_count_known_values() {
        assert_eq!(approx_prime_count(0), 0);
        assert_eq!(approx_prime_count(1), 0);
        assert_eq!(approx_prime_count(2), 2);
        assert_eq!(approx_prime_count(3), 2);
        assert_eq!(approx_prime_count(4), 2);
        assert_eq!(approx_prime_count(5), 3);
        assert_eq!(approx_prime_count(100), 21);
        assert_eq!(approx_prime_count(1000), 144);
    }

    /// floor(x / ln x) is non-decreasing for x >= 2 once floored.
    #[test]
    fn approx_prime_count_monotone() {
        let mut prev = 0;
        for x in 2..100_000u64 {
            let cur = approx_prime_count(x);
            assert!(cur >= prev, "f({}) = {} < f({}) = {}", x, cur, x - 1, prev);
            prev = cur;
        }
    }

    #[test]
    fn estimate_limit_small_counts() {
        assert_eq!(estimate_limit(1).unwrap(), 3);
        assert_eq!(estimate_limit(2).unwrap(), 4);
        assert_eq!(estimate_limit(3).unwrap(), 8);
        assert_eq!(estimate_limit(5).unwrap(), 16);
    }

    /// The estimate must always reach the requested approximate count.
    #[test]
    fn estimate_limit_reaches_count() {
        for count in (1..5000u64).chain([10_000, 100_000, 1_000_000]) {
            let limit = estimate_limit(count).unwrap();
            assert!(
                approx_prime_count(limit) >= count,
                "count={}, limit={}",
                count,
                limit
            );
        }
    }

    /// With the real sieve, the estimated bound holds enough primes for every
    /// count in the range (no fallback doubling needed).
    #[test]
    fn estimate_limit_holds_enough_primes() {
        for count in 1..1500u64 {
            let limit = estimate_limit(count).unwrap();
            let store = sieve(limit).unwrap();
            assert!(
                prime_count(&store) as u64 >= count,
                "count={}, limit={}, pi={}",
                count,
                limit,
                prime_count(&store)
            );
        }
    }

    #[test]
    fn first_primes_five() {
        assert_eq!(first_primes(5).unwrap(), vec![2, 3, 5, 7, 11]);
    }

    #[test]
    fn first_primes_zero_and_one() {
        assert_eq!(first_primes(0).unwrap(), Vec::<u64>::new());
        assert_eq!(first_primes(1).unwrap(), vec![2]);
    }

    /// The 10,000th prime is 104729.
    #[test]
    fn first_primes_ten_thousand() {
        let primes = first_primes(10_000).unwrap();
        assert_eq!(primes.len(), 10_000);
        assert_eq!(primes.last(), Some(&104_729));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn first_primes_rejects_unreachable_count() {
        assert!(matches!(
            first_primes(usize::MAX),
            Err(SieveError::InvalidArgument(_))
        ));
    }
}
