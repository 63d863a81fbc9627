//! Shared test helpers for integration tests.

#![allow(dead_code)]

use bitprime::is_prime_trial;

/// All primes `<= limit` by trial division. The reference every sieve result
/// is compared against.
pub fn trial_primes(limit: u64) -> Vec<u64> {
    (0..=limit).filter(|&n| is_prime_trial(n)).collect()
}

/// Limits that cover the degenerate cases, a single block, the 1000th prime
/// (7919) and a multi-block sieve with direct-marked primes.
pub const REFERENCE_LIMITS: [u64; 6] = [1, 2, 10, 100, 7919, 100_000];
