pub mod blocks;
pub mod enumerate;
pub mod error;
pub mod estimate;
pub mod generator;
pub mod sieve;
pub mod wheel;

pub use error::{Result, SieveError};
pub use generator::PrimeGenerator;

/// Trial-division primality check. Slow; used as the reference the sieve is
/// tested against and for quick sanity checks on single values.
pub fn is_prime_trial(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3u64;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_prime_trial_small_values() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime_trial(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn is_prime_trial_squares_are_composite() {
        for p in [3u64, 5, 7, 61, 67, 101] {
            assert!(!is_prime_trial(p * p), "{}² flagged prime", p);
        }
    }
}
