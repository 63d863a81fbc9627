//! # Generator — Sieve Facade
//!
//! [`PrimeGenerator`] owns one sieve limit and, after [`generate`], the
//! finished block store. The limit is validated at construction and never
//! changes; generation runs once. Every query borrows `&self`, so a generated
//! instance can be shared across threads for read-only lookups, while the
//! `&mut self` on `generate` keeps generation single-owner.
//!
//! [`generate`]: PrimeGenerator::generate

use crate::blocks::{self, bit_of, block_of, BlockStore};
use crate::enumerate::{self, PrimeIter};
use crate::error::{Result, SieveError};
use crate::estimate;
use crate::sieve::sieve;

/// Bit-packed prime sieve over `[0, limit]`.
#[derive(Debug, Clone)]
pub struct PrimeGenerator {
    limit: u64,
    store: Option<BlockStore>,
}

impl PrimeGenerator {
    /// Create a generator for `limit`, sieving right away when `generate` is set.
    ///
    /// Fails with [`SieveError::InvalidArgument`] if `limit` exceeds
    /// [`MAX_LIMIT`](crate::blocks::MAX_LIMIT) or needs more blocks than the
    /// platform can address.
    pub fn new(limit: u64, generate: bool) -> Result<Self> {
        blocks::block_count(limit)?;
        let mut generator = PrimeGenerator { limit, store: None };
        if generate {
            generator.generate()?;
        }
        Ok(generator)
    }

    /// Run the sieve pass. Fails with [`SieveError::AlreadyGenerated`] on a
    /// second call; on any other error the instance stays ungenerated.
    pub fn generate(&mut self) -> Result<()> {
        if self.store.is_some() {
            return Err(SieveError::AlreadyGenerated);
        }
        self.store = Some(sieve(self.limit)?);
        Ok(())
    }

    /// Inclusive upper bound of this sieve.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&BlockStore> {
        self.store.as_ref().ok_or(SieveError::UninitializedSieve)
    }

    /// Primality of `n` in O(1).
    ///
    /// Only `n <= limit` is answerable; larger values fail with
    /// [`SieveError::OutOfRange`] rather than guessing.
    pub fn is_prime(&self, n: u64) -> Result<bool> {
        let store = self.store()?;
        if n > self.limit {
            return Err(SieveError::OutOfRange {
                n,
                limit: self.limit,
            });
        }
        if n & 1 == 0 {
            return Ok(n == 2);
        }
        let is_prime = store
            .words()
            .get(block_of(n))
            .is_some_and(|&word| word & (1u64 << bit_of(n)) == 0);
        Ok(is_prime)
    }

    /// All primes `<= limit`, ascending.
    pub fn list_primes(&self) -> Result<Vec<u64>> {
        Ok(enumerate::list_primes(self.store()?))
    }

    /// Lazy ascending iterator over the primes `<= limit`.
    pub fn iter(&self) -> Result<PrimeIter<'_>> {
        Ok(PrimeIter::new(self.store()?))
    }

    /// pi(limit), counted from the packed bits without listing.
    pub fn count(&self) -> Result<usize> {
        Ok(enumerate::prime_count(self.store()?))
    }

    /// `table[i]` is true iff `i` is prime, for `i` in `[0, limit]`.
    pub fn lookup_table(&self) -> Result<Vec<bool>> {
        enumerate::lookup_table(self.store()?)
    }

    /// All primes `<= limit` in one call.
    pub fn primes(limit: u64) -> Result<Vec<u64>> {
        PrimeGenerator::new(limit, true)?.list_primes()
    }

    /// Exactly the first `count` primes.
    pub fn n_primes(count: usize) -> Result<Vec<u64>> {
        estimate::first_primes(count)
    }
}
