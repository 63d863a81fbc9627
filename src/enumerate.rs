//! # Enumerate — Reading Primes Back Out of a Finished Store
//!
//! Everything here is read-only over a [`BlockStore`] that has completed its
//! sieve pass. The prime 2 is never stored, so it is emitted up front whenever
//! the limit reaches it; every clear bit after that is an odd prime.
//!
//! Scanning inverts each word and walks its set bits with `trailing_zeros()`,
//! skipping fully composite blocks in a single comparison.

use std::iter::FusedIterator;

use crate::blocks::{number_of, BlockStore};
use crate::error::{Result, SieveError};

/// Number of primes `<= store.limit()`: clear bits plus one for the prime 2.
pub fn prime_count(store: &BlockStore) -> usize {
    store.candidate_count() + usize::from(store.limit() >= 2)
}

/// Ascending iterator over the primes recorded in a store.
#[derive(Debug, Clone)]
pub struct PrimeIter<'a> {
    words: &'a [u64],
    next_block: usize,
    block: usize,
    pending: u64,
    two: bool,
    remaining: usize,
}

impl<'a> PrimeIter<'a> {
    pub fn new(store: &'a BlockStore) -> Self {
        PrimeIter {
            words: store.words(),
            next_block: 0,
            block: 0,
            pending: 0,
            two: store.limit() >= 2,
            remaining: prime_count(store),
        }
    }
}

impl Iterator for PrimeIter<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.two {
            self.two = false;
            self.remaining -= 1;
            return Some(2);
        }
        while self.pending == 0 {
            let &word = self.words.get(self.next_block)?;
            self.block = self.next_block;
            self.next_block += 1;
            self.pending = !word;
        }
        let bit = self.pending.trailing_zeros();
        self.pending &= self.pending - 1; // clear lowest set bit
        self.remaining -= 1;
        Some(number_of(self.block, bit))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PrimeIter<'_> {}

impl FusedIterator for PrimeIter<'_> {}

/// All primes in the store, ascending, allocated once at the exact size.
pub fn list_primes(store: &BlockStore) -> Vec<u64> {
    let mut primes = Vec::with_capacity(prime_count(store));
    primes.extend(PrimeIter::new(store));
    primes
}

/// Boolean table of length `limit + 1`, true exactly at the primes.
pub fn lookup_table(store: &BlockStore) -> Result<Vec<bool>> {
    let len = usize::try_from(store.limit() + 1).map_err(|_| {
        SieveError::InvalidArgument(format!(
            "lookup table for limit {} does not fit in memory on this platform",
            store.limit()
        ))
    })?;
    let mut table = vec![false; len];
    for p in PrimeIter::new(store) {
        table[p as usize] = true;
    }
    Ok(table)
}
