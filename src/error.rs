//! Error taxonomy for the sieve library.

use thiserror::Error;

/// Errors returned by [`PrimeGenerator`](crate::generator::PrimeGenerator)
/// and the functions behind it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// A query ran before `generate()` completed.
    #[error("sieve not generated yet: call generate() first")]
    UninitializedSieve,

    /// `generate()` was called on an instance that already holds a sieve.
    #[error("sieve already generated; limits are fixed at construction")]
    AlreadyGenerated,

    /// A primality query above the sieve limit.
    #[error("{n} is above the sieve limit {limit}")]
    OutOfRange { n: u64, limit: u64 },

    /// A limit or count the block arithmetic cannot represent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SieveError>;
