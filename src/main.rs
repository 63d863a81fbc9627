//! # Main — CLI Entry Point
//!
//! Parses the command line and hands off to the execution functions in
//! `cli.rs`. Handles the shared concerns: `.env` loading, structured logging
//! and the rayon pool used for batch primality queries.
//!
//! ## Subcommands
//!
//! - `primes --limit L`: every prime up to L.
//! - `first --count N`: the first N primes.
//! - `count --limit L`: pi(L).
//! - `check [--limit L] N...`: primality of each N.
//! - `table --limit L`: the 0/1 primality table for [0, L].
//!
//! ## Global Options
//!
//! - `--format` / `BITPRIME_FORMAT`: `text` (default) or `json`.
//! - `--threads` / `BITPRIME_THREADS`: rayon pool size (default: all cores).
//! - `LOG_FORMAT=json` switches logs to JSON; `RUST_LOG` filters them.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "bitprime", about = "List, count and test primes with a bit-packed sieve")]
struct Cli {
    /// Output format for results written to stdout
    #[arg(long, value_enum, env = "BITPRIME_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Number of rayon worker threads for batch queries (defaults to all logical cores)
    #[arg(long, env = "BITPRIME_THREADS")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List all primes up to a limit (inclusive)
    Primes {
        /// Inclusive upper bound
        #[arg(long)]
        limit: u64,
    },
    /// List the first N primes
    First {
        /// How many primes to list
        #[arg(long)]
        count: usize,
    },
    /// Count the primes up to a limit (inclusive)
    Count {
        /// Inclusive upper bound
        #[arg(long)]
        limit: u64,
    },
    /// Test numbers for primality against one sieve pass
    Check {
        /// Sieve limit (defaults to the largest number given)
        #[arg(long)]
        limit: Option<u64>,
        /// Numbers to test
        #[arg(required = true)]
        numbers: Vec<u64>,
    },
    /// Print the primality lookup table for [0, limit]
    Table {
        /// Inclusive upper bound
        #[arg(long)]
        limit: u64,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging: LOG_FORMAT=json for log shippers, human-readable otherwise.
    // Logs always go to stderr so stdout carries only results.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);
    cli::run(&cli)
}
