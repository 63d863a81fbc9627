//! # CLI Execution Functions
//!
//! Execution logic for each subcommand: build the sieve, run the query, and
//! render the result as text or JSON on stdout.

use std::io::{self, BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use bitprime::PrimeGenerator;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::{Cli, Commands, OutputFormat};

// ── Reports ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct PrimesReport<'a> {
    limit: u64,
    count: usize,
    primes: &'a [u64],
}

#[derive(Serialize)]
struct FirstReport<'a> {
    count: usize,
    primes: &'a [u64],
}

#[derive(Serialize)]
struct CountReport {
    limit: u64,
    count: usize,
}

#[derive(Serialize)]
struct CheckResult {
    n: u64,
    prime: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    limit: u64,
    results: &'a [CheckResult],
}

#[derive(Serialize)]
struct TableReport<'a> {
    limit: u64,
    table: &'a [bool],
}

fn write_json<T: Serialize>(out: &mut impl Write, report: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_lines(out: &mut impl Write, values: &[u64]) -> io::Result<()> {
    for v in values {
        writeln!(out, "{}", v)?;
    }
    Ok(())
}

// ── Dispatch ────────────────────────────────────────────────────

/// Build a generated sieve for `limit`, logging how long the pass took.
fn generate(limit: u64) -> Result<PrimeGenerator> {
    let start = Instant::now();
    let generator = PrimeGenerator::new(limit, true)
        .with_context(|| format!("failed to sieve up to {}", limit))?;
    info!(
        limit,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "sieve complete"
    );
    Ok(generator)
}

/// Run the selected subcommand and write its result to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.command {
        Commands::Primes { limit } => {
            let primes = generate(*limit)?.list_primes()?;
            match cli.format {
                OutputFormat::Text => write_lines(&mut out, &primes)?,
                OutputFormat::Json => write_json(
                    &mut out,
                    &PrimesReport {
                        limit: *limit,
                        count: primes.len(),
                        primes: &primes,
                    },
                )?,
            }
        }
        Commands::First { count } => {
            let start = Instant::now();
            let primes = PrimeGenerator::n_primes(*count)
                .with_context(|| format!("failed to list the first {} primes", count))?;
            info!(
                count,
                largest = primes.last().copied().unwrap_or(0),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "first primes listed"
            );
            match cli.format {
                OutputFormat::Text => write_lines(&mut out, &primes)?,
                OutputFormat::Json => write_json(
                    &mut out,
                    &FirstReport {
                        count: primes.len(),
                        primes: &primes,
                    },
                )?,
            }
        }
        Commands::Count { limit } => {
            let count = generate(*limit)?.count()?;
            match cli.format {
                OutputFormat::Text => writeln!(out, "{}", count)?,
                OutputFormat::Json => write_json(
                    &mut out,
                    &CountReport {
                        limit: *limit,
                        count,
                    },
                )?,
            }
        }
        Commands::Check { limit, numbers } => {
            let results = run_check(*limit, numbers)?;
            let limit = limit.unwrap_or_else(|| max_number(numbers));
            match cli.format {
                OutputFormat::Text => {
                    for r in &results {
                        let verdict = if r.prime { "prime" } else { "composite" };
                        writeln!(out, "{}: {}", r.n, verdict)?;
                    }
                }
                OutputFormat::Json => write_json(
                    &mut out,
                    &CheckReport {
                        limit,
                        results: &results,
                    },
                )?,
            }
        }
        Commands::Table { limit } => {
            let table = generate(*limit)?.lookup_table()?;
            match cli.format {
                OutputFormat::Text => {
                    let line: String = table
                        .iter()
                        .map(|&is_prime| if is_prime { '1' } else { '0' })
                        .collect();
                    writeln!(out, "{}", line)?;
                }
                OutputFormat::Json => write_json(
                    &mut out,
                    &TableReport {
                        limit: *limit,
                        table: &table,
                    },
                )?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn max_number(numbers: &[u64]) -> u64 {
    numbers.iter().copied().max().unwrap_or(0)
}

/// Sieve once, then answer every query in parallel against the read-only store.
fn run_check(limit: Option<u64>, numbers: &[u64]) -> Result<Vec<CheckResult>> {
    let limit = limit.unwrap_or_else(|| max_number(numbers));
    let generator = generate(limit)?;
    let results = numbers
        .par_iter()
        .map(|&n| generator.is_prime(n).map(|prime| CheckResult { n, prime }))
        .collect::<Result<Vec<_>, _>>()
        .context("primality query failed")?;
    let primes = results.iter().filter(|r| r.prime).count();
    info!(queries = results.len(), primes, "check complete");
    Ok(results)
}

/// Configure the global rayon thread pool used by batch queries.
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
