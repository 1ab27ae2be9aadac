//! HashCash Prover CLI
//!
//! A command-line tool for minting and checking HashCash proof-of-work stamps.
//!
//! # Commands
//!
//! - `mine` - Mint a stamp for a resource
//! - `verify` - Check a stamp received in wire format
//! - `benchmark` - Measure digest throughput

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use tracing::{info, warn};

use hashcash::algorithm::{DifficultyUnit, ExhaustedError, MiningReport, Stamp, SystemClock};
use hashcash::config::ProverConfig;
use hashcash::logging::init_logging;
use hashcash::{Engine, GetrandomNonce};

#[derive(Parser)]
#[command(name = "hashcash")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "HashCash proof-of-work stamp miner and verifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/hashcash/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "hashcash_core=debug" (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a stamp
    Mine {
        /// What the stamp is for
        #[arg(short, long)]
        resource: Option<String>,

        /// Required leading zeros
        #[arg(short, long)]
        difficulty: Option<u32>,

        /// Highest counter to try (inclusive)
        #[arg(short, long, conflicts_with = "unbounded")]
        max_iterations: Option<u64>,

        /// Search without a counter cap
        #[arg(long)]
        unbounded: bool,

        /// Nonce length in characters
        #[arg(long)]
        nonce_len: Option<usize>,

        /// Number of worker threads
        #[arg(short, long, conflicts_with = "all_cores")]
        threads: Option<usize>,

        /// Use one worker per CPU core
        #[arg(long)]
        all_cores: bool,

        /// Count zero bytes instead of zero hex digits
        #[arg(long)]
        byte_zeros: bool,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a stamp
    Verify {
        /// Stamp in wire format
        stamp: String,

        /// Count zero bytes instead of zero hex digits
        #[arg(long)]
        byte_zeros: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ProverConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(config.log_format, &config.log_level)?;

    match cli.command {
        Commands::Mine {
            resource,
            difficulty,
            max_iterations,
            unbounded,
            nonce_len,
            threads,
            all_cores,
            byte_zeros,
            json,
        } => {
            if let Some(resource) = resource {
                config.resource = resource;
            }
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            if unbounded {
                config.max_iterations = None;
            } else if max_iterations.is_some() {
                config.max_iterations = max_iterations;
            }
            if let Some(nonce_len) = nonce_len {
                config.nonce_len = nonce_len;
            }
            if all_cores {
                config.threads = Some(num_cpus::get());
            } else if threads.is_some() {
                config.threads = threads;
            }
            if byte_zeros {
                config.unit = DifficultyUnit::Byte;
            }
            cmd_mine(&config, json)
        }
        Commands::Verify { stamp, byte_zeros } => {
            let unit = if byte_zeros {
                DifficultyUnit::Byte
            } else {
                config.unit
            };
            cmd_verify(&stamp, unit)
        }
        Commands::Benchmark { count } => cmd_benchmark(count),
    }
}

/// JSON output of `mine --json`
#[derive(Serialize)]
struct MineReport<'a> {
    stamp: String,
    digest: String,
    resource: &'a str,
    difficulty: u32,
    unit: DifficultyUnit,
    counter: u64,
    attempts: u64,
    elapsed_ms: u128,
    hashrate: f64,
}

fn cmd_mine(config: &ProverConfig, json: bool) -> anyhow::Result<()> {
    config.validate()?;

    let engine = config.engine();
    let mut stamp = Stamp::new(
        config.resource.as_str(),
        config.difficulty,
        config.nonce_len,
        &SystemClock,
        &GetrandomNonce,
    )?;

    info!(
        resource = %config.resource,
        difficulty = config.difficulty,
        unit = ?config.unit,
        budget = ?config.max_iterations,
        threads = config.threads.unwrap_or(1),
        "mining stamp"
    );

    let report = search(&engine, &mut stamp, config.max_iterations, config.threads)
        .with_context(|| {
            format!(
                "no stamp for {:?} at difficulty {}",
                config.resource, config.difficulty
            )
        })?;

    let digest = stamp.digest().to_hex();

    if json {
        let output = MineReport {
            stamp: stamp.to_string(),
            digest,
            resource: &config.resource,
            difficulty: config.difficulty,
            unit: config.unit,
            counter: report.counter,
            attempts: report.attempts,
            elapsed_ms: report.elapsed.as_millis(),
            hashrate: report.hashrate(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Found valid stamp!");
    println!("  Stamp:    {}", stamp);
    println!("  Digest:   {}", digest);
    println!("  Counter:  {}", report.counter);
    println!("  Attempts: {}", report.attempts);
    println!("  Elapsed:  {:?}", report.elapsed);
    println!("  Hashrate: {:.0} H/s", report.hashrate());

    Ok(())
}

/// Sequential or parallel search depending on the worker count
fn search(
    engine: &Engine,
    stamp: &mut Stamp,
    budget: Option<u64>,
    threads: Option<usize>,
) -> Result<MiningReport, ExhaustedError> {
    #[cfg(feature = "parallel")]
    {
        if let Some(workers) = threads.filter(|n| *n > 1) {
            return engine.mine_parallel_with_report(stamp, budget, workers);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        if threads.is_some_and(|n| n > 1) {
            warn!("built without the parallel feature, mining on one thread");
        }
    }

    engine.mine_with_report(stamp, budget)
}

fn cmd_verify(text: &str, unit: DifficultyUnit) -> anyhow::Result<()> {
    let stamp: Stamp = text
        .trim()
        .parse()
        .with_context(|| format!("invalid stamp {:?}", text))?;

    let engine = Engine::with_unit(unit);
    let digest = stamp.digest().to_hex();

    println!("Stamp:      {}", stamp);
    println!("Digest:     {}", digest);
    println!("Difficulty: {} ({:?})", stamp.difficulty(), unit);

    if stamp.version() != hashcash::algorithm::STAMP_VERSION {
        warn!(version = stamp.version(), "unexpected stamp version");
    }

    if !engine.verify(&stamp) {
        anyhow::bail!("invalid: digest does not meet difficulty {}", stamp.difficulty());
    }

    println!("valid");
    Ok(())
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} digests...", count);

    let mut stamp = Stamp::from_parts(
        hashcash::algorithm::STAMP_VERSION,
        64,
        1_700_000_000,
        "benchmark",
        "abcdefghij",
        0,
    );
    let engine = Engine::new();

    let start = Instant::now();

    // Difficulty 64 is never met, so the search runs the whole budget
    let budget = count.saturating_sub(1);
    let _ = engine.mine(&mut stamp, Some(budget));

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate:      {:.0} H/s", hashrate);

    println!("\nExpected time per stamp (hex-digit units):");
    for difficulty in 1..=8u32 {
        let attempts = 16f64.powi(difficulty as i32);
        println!(
            "  difficulty {}: {:>12.0} attempts, {:>10.3}s",
            difficulty,
            attempts,
            attempts / hashrate
        );
    }

    Ok(())
}
