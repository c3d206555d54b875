//! shaseek CLI
//!
//! A command-line tool for brute-forcing SHA-256 preimages over fixed-width
//! decimal keyspaces.
//!
//! # Commands
//!
//! - `search` - Find the candidate that hashes to a target digest
//! - `digest` - Print the SHA-256 of text, a file or stdin
//! - `benchmark` - Measure candidate digests per second
//! - `config` - Show the effective configuration

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use shaseek::digest::{digest, Sha256};
use shaseek::search::{keyspace_size, CandidateCounter, SearchOutcome, Searcher, Step};
use shaseek::{parse_digest_hex, SearchConfig, SearchError};

/// Exit status when the whole keyspace was searched without a match
const EXIT_EXHAUSTED: u8 = 2;

/// Interval between progress lines
const REPORT_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "shaseek")]
#[command(version)]
#[command(about = "Parallel brute-force SHA-256 preimage search over digit strings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/shaseek/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the digit string whose SHA-256 equals the target
    Search {
        /// Target digest as 64 hex characters
        #[arg(short, long)]
        target: String,

        /// Digits per candidate
        #[arg(short, long)]
        width: Option<usize>,

        /// Candidates generated and scanned per batch
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Number of worker threads (default: number of CPU cores)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// First candidate to try (default: all zeros)
        #[arg(long)]
        start: Option<String>,

        /// Disable periodic progress lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the SHA-256 digest of text, a file, or stdin
    Digest {
        /// Text to hash
        text: Option<String>,

        /// File to hash (streamed)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of candidates to hash
        #[arg(short, long, default_value = "1000000")]
        count: u64,

        /// Digits per candidate
        #[arg(short, long)]
        width: Option<usize>,

        /// Worker count used for the full-keyspace estimate
        #[arg(short = 'j', long)]
        workers: Option<usize>,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match SearchConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_level);

    let result = match cli.command {
        Commands::Search {
            target,
            width,
            batch_size,
            workers,
            start,
            quiet,
        } => {
            let config = apply_overrides(config, width, batch_size, workers, start);
            cmd_search(&target, &config, quiet)
        }
        Commands::Digest { text, file } => {
            cmd_digest(text, file.as_deref()).map(|_| ExitCode::SUCCESS)
        }
        Commands::Benchmark {
            count,
            width,
            workers,
        } => {
            let config = apply_overrides(config, width, None, workers, None);
            cmd_benchmark(count, &config).map(|_| ExitCode::SUCCESS)
        }
        Commands::Config => cmd_config(&config).map(|_| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over the config level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer CLI flags over the file config
fn apply_overrides(
    mut config: SearchConfig,
    width: Option<usize>,
    batch_size: Option<usize>,
    workers: Option<usize>,
    start: Option<String>,
) -> SearchConfig {
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(batch_size) = batch_size {
        config.batch_size = batch_size;
    }
    if workers.is_some() {
        config.workers = workers;
    }
    if start.is_some() {
        config.start = start;
    }
    config
}

fn cmd_search(target_hex: &str, config: &SearchConfig, quiet: bool) -> anyhow::Result<ExitCode> {
    let target = parse_digest_hex(target_hex)?;
    let task = config.to_task(target)?;
    let searcher = Searcher::new(task)?;
    let task = searcher.task();
    let keyspace = keyspace_size(task.width)
        .ok_or(SearchError::InvalidWidth(task.width))?;

    println!("=== shaseek ===");
    println!("Target:     {}", hex::encode(task.target));
    println!("Width:      {} digits", task.width);
    println!("Keyspace:   {}", keyspace);
    println!("Batch size: {}", task.batch_size);
    println!("Workers:    {}", task.workers);
    println!("===============\n");

    let progress = searcher.progress();
    let start = Instant::now();

    let outcome = std::thread::scope(|s| {
        let handle = s.spawn(|| searcher.run());

        // Monitor progress while the search runs
        let mut last_report = Instant::now();
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(50));
            if quiet || last_report.elapsed() < REPORT_INTERVAL {
                continue;
            }
            last_report = Instant::now();

            let snapshot = progress.snapshot();
            let elapsed = start.elapsed().as_secs_f64();
            print!(
                "\rRate: {:.0} H/s | Checked: {} | Cursor: {} | Time: {:.0}s",
                snapshot.checked as f64 / elapsed,
                snapshot.checked,
                snapshot.cursor,
                elapsed
            );
            std::io::stdout().flush().ok();
        }

        handle
            .join()
            .map_err(|_| anyhow::anyhow!("search thread panicked"))
    })?;

    let elapsed = start.elapsed().as_secs_f64();
    let checked = progress.checked();

    match outcome {
        SearchOutcome::Found(found) => {
            println!("\n\nFound preimage!");
            println!("  Candidate: {}", found.candidate);
            println!("  Digest:    {}", hex::encode(found.digest));
            println!("  Index:     {}", found.index);
            println!(
                "  Checked:   {} ({:.0} H/s)",
                checked,
                checked as f64 / elapsed
            );
            Ok(ExitCode::SUCCESS)
        }
        SearchOutcome::Exhausted { checked } => {
            println!(
                "\n\nKeyspace exhausted: no match among {} candidates.",
                checked
            );
            println!("  Time: {:.2}s", elapsed);
            Ok(ExitCode::from(EXIT_EXHAUSTED))
        }
    }
}

fn cmd_digest(text: Option<String>, file: Option<&Path>) -> anyhow::Result<()> {
    let result = match (text, file) {
        (Some(text), _) => digest(text.as_bytes()),
        (None, Some(path)) => {
            let mut reader = std::fs::File::open(path)
                .map_err(|e| anyhow::anyhow!("cannot open {}: {}", path.display(), e))?;
            let mut hasher = Sha256::new();
            std::io::copy(&mut reader, &mut hasher)?;
            hasher.finalize()
        }
        (None, None) => {
            let mut hasher = Sha256::new();
            std::io::copy(&mut std::io::stdin().lock(), &mut hasher)?;
            hasher.finalize()
        }
    };

    println!("{}", hex::encode(result));
    Ok(())
}

fn cmd_benchmark(count: u64, config: &SearchConfig) -> anyhow::Result<()> {
    let width = config.width;
    let workers = config.worker_count();
    let mut counter = CandidateCounter::new(width)?;
    let keyspace = keyspace_size(width)
        .ok_or(SearchError::InvalidWidth(width))?;
    let count = count.min(keyspace);

    println!(
        "Running benchmark with {} candidates of {} digits...",
        count, width
    );

    let start = Instant::now();
    let mut sink = 0u8;
    for _ in 0..count {
        sink ^= digest(counter.as_bytes())[0];
        if counter.advance() == Step::Exhausted {
            break;
        }
    }
    std::hint::black_box(sink);

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();
    let keyspace_secs = keyspace as f64 / (hashrate * workers as f64);

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate:      {:.2} H/s (single thread)", hashrate);
    println!(
        "  Full keyspace: ~{:.1}s on {} workers (ideal scaling)",
        keyspace_secs, workers
    );

    println!("\nAlgorithm parameters:");
    println!("  Block size:  {} bytes", shaseek::digest::BLOCK_SIZE);
    println!("  Digest size: {} bytes", shaseek::digest::DIGEST_SIZE);
    println!("  Rounds:      {}", shaseek::digest::ROUNDS);

    Ok(())
}

fn cmd_config(config: &SearchConfig) -> anyhow::Result<()> {
    let mut effective = serde_json::to_value(config)?;
    effective["workers"] = config.worker_count().into();
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
