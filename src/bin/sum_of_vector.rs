//! Lesson: Summing a Vector with Threads
//! Naive loop vs iterator sum vs fixed fan-out over scoped threads.
//!
//! Run with: cargo run --release --bin sum_of_vector -- --workers 8

use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::num::TryFromIntError;
use std::path::PathBuf;
use std::time::Instant;
use threading_basics::{accumulate_sum, naive_sum, reduce_sum, SumConfig};

#[derive(Parser, Debug)]
#[command(about = "Compare sequential and threaded sums of 0..length")]
struct Args {
    /// TOML file with `length` and `workers`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of elements to sum (8 bytes each)
    #[arg(short, long)]
    length: Option<usize>,

    /// Worker threads (defaults to one per logical CPU)
    #[arg(short, long)]
    workers: Option<usize>,
}

/// `0..length` as `i64`, refusing lengths that do not fit.
fn synthetic_sequence(length: usize) -> Result<Vec<i64>, TryFromIntError> {
    let end = i64::try_from(length)?;
    Ok((0..end).collect())
}

fn main() -> Result<(), Box<dyn Error>> {
    threading_basics::init_logging("info");
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SumConfig::from_file(path)?,
        None => SumConfig::default(),
    }
    .with_overrides(args.length, args.workers)?;
    let workers = config.resolved_workers();

    log::info!("summing 0..{} with {} workers", config.length, workers);
    let data = synthetic_sequence(config.length)?;

    println!("{}\n", "=== Summing a Vector ===".bold());

    let start = Instant::now();
    let sum = naive_sum(&data);
    println!("Naive sum      = {} ({:?})", sum, start.elapsed());

    let start = Instant::now();
    let sum = accumulate_sum(&data);
    println!("Accumulate sum = {} ({:?})", sum, start.elapsed());

    println!("Logical CPUs   = {}", num_cpus::get());
    let start = Instant::now();
    let sum = reduce_sum(&data, workers)?;
    println!(
        "Threaded sum   = {} ({:?}, {} workers)",
        sum.to_string().green(),
        start.elapsed(),
        workers
    );

    println!("\n{}", "=== Key Points ===".bold());
    println!("1. Each worker borrows its own chunk through thread::scope, no Arc or clone");
    println!("2. Each worker writes one slot of the partial buffer, so no lock is needed");
    println!("3. The coordinator only reads partials after joining every worker");
    println!("4. A panicking worker surfaces as an error instead of a missing partial sum");

    Ok(())
}
