//! CLI host for the leximin solver. Reads a CSV file in
//! the format documented on [`leximatch`], ingests and validates it, drives
//! the step machine to completion in batches, and prints the leximin-optimal
//! assignment(s). In the idiom of `vm_cli`'s offline deterministic
//! entrypoint: all the real work lives in the library; this file is parsing
//! arguments, logging progress, and formatting output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, warn};

use leximatch::ingest::read_csv_file;
use leximatch::prepare::seed;
use leximatch::step::StepMachine;

/// Compute a leximin-optimal assignment of people to positions from a CSV
/// preference table.
#[derive(Parser, Debug)]
#[command(name = "leximatch", version, about)]
struct Cli {
    /// Path to the input CSV file (see the `Courses` / `Number of slots` format).
    csv_path: PathBuf,

    /// Number of search steps to run per batch before reporting progress.
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Maximum number of tied assignments to print (0 = print all).
    #[arg(long, default_value_t = 0)]
    max_ties: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(msg) => {
            eprintln!("leximatch: error: {msg}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, String> {
    let (input, warnings) =
        read_csv_file(&cli.csv_path).map_err(|e| format!("reading {}: {e}", cli.csv_path.display()))?;

    for w in &warnings {
        warn!(?w, "ingestion warning");
    }

    let mut machine = StepMachine::new(seed(&input));
    let mut batches = 0usize;
    while !machine.finished() {
        let taken = machine.run_batch(cli.batch_size);
        batches += 1;
        debug!(batch = batches, steps = taken, "search progress");
    }
    info!(batches, "search complete");

    print_result(&machine, cli.max_ties);
    Ok(ExitCode::SUCCESS)
}

fn print_result(machine: &StepMachine, max_ties: usize) {
    let best = machine.result();
    match best.distribution() {
        None => {
            println!("No feasible assignment exists.");
        }
        Some(distribution) => {
            print!("Best distribution:");
            for (rank, count) in distribution.iter_worst_to_best() {
                print!(" {count}@rank{rank}");
            }
            println!();

            let tidied = best.tidy();
            let shown = if max_ties == 0 { tidied.len() } else { tidied.len().min(max_ties) };
            println!("{} tied assignment(s), showing {}:", tidied.len(), shown);
            for assignment in tidied.iter().take(shown) {
                for (person, (position, rank)) in assignment.iter() {
                    println!("  {person} -> {position} (rank {rank})");
                }
            }
        }
    }
}
