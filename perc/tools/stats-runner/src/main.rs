#![forbid(unsafe_code)]

use clap::Parser;
use log::LevelFilter;
use perc::{ExperimentConfig, PercolationStats};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Estimates the percolation threshold of an N-by-N grid.
#[derive(Parser, Debug)]
#[command(name = "perc-stats")]
struct Args {
    /// Side length of the grid.
    size: usize,

    /// Number of independent trials.
    trials: usize,

    /// Base seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut config = ExperimentConfig::new(args.size, args.trials);
    config.seed = args.seed;
    config.threads = args.threads;

    let stats = PercolationStats::with_config(&config)?;
    print!("{stats}");

    Ok(())
}
