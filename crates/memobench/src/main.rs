//! memobench - compare LRU and splay tree memoization on reference workloads

mod report;
mod runner;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::Report;
use crate::runner::{FibonacciConfig, RangeSumConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Random range-sum queries interleaved with point updates
    RangeSum {
        /// Array length
        #[arg(short = 'n', long, default_value_t = 100_000)]
        size: usize,

        /// Number of queries (ranges plus updates)
        #[arg(short, long, default_value_t = 50_000)]
        queries: usize,

        /// Recency cache capacity (number of sums)
        #[arg(short, long, default_value_t = 1000)]
        capacity: usize,

        /// Fraction of queries that are updates
        #[arg(short, long, default_value_t = 0.5)]
        update_ratio: f64,

        /// RNG seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },

    /// Memoized recursive Fibonacci
    Fibonacci {
        /// Largest n to evaluate
        #[arg(short, long, default_value_t = 180)]
        max: u64,

        /// Distance between evaluated n
        #[arg(short, long, default_value_t = 10)]
        step: u64,

        /// Evaluations per n (the memoizer stays warm across them)
        #[arg(short, long, default_value_t = 10)]
        repeat: u32,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("memobench v{}", env!("CARGO_PKG_VERSION"));

    let report = match args.command {
        Command::RangeSum {
            size,
            queries,
            capacity,
            update_ratio,
            seed,
        } => {
            ensure!(
                (0.0..=1.0).contains(&update_ratio),
                "update ratio must be within [0, 1], got {}",
                update_ratio
            );
            let config = RangeSumConfig {
                size,
                queries,
                capacity,
                update_ratio,
                seed,
            };
            runner::run_range_sum(&config)?
        }
        Command::Fibonacci { max, step, repeat } => {
            let config = FibonacciConfig { max, step, repeat };
            runner::run_fibonacci(&config)?
        }
    };

    print(&report, args.json)
}

/// Filter from `RUST_LOG` directives, falling back to `info`
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_table());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_honors_directives() {
        let filter = log_filter(Some("debug".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some(String::new())).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
