//! Workload generation and timed replay

use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{bail, ensure, Context, Result};
use memokit::workload::{fibonacci, RangeSum, Span, MAX_FIBONACCI_N};
use memokit::{Memoizer, RecencyCache, SelfAdjustingTree, SharedMemo};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::report::{Report, Row};

/// Largest array element (inclusive)
const MAX_ELEMENT: u64 = 1000;

/// Parameters for the range-sum workload
#[derive(Debug, Clone)]
pub struct RangeSumConfig {
    pub size: usize,
    pub queries: usize,
    pub capacity: usize,
    pub update_ratio: f64,
    pub seed: u64,
}

/// Parameters for the Fibonacci workload
#[derive(Debug, Clone)]
pub struct FibonacciConfig {
    pub max: u64,
    pub step: u64,
    pub repeat: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Query {
    Range { left: usize, right: usize },
    Update { index: usize, value: u64 },
}

fn generate(config: &RangeSumConfig) -> (Vec<u64>, Vec<Query>) {
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let data = (0..config.size)
        .map(|_| rng.random_range(1..=MAX_ELEMENT))
        .collect();

    let queries = (0..config.queries)
        .map(|_| {
            if rng.random::<f64>() < config.update_ratio {
                Query::Update {
                    index: rng.random_range(0..config.size),
                    value: rng.random_range(1..=MAX_ELEMENT),
                }
            } else {
                let left = rng.random_range(0..config.size);
                let right = rng.random_range(left..config.size);
                Query::Range { left, right }
            }
        })
        .collect();

    (data, queries)
}

/// Replay `queries`, returning elapsed time and a checksum of every sum
fn replay<M>(sums: &mut RangeSum<M>, queries: &[Query], cached: bool) -> Result<(Duration, u64)>
where
    M: Memoizer<Span, u64>,
{
    let mut checksum = 0u64;
    let start = Instant::now();

    for query in queries {
        match *query {
            Query::Range { left, right } => {
                let sum = if cached {
                    sums.query(left, right)?
                } else {
                    sums.query_uncached(left, right)?
                };
                checksum = checksum.wrapping_add(black_box(sum));
            }
            Query::Update { index, value } => {
                if cached {
                    sums.update(index, value)?;
                } else {
                    sums.update_uncached(index, value)?;
                }
            }
        }
    }

    Ok((start.elapsed(), checksum))
}

/// Run the range-sum workload uncached, then through each memoizer
pub fn run_range_sum(config: &RangeSumConfig) -> Result<Report> {
    ensure!(config.size > 0, "array size must be greater than 0");

    let (data, queries) = generate(config);
    let updates = queries
        .iter()
        .filter(|q| matches!(q, Query::Update { .. }))
        .count();
    info!(
        size = config.size,
        queries = queries.len(),
        updates,
        "generated range-sum workload"
    );

    let cache: SharedMemo<Span, u64, _> = SharedMemo::new(
        RecencyCache::new(config.capacity).context("invalid recency cache capacity")?,
    );
    let tree: SharedMemo<Span, u64, _> = SharedMemo::new(SelfAdjustingTree::new());

    let mut report = Report::new("range-sum");

    let mut baseline = RangeSum::new(data.clone(), cache.clone());
    let (elapsed, expected) = replay(&mut baseline, &queries, false)?;
    info!(seconds = elapsed.as_secs_f64(), "uncached run finished");
    report.push(Row::new("uncached", None, elapsed));

    let mut via_cache = RangeSum::new(data.clone(), cache.clone());
    let (elapsed, checksum) = replay(&mut via_cache, &queries, true)?;
    verify("recency cache", expected, checksum)?;
    info!(seconds = elapsed.as_secs_f64(), "recency cache run finished");
    report.push(Row::new("recency cache", None, elapsed).with_stats(cache.stats().snapshot()));

    let mut via_tree = RangeSum::new(data, tree.clone());
    let (elapsed, checksum) = replay(&mut via_tree, &queries, true)?;
    verify("splay tree", expected, checksum)?;
    info!(seconds = elapsed.as_secs_f64(), "splay tree run finished");
    report.push(Row::new("splay tree", None, elapsed).with_stats(tree.stats().snapshot()));

    Ok(report)
}

fn verify(substrate: &str, expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        bail!(
            "{} produced checksum {} but the uncached run produced {}",
            substrate,
            actual,
            expected
        );
    }
    Ok(())
}

/// Time `repeat` evaluations of fib(n) against a fresh memoizer
fn time_fibonacci<M>(n: u64, repeat: u32, memo: &mut M) -> Result<Duration>
where
    M: Memoizer<u64, u128>,
{
    let start = Instant::now();
    for _ in 0..repeat {
        black_box(fibonacci(n, memo)?);
    }
    Ok(start.elapsed())
}

/// Evaluate Fibonacci numbers 0, step, 2*step, ..., max with each memoizer
pub fn run_fibonacci(config: &FibonacciConfig) -> Result<Report> {
    ensure!(config.step > 0, "step must be greater than 0");
    ensure!(
        config.max <= MAX_FIBONACCI_N,
        "max must be at most {} (larger values overflow u128)",
        MAX_FIBONACCI_N
    );

    let mut report = Report::new("fibonacci");
    // Room for every n up to max; the workload never evicts
    let capacity = usize::try_from(config.max + 1).context("max does not fit in usize")?;
    let step = usize::try_from(config.step).context("step does not fit in usize")?;

    for n in (0..=config.max).step_by(step) {
        let mut cache: SharedMemo<u64, u128, _> = SharedMemo::new(RecencyCache::new(capacity)?);
        let elapsed = time_fibonacci(n, config.repeat, &mut cache)?;
        report.push(Row::new("recency cache", Some(n), elapsed).with_stats(cache.stats().snapshot()));

        let mut tree: SharedMemo<u64, u128, _> = SharedMemo::new(SelfAdjustingTree::new());
        let elapsed = time_fibonacci(n, config.repeat, &mut tree)?;
        report.push(Row::new("splay tree", Some(n), elapsed).with_stats(tree.stats().snapshot()));

        debug!(n, "fibonacci evaluated");
    }

    info!(rows = report.len(), "fibonacci workload finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RangeSumConfig {
        RangeSumConfig {
            size: 200,
            queries: 500,
            capacity: 16,
            update_ratio: 0.2,
            seed: 7,
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let config = small_config();
        let (data_a, queries_a) = generate(&config);
        let (data_b, queries_b) = generate(&config);

        assert_eq!(data_a, data_b);
        assert_eq!(queries_a, queries_b);
        assert!(data_a.iter().all(|v| (1..=MAX_ELEMENT).contains(v)));
    }

    #[test]
    fn test_generated_queries_in_bounds() {
        let config = small_config();
        let (_, queries) = generate(&config);

        for query in queries {
            match query {
                Query::Range { left, right } => assert!(left <= right && right < config.size),
                Query::Update { index, .. } => assert!(index < config.size),
            }
        }
    }

    #[test]
    fn test_update_ratio_extremes() {
        let mut config = small_config();

        config.update_ratio = 0.0;
        let (_, queries) = generate(&config);
        assert!(queries.iter().all(|q| matches!(q, Query::Range { .. })));

        config.update_ratio = 1.0;
        let (_, queries) = generate(&config);
        assert!(queries.iter().all(|q| matches!(q, Query::Update { .. })));
    }

    #[test]
    fn test_run_range_sum_rows() {
        let report = run_range_sum(&small_config()).unwrap();

        assert_eq!(report.len(), 3);
        assert!(report.rows()[0].stats.is_none());
        assert!(report.rows()[1].stats.is_some());
    }

    #[test]
    fn test_run_range_sum_rejects_zero_capacity() {
        let mut config = small_config();
        config.capacity = 0;

        let err = run_range_sum(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("capacity"));
    }

    #[test]
    fn test_run_fibonacci_rows() {
        let config = FibonacciConfig {
            max: 40,
            step: 20,
            repeat: 3,
        };
        let report = run_fibonacci(&config).unwrap();

        // n = 0, 20, 40 with two substrates each
        assert_eq!(report.len(), 6);
        let stats = report.rows()[5].stats.unwrap();
        assert_eq!(stats.stores, 41);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_run_fibonacci_step_past_max() {
        let config = FibonacciConfig {
            max: 30,
            step: u64::from(u32::MAX),
            repeat: 1,
        };
        let report = run_fibonacci(&config).unwrap();

        // Only n = 0
        assert_eq!(report.len(), 2);
        assert_eq!(report.rows()[0].n, Some(0));
    }

    #[test]
    fn test_run_fibonacci_rejects_overflow() {
        let config = FibonacciConfig {
            max: MAX_FIBONACCI_N + 1,
            step: 1,
            repeat: 1,
        };
        assert!(run_fibonacci(&config).is_err());
    }
}
