//! Result rows and their table / JSON rendering

use std::fmt::Write;
use std::time::Duration;

use memokit::StatsSnapshot;
use serde::Serialize;

/// One timed run
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub substrate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u64>,
    pub seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsSnapshot>,
}

impl Row {
    pub fn new(substrate: &str, n: Option<u64>, elapsed: Duration) -> Self {
        Self {
            substrate: substrate.to_string(),
            n,
            seconds: elapsed.as_secs_f64(),
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: StatsSnapshot) -> Self {
        self.stats = Some(stats);
        self
    }
}

/// All runs of one workload
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    workload: String,
    rows: Vec<Row>,
}

impl Report {
    pub fn new(workload: &str) -> Self {
        Self {
            workload: workload.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "workload: {}", self.workload);
        let _ = writeln!(
            out,
            "{:<15} {:>6} {:>12} {:>10} {:>10} {:>10}",
            "substrate", "n", "seconds", "hit ratio", "evictions", "flushes"
        );

        for row in self.rows() {
            let n = row.n.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
            let (ratio, evictions, flushes) = match &row.stats {
                Some(stats) => (
                    format!("{:.3}", stats.hit_ratio),
                    stats.evictions.to_string(),
                    stats.invalidations.to_string(),
                ),
                None => ("-".into(), "-".into(), "-".into()),
            };
            let _ = writeln!(
                out,
                "{:<15} {:>6} {:>12.6} {:>10} {:>10} {:>10}",
                row.substrate, n, row.seconds, ratio, evictions, flushes
            );
        }

        out
    }
}
