//! Ranked listings of the average table
//!
//! Text output, e.g.:
//!
//! ```text
//!     make 0.0000213 <-- [2, 2, 2]
//!     make 0.0000240 <-- [3, 3]
//! ```

use crate::harness::Timings;
use crate::split::Split;
use crate::stats::{extended_stats, AverageTable, Metric};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Effective settings echoed before and with the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub all_max: usize,
    pub sample_max: usize,
    pub id_size: usize,
    pub seed: u64,
}

/// `all_max=`, `sample_max=`, `id_size=`, `seed=` lines and a blank line
pub fn startup_block(summary: &RunSummary) -> String {
    format!(
        "all_max={}\nsample_max={}\nid_size={}\nseed={}\n\n",
        summary.all_max, summary.sample_max, summary.id_size, summary.seed
    )
}

/// One report line: label right-aligned in 8 columns, 7-decimal seconds
pub fn format_line(metric: Metric, mean_secs: f64, split: &Split) -> String {
    format!("{:>8} {:.7} <-- {}", metric.label(), mean_secs, split)
}

/// Every metric's ranking, fastest split first
pub fn render_text(table: &AverageTable) -> String {
    let mut out = String::from("\n");
    for metric in Metric::ALL {
        for (split, mean) in table.ranked(metric) {
            out.push_str(&format_line(metric, mean, split));
            out.push('\n');
        }
    }
    out.push('\n');
    out
}

/// `metric,split,mean_secs` rows in ranked order
pub fn render_csv(table: &AverageTable) -> String {
    let mut out = String::from("metric,split,mean_secs\n");
    for metric in Metric::ALL {
        for (split, mean) in table.ranked(metric) {
            let _ = writeln!(out, "{},{},{:.7}", metric.label(), split.slashed(), mean);
        }
    }
    out
}

/// A ranked entry in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRanking {
    pub split: Split,
    pub mean_secs: f64,
}

/// One metric's ranking in the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMetric {
    pub metric: Metric,
    pub ranking: Vec<JsonRanking>,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub config: RunSummary,
    pub metrics: Vec<JsonMetric>,
}

impl JsonReport {
    pub fn new(summary: &RunSummary, table: &AverageTable) -> Self {
        let metrics = Metric::ALL
            .iter()
            .map(|&metric| JsonMetric {
                metric,
                ranking: table
                    .ranked(metric)
                    .into_iter()
                    .map(|(split, mean_secs)| JsonRanking {
                        split: split.clone(),
                        mean_secs,
                    })
                    .collect(),
            })
            .collect();
        Self {
            config: summary.clone(),
            metrics,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Overall-metric spread per split, in timing order
pub fn render_extended(times: &Timings) -> String {
    let mut out = String::from("=== Extended Statistics (overall, μs) ===\n");
    for split in times.splits() {
        if let Some(stats) = extended_stats(&times.all_durations(split)) {
            let _ = writeln!(
                out,
                "{:>20}  mean {:>9.2}  stddev {:>9.2}  min {:>9.2}  max {:>9.2}  p50 {:>9.2}  p90 {:>9.2}  p99 {:>9.2}",
                split.to_string(),
                stats.mean,
                stats.stddev,
                stats.min,
                stats.max,
                stats.median,
                stats.p90,
                stats.p99
            );
        }
    }
    out
}
