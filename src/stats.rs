//! Per-split averages of raw timings
//!
//! Means are computed in `f64` seconds straight from `Duration`s. The
//! optional spread statistics use Trueno vectors over microseconds.

use crate::harness::{Operation, Timings};
use crate::split::Split;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Reported metric: one per operation plus the combined one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Make,
    Exists,
    Read,
    Write,
    Overall,
}

impl Metric {
    /// Report order
    pub const ALL: [Metric; 5] = [
        Metric::Make,
        Metric::Exists,
        Metric::Read,
        Metric::Write,
        Metric::Overall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Make => "make",
            Metric::Exists => "exists",
            Metric::Read => "read",
            Metric::Write => "write",
            Metric::Overall => "overall",
        }
    }

    /// The single operation behind this metric, `None` for overall
    pub fn operation(self) -> Option<Operation> {
        match self {
            Metric::Make => Some(Operation::Make),
            Metric::Exists => Some(Operation::Exists),
            Metric::Read => Some(Operation::Read),
            Metric::Write => Some(Operation::Write),
            Metric::Overall => None,
        }
    }
}

/// Arithmetic mean in seconds; `None` for an empty list
pub fn mean_secs(durations: &[Duration]) -> Option<f64> {
    if durations.is_empty() {
        return None;
    }
    let total: f64 = durations.iter().map(Duration::as_secs_f64).sum();
    Some(total / durations.len() as f64)
}

/// Mean duration per (metric, split), recomputed from scratch each run
#[derive(Debug, Default, Clone)]
pub struct AverageTable {
    means: BTreeMap<Metric, BTreeMap<Split, f64>>,
}

impl AverageTable {
    pub fn mean(&self, metric: Metric, split: &Split) -> Option<f64> {
        self.means.get(&metric)?.get(split).copied()
    }

    /// Splits for `metric`, fastest first; ties keep split order
    pub fn ranked(&self, metric: Metric) -> Vec<(&Split, f64)> {
        let mut ranked: Vec<(&Split, f64)> = self
            .means
            .get(&metric)
            .map(|m| m.iter().map(|(s, &t)| (s, t)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.means.values().all(BTreeMap::is_empty)
    }

    fn insert(&mut self, metric: Metric, split: &Split, mean: f64) {
        self.means
            .entry(metric)
            .or_default()
            .insert(split.clone(), mean);
    }
}

/// Averages per operation plus an overall mean over all four operations
pub fn averages(times: &Timings) -> AverageTable {
    let mut table = AverageTable::default();
    for split in times.splits() {
        for metric in Metric::ALL {
            let mean = match metric.operation() {
                Some(op) => mean_secs(times.durations(op, split)),
                None => mean_secs(&times.all_durations(split)),
            };
            if let Some(mean) = mean {
                table.insert(metric, split, mean);
            }
        }
    }
    table
}

/// Spread of one split's durations, in microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedStats {
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32, // P50
    pub p90: f32,
    pub p99: f32,
}

/// Calculate percentile from sorted data
fn calculate_percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Spread statistics using Trueno; `None` for an empty list
pub fn extended_stats(durations: &[Duration]) -> Option<ExtendedStats> {
    if durations.is_empty() {
        return None;
    }
    let micros: Vec<f32> = durations
        .iter()
        .map(|d| (d.as_secs_f64() * 1e6) as f32)
        .collect();
    let v = trueno::Vector::from_slice(&micros);

    let mut sorted = micros.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(ExtendedStats {
        mean: v.mean().unwrap_or(0.0),
        stddev: v.stddev().unwrap_or(0.0),
        min: v.min().unwrap_or(0.0),
        max: v.max().unwrap_or(0.0),
        median: calculate_percentile(&sorted, 50.0),
        p90: calculate_percentile(&sorted, 90.0),
        p99: calculate_percentile(&sorted, 99.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::TimingRecord;

    fn record(timings: &mut Timings, op: Operation, split: &Split, micros: u64) {
        timings.record(TimingRecord {
            operation: op,
            split: split.clone(),
            elapsed: Duration::from_micros(micros),
        });
    }

    #[test]
    fn test_mean_secs() {
        assert_eq!(mean_secs(&[]), None);
        let mean = mean_secs(&[Duration::from_millis(1), Duration::from_millis(3)]).unwrap();
        assert!((mean - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_overall_combines_all_operations() {
        let split = Split::new(vec![3, 3]).unwrap();
        let mut timings = Timings::new();
        record(&mut timings, Operation::Make, &split, 10);
        record(&mut timings, Operation::Exists, &split, 20);
        record(&mut timings, Operation::Write, &split, 30);
        record(&mut timings, Operation::Read, &split, 40);
        record(&mut timings, Operation::Read, &split, 60);

        let table = averages(&timings);
        let read = table.mean(Metric::Read, &split).unwrap();
        assert!((read - 50e-6).abs() < 1e-12);
        let overall = table.mean(Metric::Overall, &split).unwrap();
        assert!((overall - 32e-6).abs() < 1e-12);
    }

    #[test]
    fn test_ranked_is_ascending() {
        let fast = Split::new(vec![1, 1]).unwrap();
        let slow = Split::new(vec![2]).unwrap();
        let mut timings = Timings::new();
        record(&mut timings, Operation::Make, &slow, 90);
        record(&mut timings, Operation::Make, &fast, 10);

        let table = averages(&timings);
        let ranked = table.ranked(Metric::Make);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, &fast);
        assert_eq!(ranked[1].0, &slow);
        assert!(table.ranked(Metric::Write).is_empty());
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(calculate_percentile(&sorted, 0.0), 1.0);
        assert_eq!(calculate_percentile(&sorted, 100.0), 4.0);
        assert!((calculate_percentile(&sorted, 50.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_extended_stats_bounds() {
        let durations: Vec<Duration> = [10, 20, 30, 40].iter().map(|&u| Duration::from_micros(u)).collect();
        let stats = extended_stats(&durations).unwrap();
        assert!((stats.mean - 25.0).abs() < 0.01);
        assert!((stats.min - 10.0).abs() < 0.01);
        assert!((stats.max - 40.0).abs() < 0.01);
        assert!(stats.stddev > 0.0);
        assert!(extended_stats(&[]).is_none());
    }
}
