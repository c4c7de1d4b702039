//! Timing of make/exists/write/read under sampled leaf directories
//!
//! Strictly sequential: concurrent I/O would pollute the latencies being
//! measured. Any wrong outcome aborts the whole run.

use crate::error::{Result, SplitError};
use crate::fs_ops::Filesystem;
use crate::progress::ProgressSink;
use crate::sampler::{SplitSampler, MARKER_FILE};
use crate::split::Split;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

/// Token repeated to build the timed payload
pub const PAYLOAD_TOKEN: &str = "hello";

/// Repetitions of [`PAYLOAD_TOKEN`] in the payload
pub const PAYLOAD_REPEAT: usize = 500;

/// Sub-identifiers `0..SUB_IDS` are timed under every sample directory
pub const SUB_IDS: usize = 11;

/// The 2500-byte payload written and read back by the harness
pub fn payload() -> Vec<u8> {
    PAYLOAD_TOKEN.repeat(PAYLOAD_REPEAT).into_bytes()
}

/// Timed filesystem operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Make,
    Exists,
    Write,
    Read,
}

impl Operation {
    /// Execution order within one sub-path
    pub const ALL: [Operation; 4] = [
        Operation::Make,
        Operation::Exists,
        Operation::Write,
        Operation::Read,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Make => "make",
            Operation::Exists => "exists",
            Operation::Write => "write",
            Operation::Read => "read",
        }
    }

    /// Position in [`Operation::ALL`]
    fn index(self) -> usize {
        match self {
            Operation::Make => 0,
            Operation::Exists => 1,
            Operation::Write => 2,
            Operation::Read => 3,
        }
    }
}

/// One raw observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    pub operation: Operation,
    pub split: Split,
    pub elapsed: Duration,
}

/// Append-only durations keyed by split, then operation
#[derive(Debug, Default, Clone)]
pub struct Timings {
    /// Splits in the order they were timed
    splits: Vec<Split>,
    /// Per split, durations indexed by [`Operation::index`]
    samples: HashMap<Split, [Vec<Duration>; 4]>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation
    pub fn record(&mut self, record: TimingRecord) {
        let per_op = match self.samples.entry(record.split) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.splits.push(entry.key().clone());
                entry.insert(Default::default())
            }
        };
        per_op[record.operation.index()].push(record.elapsed);
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// Durations for one operation on one split, in recording order
    pub fn durations(&self, operation: Operation, split: &Split) -> &[Duration] {
        self.samples
            .get(split)
            .map(|per_op| per_op[operation.index()].as_slice())
            .unwrap_or(&[])
    }

    /// All four operations' durations for `split`, concatenated
    pub fn all_durations(&self, split: &Split) -> Vec<Duration> {
        Operation::ALL
            .iter()
            .flat_map(|&op| self.durations(op, split).iter().copied())
            .collect()
    }

    /// Total observations across every key
    pub fn len(&self) -> usize {
        self.samples.values().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run `f`, returning its elapsed monotonic time with its result
pub fn timed<T>(f: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let result = f();
    (start.elapsed(), result)
}

/// Samples each split and times the four primitives on it
pub struct TimingHarness<F: Filesystem> {
    sampler: SplitSampler<F>,
    sub_ids: usize,
    payload: Vec<u8>,
}

impl<F: Filesystem> TimingHarness<F> {
    pub fn new(sampler: SplitSampler<F>) -> Self {
        Self::with_sub_ids(sampler, SUB_IDS)
    }

    /// Harness timing `sub_ids` sub-paths per sample directory
    pub fn with_sub_ids(sampler: SplitSampler<F>, sub_ids: usize) -> Self {
        Self {
            sampler,
            sub_ids,
            payload: payload(),
        }
    }

    /// Sample and time every split in order
    pub fn gather_times(
        &mut self,
        splits: &[Split],
        progress: &mut dyn ProgressSink,
    ) -> Result<Timings> {
        let mut timings = Timings::new();
        for split in splits {
            self.time_split(split, &mut timings, progress)?;
        }
        Ok(timings)
    }

    fn time_split(
        &mut self,
        split: &Split,
        timings: &mut Timings,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let sample = self.sampler.sample_dirs(split, progress)?;
        let before = timings.len();

        for dir in sample.paths() {
            for n in 0..self.sub_ids {
                let sub = dir.join(n.to_string());
                for operation in Operation::ALL {
                    let elapsed = self.time_operation(operation, &sub)?;
                    timings.record(TimingRecord {
                        operation,
                        split: split.clone(),
                        elapsed,
                    });
                }
            }
        }

        tracing::info!(
            %split,
            dirs = sample.len(),
            observations = timings.len() - before,
            "timed split"
        );
        Ok(())
    }

    /// Time one primitive on `sub` and check its outcome
    fn time_operation(&self, operation: Operation, sub: &Path) -> Result<Duration> {
        let fs = self.sampler.fs();
        match operation {
            Operation::Make => {
                let (elapsed, result) = timed(|| fs.make_dir(sub));
                result.map_err(|e| SplitError::io("make", sub, e))?;
                Ok(elapsed)
            }
            Operation::Exists => {
                let (elapsed, exists) = timed(|| fs.is_dir(sub));
                if !exists {
                    return Err(SplitError::Mismatch {
                        op: "exists?",
                        path: sub.to_path_buf(),
                        expected: "true".to_string(),
                        actual: "false".to_string(),
                    });
                }
                Ok(elapsed)
            }
            Operation::Write => {
                let file = sub.join(MARKER_FILE);
                let (elapsed, result) = timed(|| fs.write(&file, &self.payload));
                let written = result.map_err(|e| SplitError::io("write", &file, e))?;
                if written != self.payload.len() {
                    return Err(SplitError::Mismatch {
                        op: "write",
                        path: file,
                        expected: self.payload.len().to_string(),
                        actual: written.to_string(),
                    });
                }
                Ok(elapsed)
            }
            Operation::Read => {
                let file = sub.join(MARKER_FILE);
                let (elapsed, result) = timed(|| fs.read(&file));
                let content = result.map_err(|e| SplitError::io("read", &file, e))?;
                if content != self.payload {
                    return Err(SplitError::Mismatch {
                        op: "read",
                        path: file,
                        expected: format!("{:?} x {}", PAYLOAD_TOKEN, PAYLOAD_REPEAT),
                        actual: describe_content(&content),
                    });
                }
                Ok(elapsed)
            }
        }
    }
}

/// Short human-readable summary of unexpected file content
fn describe_content(content: &[u8]) -> String {
    const PREVIEW: usize = 32;
    let text = String::from_utf8_lossy(&content[..content.len().min(PREVIEW)]);
    if content.len() > PREVIEW {
        format!("{:?}... ({} bytes)", text, content.len())
    } else {
        format!("{:?} ({} bytes)", text, content.len())
    }
}
