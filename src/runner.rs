//! One complete measurement run
//!
//! splits -> sampler -> harness -> averages. The caller renders the result.

use crate::alphabet::NameCache;
use crate::config::RunConfig;
use crate::error::Result;
use crate::fs_ops::{Filesystem, NativeFs};
use crate::harness::{TimingHarness, Timings};
use crate::partition::all_splits;
use crate::progress::ProgressSink;
use crate::report::RunSummary;
use crate::sampler::SplitSampler;
use crate::split::Split;
use crate::stats::{averages, AverageTable};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Keeps the split-order shuffle independent of the name shuffles
const SPLIT_ORDER_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything a run produces
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// Splits in the order they were timed
    pub splits: Vec<Split>,
    pub timings: Timings,
    pub averages: AverageTable,
}

/// Effective settings for the startup block
pub fn summary(config: &RunConfig, seed: u64) -> RunSummary {
    RunSummary {
        all_max: config.all_max,
        sample_max: config.sample_max,
        id_size: config.effective_id_size(),
        seed,
    }
}

/// The override split alone, or every split of `id_size` in shuffled order
pub fn plan_splits(config: &RunConfig, seed: u64) -> Result<Vec<Split>> {
    if let Some(split) = &config.split {
        return Ok(vec![split.clone()]);
    }
    let mut splits = all_splits(config.id_size)?;
    let mut rng = StdRng::seed_from_u64(seed ^ SPLIT_ORDER_SALT);
    splits.shuffle(&mut rng);
    Ok(splits)
}

/// Run against the real filesystem
pub fn run(config: &RunConfig, seed: u64, progress: &mut dyn ProgressSink) -> Result<RunOutcome> {
    run_with(NativeFs, config, seed, progress)
}

/// Run with the given filesystem primitives
pub fn run_with<F: Filesystem>(
    fs: F,
    config: &RunConfig,
    seed: u64,
    progress: &mut dyn ProgressSink,
) -> Result<RunOutcome> {
    config.validate()?;
    let splits = plan_splits(config, seed)?;
    tracing::info!(
        splits = splits.len(),
        id_size = config.effective_id_size(),
        all_max = config.all_max,
        sample_max = config.sample_max,
        seed,
        "starting run"
    );

    let sampler = SplitSampler::new(
        fs,
        config.scratch_root.clone(),
        NameCache::new(seed),
        config.limits(),
    );
    let mut harness = TimingHarness::with_sub_ids(sampler, config.sub_ids);
    let timings = harness.gather_times(&splits, progress)?;
    let averages = averages(&timings);

    Ok(RunOutcome {
        summary: summary(config, seed),
        splits,
        timings,
        averages,
    })
}
