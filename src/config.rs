//! Run configuration
//!
//! Everything tunable about one measurement run. Validation happens before
//! any filesystem work.

use crate::cli::Cli;
use crate::error::{Result, SplitError};
use crate::fs_ops::check_scratch_root;
use crate::harness::SUB_IDS;
use crate::sampler::SampleLimits;
use crate::split::Split;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Configuration for one measurement run
///
/// # Example
/// ```
/// use id_splits::config::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.all_max, 2000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Digits in the identifier; ignored when `split` is set
    pub id_size: usize,

    /// Most directories created per parent at each level
    ///
    /// A `5/1` split over 62 symbols could create 62^5 first-level
    /// directories; `all_max` caps that. Larger values fill the disk faster.
    pub all_max: usize,

    /// Directories kept alive per level as parents for the next level
    pub sample_max: usize,

    /// Time only this split instead of enumerating all of them
    pub split: Option<Split>,

    /// Fixed shuffle seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,

    /// Scratch directory, wiped before every split
    pub scratch_root: PathBuf,

    /// Sub-identifiers timed under each sampled leaf
    pub sub_ids: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let limits = SampleLimits::default();
        Self {
            id_size: 6,
            all_max: limits.all_max,
            sample_max: limits.sample_max,
            split: None,
            seed: None,
            scratch_root: std::env::temp_dir().join("id_splits"),
            sub_ids: SUB_IDS,
        }
    }
}

impl RunConfig {
    /// Build from parsed arguments; a malformed `--split` fails here
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let split = cli.split.as_deref().map(Split::from_json).transpose()?;
        let defaults = Self::default();
        Ok(Self {
            id_size: cli.id_size,
            all_max: cli.all_max,
            sample_max: cli.sample_max,
            split,
            seed: cli.seed,
            scratch_root: cli
                .scratch_root
                .clone()
                .unwrap_or(defaults.scratch_root),
            sub_ids: defaults.sub_ids,
        })
    }

    /// Identifier length actually measured
    pub fn effective_id_size(&self) -> usize {
        self.split
            .as_ref()
            .map(Split::id_size)
            .unwrap_or(self.id_size)
    }

    /// The configured seed, or one derived from the wall clock
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    pub fn limits(&self) -> SampleLimits {
        SampleLimits {
            all_max: self.all_max,
            sample_max: self.sample_max,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.effective_id_size() == 0 {
            return Err(SplitError::InvalidConfig(
                "id_size must be >= 1".to_string(),
            ));
        }

        if self.all_max == 0 {
            return Err(SplitError::InvalidConfig(format!(
                "all_max must be >= 1, got {}",
                self.all_max
            )));
        }

        if self.sample_max == 0 {
            return Err(SplitError::InvalidConfig(format!(
                "sample_max must be >= 1, got {}",
                self.sample_max
            )));
        }

        if self.sub_ids == 0 {
            return Err(SplitError::InvalidConfig(
                "sub_ids must be >= 1".to_string(),
            ));
        }

        // The scratch root is deleted recursively before every split
        check_scratch_root(&self.scratch_root)
            .map_err(|e| SplitError::InvalidConfig(format!("unsafe scratch_root: {}", e)))?;

        Ok(())
    }
}
