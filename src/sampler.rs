//! Bounded sampling of the directory tree a split would produce
//!
//! For split `[3, 3]` with `all_max = 1000` and `sample_max = 5` the first
//! level creates 1000 three-digit directories, keeps 5 of them alive, and
//! the second level creates 1000 children under each of those 5. Only the
//! 25 leaves whose last segment is a sampled name survive to be timed:
//!
//! ```text
//! 000/000, 000/001, ... 000/004
//! ...
//! 004/000, 004/001, ... 004/004   (ignoring the shuffle)
//! ```
//!
//! Every level creates its full fan-out so the directory count matches a
//! real store's, while the carried set stays at `sample_max` per parent.

use crate::alphabet::NameCache;
use crate::error::{Result, SplitError};
use crate::fs_ops::Filesystem;
use crate::progress::{ProgressSink, Stage};
use crate::split::Split;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the marker file placed in every sampled leaf
pub const MARKER_FILE: &str = "info.txt";

/// Content of the marker file
pub const MARKER_CONTENT: &[u8] = b"hello";

/// Caps applied at every level of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    /// Most names generated (and directories created per parent) at a level
    pub all_max: usize,
    /// Most names at a level whose directories are carried to the next level
    pub sample_max: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            all_max: 2000,
            sample_max: 3,
        }
    }
}

/// A directory below the scratch root, one name segment per level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DirPath {
    segments: Vec<String>,
}

impl DirPath {
    /// The scratch root itself (zero segments)
    pub fn root() -> Self {
        Self::default()
    }

    /// This path with `name` appended as a new level
    pub fn child(&self, name: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Final segment, `None` at the root
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Absolute location under `root`
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

/// Leaf directories of one split that exist on disk and hold a marker file
#[derive(Debug, Clone)]
pub struct Sample {
    root: PathBuf,
    split: Split,
    dirs: Vec<DirPath>,
    /// Directories created at each level, leftmost first
    created_per_level: Vec<usize>,
}

impl Sample {
    pub fn split(&self) -> &Split {
        &self.split
    }

    pub fn dirs(&self) -> &[DirPath] {
        &self.dirs
    }

    /// Absolute paths of the sampled leaves
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.dirs.iter().map(|d| d.under(&self.root))
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn created_per_level(&self) -> &[usize] {
        &self.created_per_level
    }

    /// Total directories created for this split
    pub fn created_total(&self) -> usize {
        self.created_per_level.iter().sum()
    }
}

/// Builds a bounded, on-disk sample of a split's directory tree
pub struct SplitSampler<F: Filesystem> {
    fs: F,
    root: PathBuf,
    names: NameCache,
    limits: SampleLimits,
}

impl<F: Filesystem> SplitSampler<F> {
    /// Sampler that owns `root` and draws names from `names`
    pub fn new(fs: F, root: impl Into<PathBuf>, names: NameCache, limits: SampleLimits) -> Self {
        Self {
            fs,
            root: root.into(),
            names,
            limits,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Wipe the scratch root and materialize a sample for `split`
    pub fn sample_dirs(&mut self, split: &Split, progress: &mut dyn ProgressSink) -> Result<Sample> {
        if self.limits.all_max == 0 || self.limits.sample_max == 0 {
            return Err(SplitError::InvalidConfig(format!(
                "all_max ({}) and sample_max ({}) must both be >= 1",
                self.limits.all_max, self.limits.sample_max
            )));
        }

        self.fs
            .reset(&self.root)
            .map_err(|e| SplitError::io("reset", &self.root, e))?;
        progress.begin_split(split);
        tracing::info!(%split, root = %self.root.display(), "sampling split");

        let mut carried = vec![DirPath::root()];
        let mut created_per_level = Vec::with_capacity(split.levels());

        for (index, &digits) in split.parts().iter().enumerate() {
            progress.begin_level(index, digits);

            let rhs = self.names.names(digits, self.limits.all_max)?;
            let all_dirs = splice_dirs(&carried, rhs, progress);
            make_dirs(&self.fs, &self.root, &all_dirs, progress)?;

            let sample_names: HashSet<&str> = rhs
                .iter()
                .take(self.limits.sample_max)
                .map(String::as_str)
                .collect();
            created_per_level.push(all_dirs.len());
            carried = all_dirs
                .into_iter()
                .filter(|dir| dir.last().is_some_and(|name| sample_names.contains(name)))
                .collect();

            tracing::debug!(
                level = index,
                digits,
                names = rhs.len(),
                created = created_per_level[index],
                carried = carried.len(),
                "level sampled"
            );
        }

        write_markers(&self.fs, &self.root, &carried, progress)?;

        let sample = Sample {
            root: self.root.clone(),
            split: split.clone(),
            dirs: carried,
            created_per_level,
        };
        progress.end_split(&sample);
        Ok(sample)
    }
}

/// Cartesian product: every carried path extended by every name
fn splice_dirs(lhs: &[DirPath], rhs: &[String], progress: &mut dyn ProgressSink) -> Vec<DirPath> {
    let total = lhs.len() * rhs.len();
    let mut all = Vec::with_capacity(total);
    progress.update(Stage::Splice, 0, total);
    for parent in lhs {
        for name in rhs {
            all.push(parent.child(name));
            progress.update(Stage::Splice, all.len(), total);
        }
    }
    all
}

fn make_dirs<F: Filesystem>(
    fs: &F,
    root: &Path,
    dirs: &[DirPath],
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    progress.update(Stage::MakeDirs, 0, dirs.len());
    for (i, dir) in dirs.iter().enumerate() {
        let path = dir.under(root);
        fs.make_dir(&path)
            .map_err(|e| SplitError::io("mkdir", path, e))?;
        progress.update(Stage::MakeDirs, i + 1, dirs.len());
    }
    Ok(())
}

fn write_markers<F: Filesystem>(
    fs: &F,
    root: &Path,
    dirs: &[DirPath],
    progress: &mut dyn ProgressSink,
) -> Result<()> {
    progress.update(Stage::WriteFiles, 0, dirs.len());
    for (i, dir) in dirs.iter().enumerate() {
        let path = dir.under(root).join(MARKER_FILE);
        let written = fs
            .write(&path, MARKER_CONTENT)
            .map_err(|e| SplitError::io("write", &path, e))?;
        if written != MARKER_CONTENT.len() {
            return Err(SplitError::Mismatch {
                op: "write",
                path,
                expected: MARKER_CONTENT.len().to_string(),
                actual: written.to_string(),
            });
        }
        progress.update(Stage::WriteFiles, i + 1, dirs.len());
    }
    Ok(())
}
