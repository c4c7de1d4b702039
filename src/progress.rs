//! Progress reporting for the bulk sampling stages
//!
//! The sampler only calls hooks; rendering is the caller's choice.

use crate::sampler::Sample;
use crate::split::Split;
use std::io::Write;

/// Bulk stage being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Joining carried paths with the level's names
    Splice,
    /// Creating every directory of the level
    MakeDirs,
    /// Writing marker files into the final sample
    WriteFiles,
}

impl Stage {
    /// Single-letter tag used by the console renderer
    pub fn tag(self) -> char {
        match self {
            Stage::Splice => 'S',
            Stage::MakeDirs => 'M',
            Stage::WriteFiles => 'W',
        }
    }
}

/// Receives sampling progress; every hook defaults to doing nothing
pub trait ProgressSink {
    fn begin_split(&mut self, _split: &Split) {}

    fn begin_level(&mut self, _index: usize, _digits: usize) {}

    /// `count` items of `total` done in `stage` (`count` starts at 0)
    fn update(&mut self, _stage: Stage, _count: usize, _total: usize) {}

    fn end_split(&mut self, _sample: &Sample) {}
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Integer percent of `count` over `total`; an empty stage is complete
pub fn percent(count: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        count.saturating_mul(100) / total
    }
}

/// Draws ` S: 42%` style counters on a terminal, overwriting in place
pub struct ConsoleProgress<W: Write> {
    out: W,
    stage: Option<Stage>,
    last_text: String,
}

impl ConsoleProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stage: None,
            last_text: String::new(),
        }
    }

    /// Consume the renderer, returning its writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        // Progress is cosmetic; a broken terminal must not abort the run.
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn begin_split(&mut self, split: &Split) {
        self.stage = None;
        let text = format!("{:>20} ", split.to_string());
        self.emit(&text);
    }

    fn begin_level(&mut self, index: usize, digits: usize) {
        self.stage = None;
        let text = format!(" L{}({})", index, digits);
        self.emit(&text);
    }

    fn update(&mut self, stage: Stage, count: usize, total: usize) {
        let text = format!(" {}:{:>3}%", stage.tag(), percent(count, total));
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            self.emit(&text);
        } else if text != self.last_text {
            let erase = "\u{8}".repeat(self.last_text.len());
            self.emit(&format!("{}{}", erase, text));
        }
        self.last_text = text;
    }

    fn end_split(&mut self, sample: &Sample) {
        let example = sample
            .paths()
            .nth(1)
            .or_else(|| sample.paths().next())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.stage = None;
        let text = format!("({}) {}\n", sample.len(), example);
        self.emit(&text);
    }
}
