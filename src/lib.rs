//! id-splits - which directory layout is fastest for fixed-length IDs?
//!
//! Given an identifier of N digits over a 62-symbol alphabet, this crate
//! enumerates every ordered way to split those digits into nested
//! directories (`ejdqsc` -> `ejd/qsc`, `ej/dq/sc`, `e/j/d/q/s/c`, ...),
//! materializes a bounded sample of each layout on disk, and times
//! make/exists/write/read against it.
//!
//! Fewer levels means fewer directories to walk but more entries per
//! directory; more levels means the opposite. The ranked report helps a
//! human choose; nothing here picks a layout automatically.

pub mod alphabet;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs_ops;
pub mod harness;
pub mod partition;
pub mod progress;
pub mod report;
pub mod runner;
pub mod sampler;
pub mod split;
pub mod stats;

pub use error::{Result, SplitError};
