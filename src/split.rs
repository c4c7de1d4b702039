//! Ordered splits of an identifier's digits into directory levels
//!
//! A split like `[3, 2, 1]` maps the identifier `ejdqsc` onto the path
//! `ejd/qs/c`. Order matters: `[3, 2, 1]` and `[1, 2, 3]` are different
//! layouts.

use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest level accepted, the longest file name most filesystems allow (`NAME_MAX`)
pub const MAX_LEVEL_WIDTH: usize = 255;

/// One candidate sharding scheme: positive level widths summing to the id size
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Split(Vec<usize>);

impl Split {
    /// Build a split, rejecting empty splits, zero-width levels and levels
    /// wider than [`MAX_LEVEL_WIDTH`]
    pub fn new(parts: Vec<usize>) -> Result<Self> {
        if parts.is_empty() {
            return Err(SplitError::InvalidSplit(
                "split must have at least one level (sum must be >= 1)".to_string(),
            ));
        }
        if let Some(pos) = parts.iter().position(|&p| p == 0) {
            return Err(SplitError::InvalidSplit(format!(
                "level {} has width 0, every level must be >= 1",
                pos
            )));
        }
        if let Some(pos) = parts.iter().position(|&p| p > MAX_LEVEL_WIDTH) {
            return Err(SplitError::InvalidSplit(format!(
                "level {} has width {}, directory names are limited to {} bytes",
                pos, parts[pos], MAX_LEVEL_WIDTH
            )));
        }
        Ok(Split(parts))
    }

    /// Parse a `--split` override such as `[3,2,1]`
    ///
    /// # Example
    /// ```
    /// use id_splits::split::Split;
    ///
    /// let split = Split::from_json("[3, 2, 1]").unwrap();
    /// assert_eq!(split.id_size(), 6);
    /// assert!(Split::from_json("[0, 6]").is_err());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text.trim())
            .map_err(|e| SplitError::InvalidSplit(format!("{:?} is not valid JSON: {}", text, e)))?;

        let items = value.as_array().ok_or_else(|| {
            SplitError::InvalidSplit(format!("{:?} is not a JSON array", text))
        })?;

        let parts = items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        SplitError::InvalidSplit(format!(
                            "{} is not a positive integer in {:?}",
                            item, text
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Split::new(parts)
    }

    /// Level widths, leftmost (outermost directory) first
    pub fn parts(&self) -> &[usize] {
        &self.0
    }

    /// Number of directory levels
    pub fn levels(&self) -> usize {
        self.0.len()
    }

    /// Total digit count of identifiers laid out by this split
    pub fn id_size(&self) -> usize {
        self.0.iter().sum()
    }

    /// Slash-joined form used in CSV output, e.g. `3/2/1`
    pub fn slashed(&self) -> String {
        self.0
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl TryFrom<Vec<usize>> for Split {
    type Error = SplitError;

    fn try_from(parts: Vec<usize>) -> Result<Self> {
        Split::new(parts)
    }
}

impl From<Split> for Vec<usize> {
    fn from(split: Split) -> Self {
        split.0
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_accepts_array_of_positive_ints() {
        let split = Split::from_json("[3,2,1]").unwrap();
        assert_eq!(split.parts(), &[3, 2, 1]);
        assert_eq!(split.levels(), 3);
        assert_eq!(split.id_size(), 6);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(Split::from_json("3,3").is_err());
        assert!(Split::from_json("[3,").is_err());
        assert!(Split::from_json("{\"a\": 1}").is_err());
        assert!(Split::from_json("[\"3\"]").is_err());
        assert!(Split::from_json("[1.5, 2]").is_err());
        assert!(Split::from_json("[-1, 7]").is_err());
    }

    #[test]
    fn test_zero_sum_split_rejected() {
        assert!(Split::from_json("[]").is_err());
        assert!(Split::from_json("[0]").is_err());
        assert!(Split::new(vec![]).is_err());
    }

    #[test]
    fn test_level_wider_than_name_max_rejected() {
        assert!(Split::new(vec![MAX_LEVEL_WIDTH]).is_ok());
        assert!(Split::new(vec![2, MAX_LEVEL_WIDTH + 1]).is_err());

        let err = Split::from_json("[10000000000]").unwrap_err();
        assert!(err.to_string().contains("limited to 255 bytes"), "{}", err);
    }

    #[test]
    fn test_display_matches_report_format() {
        let split = Split::new(vec![1, 1, 2]).unwrap();
        assert_eq!(split.to_string(), "[1, 1, 2]");
        assert_eq!(split.slashed(), "1/1/2");
    }

    #[test]
    fn test_order_matters_for_identity() {
        let a = Split::new(vec![3, 2, 1]).unwrap();
        let b = Split::new(vec![1, 2, 3]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.id_size(), b.id_size());
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let split = Split::new(vec![2, 4]).unwrap();
        let json = serde_json::to_string(&split).unwrap();
        assert_eq!(json, "[2,4]");
        assert!(serde_json::from_str::<Split>("[0,4]").is_err());
    }
}
