//! Fixed-width directory names over a 62-symbol alphabet
//!
//! `names(2, cap)` yields up to `"00".."ZZ"` in shuffled order. The shuffle
//! stands in for random sampling: later stages always take a prefix.

use crate::error::{Result, SplitError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

/// Digit symbols in ascending value order
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of symbols in [`ALPHABET`]
pub const BASE: u64 = ALPHABET.len() as u64;

/// Render `n` in base 62, left-padded with `'0'` to `digits` characters
///
/// # Example
/// ```
/// use id_splits::alphabet::encode;
///
/// assert_eq!(encode(0, 3), "000");
/// assert_eq!(encode(61, 2), "0Z");
/// assert_eq!(encode(62, 2), "10");
/// ```
pub fn encode(mut n: u64, digits: usize) -> String {
    let mut reversed = Vec::with_capacity(digits.max(1));
    loop {
        reversed.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
        if n == 0 {
            break;
        }
    }
    while reversed.len() < digits {
        reversed.push(ALPHABET[0]);
    }
    reversed.reverse();
    // ALPHABET is pure ASCII
    reversed.into_iter().map(char::from).collect()
}

/// How many names `names(digits, cap)` produces: `min(62^digits, cap)`
pub fn name_count(digits: usize, cap: usize) -> usize {
    let cap64 = cap as u64;
    let space = u32::try_from(digits)
        .ok()
        .and_then(|d| BASE.checked_pow(d))
        .unwrap_or(u64::MAX);
    space.min(cap64) as usize
}

/// Per-run cache of shuffled name lists, keyed by digit width
///
/// The first request for a width fixes its list for the rest of the run;
/// later requests return the same names in the same order regardless of
/// the cap they pass.
#[derive(Debug)]
pub struct NameCache {
    cache: HashMap<usize, Vec<String>>,
    rng: StdRng,
}

impl NameCache {
    /// Create a cache whose shuffles are driven by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            cache: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffled names of width `digits`, at most `cap` of them
    pub fn names(&mut self, digits: usize, cap: usize) -> Result<&[String]> {
        if digits == 0 {
            return Err(SplitError::InvalidSplit(
                "name width must be >= 1".to_string(),
            ));
        }
        if cap == 0 {
            return Err(SplitError::InvalidConfig(
                "name cap (all_max) must be >= 1".to_string(),
            ));
        }

        let rng = &mut self.rng;
        let names = self.cache.entry(digits).or_insert_with(|| {
            let count = name_count(digits, cap);
            let mut names: Vec<String> = (0..count as u64).map(|n| encode(n, digits)).collect();
            names.shuffle(rng);
            tracing::debug!(digits, count, "generated directory names");
            names
        });
        Ok(names.as_slice())
    }

    /// Number of widths generated so far
    pub fn cached_widths(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_pads_to_width() {
        assert_eq!(encode(0, 1), "0");
        assert_eq!(encode(9, 1), "9");
        assert_eq!(encode(10, 1), "a");
        assert_eq!(encode(36, 1), "A");
        assert_eq!(encode(61, 1), "Z");
        assert_eq!(encode(5, 4), "0005");
        assert_eq!(encode(62 * 62 - 1, 2), "ZZ");
    }

    #[test]
    fn test_name_count_caps_the_space() {
        assert_eq!(name_count(1, 2000), 62);
        assert_eq!(name_count(2, 2000), 2000);
        assert_eq!(name_count(2, 5000), 3844);
        assert_eq!(name_count(40, 7), 7);
    }

    #[test]
    fn test_names_are_distinct_and_fixed_width() {
        let mut cache = NameCache::new(7);
        let names = cache.names(2, 100).unwrap();
        assert_eq!(names.len(), 100);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 100);
        assert!(names.iter().all(|n| n.len() == 2));
    }

    #[test]
    fn test_names_memoized_per_width() {
        let mut cache = NameCache::new(42);
        let first = cache.names(3, 50).unwrap().to_vec();
        let second = cache.names(3, 10).unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.cached_widths(), 1);
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = NameCache::new(99).names(1, 62).unwrap().to_vec();
        let b = NameCache::new(99).names(1, 62).unwrap().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let mut cache = NameCache::new(1);
        assert!(cache.names(3, 0).is_err());
        assert_eq!(cache.cached_widths(), 0);
    }
}
