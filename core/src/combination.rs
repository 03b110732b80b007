//! Canonical combination keys and the occurrence index.
//!
//! Keys are order-independent: two combinations with the same numbers
//! in different input order normalize to the same key. The index is
//! built once per analysis pass and read-only afterward.

use crate::draw::DrawSet;
use crate::types::{DrawDate, Number};
use std::collections::HashMap;

/// Sorted main numbers, no special ball.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MainKey(Vec<Number>);

impl MainKey {
    pub fn new(numbers: &[Number]) -> Self {
        let mut sorted = numbers.to_vec();
        sorted.sort_unstable();
        Self(sorted)
    }

    pub fn numbers(&self) -> &[Number] {
        &self.0
    }
}

/// Sorted main numbers plus the special ball.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FullKey {
    main: MainKey,
    special: Number,
}

impl FullKey {
    pub fn new(numbers: &[Number], special: Number) -> Self {
        Self {
            main: MainKey::new(numbers),
            special,
        }
    }

    pub fn main(&self) -> &MainKey {
        &self.main
    }

    pub fn special(&self) -> Number {
        self.special
    }
}

/// Occurrence record for one full combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboEntry {
    pub count: u32,
    /// Draw dates that produced this combination, newest first.
    pub dates: Vec<DrawDate>,
}

/// Combination occurrence index over one DrawSet.
///
/// The full index carries per-date detail; the main-only index carries
/// counts only.
#[derive(Clone, Debug, Default)]
pub struct CombinationIndex {
    full: HashMap<FullKey, ComboEntry>,
    main: HashMap<MainKey, u32>,
}

impl CombinationIndex {
    pub(crate) fn build(draws: &DrawSet) -> Self {
        let mut full: HashMap<FullKey, ComboEntry> = HashMap::new();
        let mut main: HashMap<MainKey, u32> = HashMap::new();

        for record in draws.records() {
            let full_key = FullKey::new(&record.main_numbers, record.special_ball);
            let entry = full.entry(full_key).or_insert(ComboEntry {
                count: 0,
                dates: Vec::new(),
            });
            entry.count += 1;
            entry.dates.push(record.date);

            *main.entry(MainKey::new(&record.main_numbers)).or_insert(0) += 1;
        }

        for entry in full.values_mut() {
            entry.dates.sort_unstable_by(|a, b| b.cmp(a));
        }

        Self { full, main }
    }

    pub fn contains_full(&self, key: &FullKey) -> bool {
        self.full.contains_key(key)
    }

    pub fn full_entry(&self, key: &FullKey) -> Option<&ComboEntry> {
        self.full.get(key)
    }

    pub fn main_count(&self, key: &MainKey) -> u32 {
        self.main.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct full combinations seen.
    pub fn distinct_full(&self) -> usize {
        self.full.len()
    }

    pub(crate) fn iter_full(&self) -> impl Iterator<Item = (&FullKey, &ComboEntry)> {
        self.full.iter()
    }

    pub(crate) fn iter_main(&self) -> impl Iterator<Item = (&MainKey, u32)> {
        self.main.iter().map(|(k, &c)| (k, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_key_is_order_independent() {
        assert_eq!(MainKey::new(&[5, 1, 4, 2, 3]), MainKey::new(&[1, 2, 3, 4, 5]));
        assert_eq!(MainKey::new(&[5, 1, 4, 2, 3]).numbers(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn full_key_distinguishes_special_ball() {
        let a = FullKey::new(&[1, 2, 3, 4, 5], 7);
        let b = FullKey::new(&[1, 2, 3, 4, 5], 8);
        assert_ne!(a, b);
        assert_eq!(a.main(), b.main());
    }
}
