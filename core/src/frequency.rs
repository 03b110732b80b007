//! Frequency analysis — one pass over a DrawSet producing every
//! derived table plus coverage statistics.
//!
//! `analyze` is a pure function: no side effects, no randomness, and
//! running it twice on the same DrawSet yields identical tables. The
//! returned snapshot is immutable; matcher and generator only read it.
//!
//! Denominators:
//!   - overall table:   total_draws * draw_size
//!   - position tables: total_draws
//!   - special table:   total_draws
//!   - combo tables:    total_draws
//! Zero draws produce empty tables and zero percentages — the divide
//! is guarded, never performed.

use crate::combination::{CombinationIndex, FullKey, MainKey};
use crate::draw::DrawSet;
use crate::profile::LotteryProfile;
use crate::types::Number;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Count plus percentage over a well-defined denominator. Only ever
/// produced by the analyzer, never constructed by callers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrequencyStats {
    pub count: u32,
    pub percentage: f64,
}

/// How much of each legal range has ever been drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoverageStats {
    pub used_main: u32,
    pub main_coverage_pct: f64,
    pub unused_main: Vec<Number>,
    pub used_special: u32,
    pub special_coverage_pct: f64,
    pub unused_special: Vec<Number>,
}

/// Immutable analysis output: five tables, the combination index, and
/// coverage. Safe to share across concurrent readers.
#[derive(Clone, Debug)]
pub struct AnalysisSnapshot {
    pub profile: LotteryProfile,
    pub total_draws: u32,
    /// Number -> stats over every main-number slot.
    pub overall: BTreeMap<Number, FrequencyStats>,
    /// Index 0 holds position 1.
    pub position: Vec<BTreeMap<Number, FrequencyStats>>,
    pub special: BTreeMap<Number, FrequencyStats>,
    pub main_combos: HashMap<MainKey, FrequencyStats>,
    pub full_combos: HashMap<FullKey, FrequencyStats>,
    pub index: CombinationIndex,
    pub coverage: CoverageStats,
}

fn pct(count: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        count as f64 / denominator as f64 * 100.0
    }
}

/// Run the full analysis pass over a DrawSet.
pub fn analyze(draws: &DrawSet) -> AnalysisSnapshot {
    let profile = *draws.profile();
    let total_draws = draws.len() as u32;
    let draw_size = profile.draw_size;

    let mut overall_counts: BTreeMap<Number, u32> = BTreeMap::new();
    let mut position_counts: Vec<BTreeMap<Number, u32>> = vec![BTreeMap::new(); draw_size];
    let mut special_counts: BTreeMap<Number, u32> = BTreeMap::new();
    let mut used_main: BTreeSet<Number> = BTreeSet::new();
    let mut used_special: BTreeSet<Number> = BTreeSet::new();

    for record in draws.records() {
        for (slot, &n) in record.main_numbers.iter().enumerate() {
            *overall_counts.entry(n).or_insert(0) += 1;
            *position_counts[slot].entry(n).or_insert(0) += 1;
            used_main.insert(n);
        }
        *special_counts.entry(record.special_ball).or_insert(0) += 1;
        used_special.insert(record.special_ball);
    }

    let index = CombinationIndex::build(draws);

    let total_numbers = total_draws * draw_size as u32;
    let overall = overall_counts
        .into_iter()
        .map(|(n, c)| (n, FrequencyStats { count: c, percentage: pct(c, total_numbers) }))
        .collect();

    let position = position_counts
        .into_iter()
        .map(|counts| {
            counts
                .into_iter()
                .map(|(n, c)| (n, FrequencyStats { count: c, percentage: pct(c, total_draws) }))
                .collect()
        })
        .collect();

    let special = special_counts
        .into_iter()
        .map(|(n, c)| (n, FrequencyStats { count: c, percentage: pct(c, total_draws) }))
        .collect();

    let main_combos = index
        .iter_main()
        .map(|(key, c)| {
            (key.clone(), FrequencyStats { count: c, percentage: pct(c, total_draws) })
        })
        .collect();

    let full_combos = index
        .iter_full()
        .map(|(key, entry)| {
            let c = entry.count;
            (key.clone(), FrequencyStats { count: c, percentage: pct(c, total_draws) })
        })
        .collect();

    let coverage = coverage_stats(&profile, &used_main, &used_special);

    AnalysisSnapshot {
        profile,
        total_draws,
        overall,
        position,
        special,
        main_combos,
        full_combos,
        index,
        coverage,
    }
}

fn coverage_stats(
    profile: &LotteryProfile,
    used_main: &BTreeSet<Number>,
    used_special: &BTreeSet<Number>,
) -> CoverageStats {
    let unused_main: Vec<Number> = (1..=profile.main_max)
        .filter(|n| !used_main.contains(n))
        .collect();
    let unused_special: Vec<Number> = (1..=profile.special_max)
        .filter(|n| !used_special.contains(n))
        .collect();

    CoverageStats {
        used_main: used_main.len() as u32,
        main_coverage_pct: pct(used_main.len() as u32, profile.main_max as u32),
        unused_main,
        used_special: used_special.len() as u32,
        special_coverage_pct: pct(used_special.len() as u32, profile.special_max as u32),
        unused_special,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSet;
    use crate::profile::MEGA_MILLIONS;
    use crate::test_support::{draw, profile_5_10_10};

    #[test]
    fn empty_set_yields_empty_tables_and_zero_percentages() {
        let set = DrawSet::new(MEGA_MILLIONS);
        let snapshot = analyze(&set);
        assert_eq!(snapshot.total_draws, 0);
        assert!(snapshot.overall.is_empty());
        assert!(snapshot.special.is_empty());
        assert!(snapshot.position.iter().all(|t| t.is_empty()));
        assert_eq!(snapshot.coverage.main_coverage_pct, 0.0);
        assert_eq!(snapshot.coverage.unused_main.len(), 70);
    }

    #[test]
    fn percentage_guard_never_divides_by_zero() {
        assert_eq!(pct(0, 0), 0.0);
        assert_eq!(pct(3, 12), 25.0);
    }

    #[test]
    fn coverage_partition_is_exact() {
        let profile = profile_5_10_10();
        let mut set = DrawSet::new(profile);
        set.push(draw(&profile, "2024-01-02", &[1, 2, 3, 4, 5], 7)).unwrap();
        let snapshot = analyze(&set);
        let cov = &snapshot.coverage;
        assert_eq!(cov.used_main + cov.unused_main.len() as u32, profile.main_max as u32);
        assert_eq!(
            cov.used_special + cov.unused_special.len() as u32,
            profile.special_max as u32
        );
    }
}
