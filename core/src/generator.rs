//! Novel-combination generation over an immutable analysis snapshot.
//!
//! Two modes with deliberately different failure behavior:
//!   - uniform rejection sampling: bounded by `max_attempts`; running
//!     out raises GenerationExhausted.
//!   - frequency-greedy construction: deterministic, no randomness;
//!     a collision triggers two bounded repair stages, and if both fail
//!     the best candidate is returned with `is_unique = false` instead
//!     of an error.
//!
//! Neither mode holds state between calls.

use crate::combination::FullKey;
use crate::error::{LottoError, LottoResult};
use crate::frequency::AnalysisSnapshot;
use crate::rng::DrawRng;
use crate::types::Number;
use serde::Serialize;
use std::collections::BTreeMap;

/// Attempt ceiling for uniform rejection sampling. Two bounds appear in
/// the history of this system (100 and 1000); 1000 is the documented
/// default here, configurable per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// A generated combination. `position_percentages` is populated only by
/// the greedy mode and describes the greedy picks at selection time,
/// one entry per position; repair does not rewrite it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedCombination {
    /// Sorted ascending.
    pub main_numbers: Vec<Number>,
    pub special_ball: Number,
    pub position_percentages: Option<Vec<f64>>,
    pub is_unique: bool,
    pub attempts: u32,
}

/// Uniform mode: draw distinct main numbers and a special ball
/// uniformly, accept the first full key absent from the index.
pub fn generate_random(
    snapshot: &AnalysisSnapshot,
    rng: &mut DrawRng,
    max_attempts: u32,
) -> LottoResult<GeneratedCombination> {
    let profile = &snapshot.profile;

    for attempt in 1..=max_attempts {
        let mut main_numbers = rng.sample_distinct(profile.main_max, profile.draw_size);
        main_numbers.sort_unstable();
        let special_ball = rng.pick_in_range(profile.special_max);

        let key = FullKey::new(&main_numbers, special_ball);
        if !snapshot.index.contains_full(&key) {
            log::debug!(
                "uniform generation accepted after {attempt} attempt(s) for {}",
                profile.label
            );
            return Ok(GeneratedCombination {
                main_numbers,
                special_ball,
                position_percentages: None,
                is_unique: true,
                attempts: attempt,
            });
        }
    }

    Err(LottoError::GenerationExhausted {
        attempts: max_attempts,
    })
}

/// Greedy mode: per position, the highest-percentage number not already
/// selected; ties break to the smallest number. Deterministic and
/// reproducible for a given snapshot.
pub fn generate_optimized(snapshot: &AnalysisSnapshot) -> GeneratedCombination {
    let profile = &snapshot.profile;
    let draw_size = profile.draw_size;

    // Construction keeps position order; the result is sorted at the end.
    let mut selected: Vec<Number> = Vec::with_capacity(draw_size);
    let mut percentages: Vec<f64> = Vec::with_capacity(draw_size);

    for position in 0..draw_size {
        let table = snapshot.position.get(position);
        let pick = table.and_then(|t| best_candidate(t, &selected));
        match pick {
            Some((number, percentage)) => {
                selected.push(number);
                percentages.push(percentage);
            }
            None => {
                // Degenerate table (no observed draws at this position):
                // the smallest unselected legal number, percentage 0.
                let fallback = (1..=profile.main_max)
                    .find(|n| !selected.contains(n))
                    .unwrap_or(1);
                selected.push(fallback);
                percentages.push(0.0);
            }
        }
    }

    let mut special_ball = best_special(&snapshot.special).unwrap_or(1);

    let mut is_unique = !snapshot
        .index
        .contains_full(&FullKey::new(&selected, special_ball));

    if !is_unique {
        // Stage 1: hold the first draw_size - 1 positions, scan
        // replacements for the last position in ascending order.
        let last = draw_size - 1;
        let original_last = selected[last];
        for candidate in 1..=profile.main_max {
            if candidate == original_last || selected[..last].contains(&candidate) {
                continue;
            }
            selected[last] = candidate;
            if !snapshot
                .index
                .contains_full(&FullKey::new(&selected, special_ball))
            {
                is_unique = true;
                break;
            }
        }

        // Stage 2: restore the last position, scan alternate special
        // balls in ascending order.
        if !is_unique {
            selected[last] = original_last;
            let original_special = special_ball;
            for candidate in 1..=profile.special_max {
                if candidate == original_special {
                    continue;
                }
                if !snapshot
                    .index
                    .contains_full(&FullKey::new(&selected, candidate))
                {
                    special_ball = candidate;
                    is_unique = true;
                    break;
                }
            }
        }
    }

    if !is_unique {
        log::warn!(
            "greedy generation could not escape history for {}; returning best candidate",
            profile.label
        );
    }

    let mut main_numbers = selected;
    main_numbers.sort_unstable();

    GeneratedCombination {
        main_numbers,
        special_ball,
        position_percentages: Some(percentages),
        is_unique,
        attempts: 1,
    }
}

/// Highest-percentage number in a position table not already selected.
/// Ascending map iteration plus a strict comparison keeps the smallest
/// number on percentage ties.
fn best_candidate(
    table: &BTreeMap<Number, crate::frequency::FrequencyStats>,
    selected: &[Number],
) -> Option<(Number, f64)> {
    let mut best: Option<(Number, f64)> = None;
    for (&number, stats) in table {
        if selected.contains(&number) {
            continue;
        }
        match best {
            Some((_, best_pct)) if stats.percentage <= best_pct => {}
            _ => best = Some((number, stats.percentage)),
        }
    }
    best
}

fn best_special(
    table: &BTreeMap<Number, crate::frequency::FrequencyStats>,
) -> Option<Number> {
    let mut best: Option<(Number, f64)> = None;
    for (&number, stats) in table {
        match best {
            Some((_, best_pct)) if stats.percentage <= best_pct => {}
            _ => best = Some((number, stats.percentage)),
        }
    }
    best.map(|(n, _)| n)
}
