//! Combination existence lookup against an analysis snapshot.
//!
//! Read-only: validates and normalizes the query, consults the
//! combination index, and reports a verdict. When a special ball is
//! given, only an exact full-key match counts as existing — a draw with
//! the same main numbers but a different special ball is "not found".

use crate::combination::{FullKey, MainKey};
use crate::error::LottoResult;
use crate::frequency::AnalysisSnapshot;
use crate::types::{DrawDate, Number};
use serde::Serialize;

/// Existence verdict for one queried combination.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    pub exists: bool,
    pub frequency: u32,
    /// Draw dates of exact matches, newest first. Empty for main-only
    /// queries: the main index carries counts, not dates.
    pub dates: Vec<DrawDate>,
    /// The query's main numbers, normalized ascending.
    pub main_numbers: Vec<Number>,
    pub special_ball: Option<Number>,
}

/// Check whether a combination appears in history.
///
/// With `special_ball = None` the main-combination index answers; with
/// a special ball the full-combination index must match exactly.
pub fn check(
    snapshot: &AnalysisSnapshot,
    main_numbers: &[Number],
    special_ball: Option<Number>,
) -> LottoResult<MatchResult> {
    let profile = &snapshot.profile;
    profile.validate_main_numbers(main_numbers)?;
    if let Some(special) = special_ball {
        profile.validate_special(special)?;
    }

    let main_key = MainKey::new(main_numbers);
    let normalized = main_key.numbers().to_vec();

    let result = match special_ball {
        None => {
            let count = snapshot.index.main_count(&main_key);
            MatchResult {
                exists: count > 0,
                frequency: count,
                dates: Vec::new(),
                main_numbers: normalized,
                special_ball: None,
            }
        }
        Some(special) => {
            let full_key = FullKey::new(main_numbers, special);
            match snapshot.index.full_entry(&full_key) {
                Some(entry) => MatchResult {
                    exists: true,
                    frequency: entry.count,
                    dates: entry.dates.clone(),
                    main_numbers: normalized,
                    special_ball: Some(special),
                },
                None => MatchResult {
                    exists: false,
                    frequency: 0,
                    dates: Vec::new(),
                    main_numbers: normalized,
                    special_ball: Some(special),
                },
            }
        }
    };

    Ok(result)
}
