//! Draw records and the append-only draw set.
//!
//! RULE: A DrawRecord is validated on construction and never mutated
//! afterward. A DrawSet only appends; statistics are always recomputed
//! from scratch over the full set, never patched incrementally.

use crate::error::{LottoError, LottoResult};
use crate::profile::LotteryProfile;
use crate::types::{DrawDate, Number};
use serde::Serialize;

/// One historical lottery result. `main_numbers` keeps the upstream
/// left-to-right slot order: position 1 is the same slot across draws.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    pub date: DrawDate,
    pub main_numbers: Vec<Number>,
    pub special_ball: Number,
    pub multiplier: Option<u8>,
}

impl DrawRecord {
    /// Build a validated record. Rejects wrong counts, out-of-range
    /// values, and duplicate main numbers.
    pub fn new(
        profile: &LotteryProfile,
        date: DrawDate,
        main_numbers: Vec<Number>,
        special_ball: Number,
        multiplier: Option<u8>,
    ) -> LottoResult<Self> {
        profile.validate_main_numbers(&main_numbers)?;
        profile.validate_special(special_ball)?;
        Ok(Self {
            date,
            main_numbers,
            special_ball,
            multiplier,
        })
    }
}

/// Parse the upstream whitespace-separated winning-numbers field.
/// This is the ingestion boundary: non-numeric tokens or a wrong token
/// count are rejected here, before a record can exist.
pub fn parse_numbers_field(profile: &LotteryProfile, field: &str) -> LottoResult<Vec<Number>> {
    let tokens: Vec<&str> = field.split_whitespace().collect();
    if tokens.len() != profile.draw_size {
        return Err(LottoError::malformed(format!(
            "expected {} numbers, got {} in '{field}'",
            profile.draw_size,
            tokens.len()
        )));
    }
    tokens
        .iter()
        .map(|t| {
            t.parse::<Number>()
                .map_err(|_| LottoError::malformed(format!("non-numeric token '{t}'")))
        })
        .collect()
}

/// Parse an ISO `YYYY-MM-DD` draw date.
pub fn parse_draw_date(field: &str) -> LottoResult<DrawDate> {
    DrawDate::parse_from_str(field.trim(), "%Y-%m-%d")
        .map_err(|_| LottoError::malformed(format!("bad draw date '{field}'")))
}

/// Immutable ordered collection of validated draws for one variant.
#[derive(Clone, Debug)]
pub struct DrawSet {
    profile: LotteryProfile,
    records: Vec<DrawRecord>,
}

impl DrawSet {
    pub fn new(profile: LotteryProfile) -> Self {
        Self {
            profile,
            records: Vec::new(),
        }
    }

    pub fn from_records(
        profile: LotteryProfile,
        records: Vec<DrawRecord>,
    ) -> LottoResult<Self> {
        let mut set = Self::new(profile);
        for record in records {
            set.push(record)?;
        }
        Ok(set)
    }

    /// Append one record. Re-validates against this set's profile so a
    /// record built for a different variant can never slip in.
    pub fn push(&mut self, record: DrawRecord) -> LottoResult<()> {
        self.profile.validate_main_numbers(&record.main_numbers)?;
        self.profile.validate_special(record.special_ball)?;
        self.records.push(record);
        Ok(())
    }

    pub fn profile(&self) -> &LotteryProfile {
        &self.profile
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MEGA_MILLIONS, POWERBALL};

    fn date(s: &str) -> DrawDate {
        parse_draw_date(s).unwrap()
    }

    #[test]
    fn record_construction_validates() {
        assert!(DrawRecord::new(&MEGA_MILLIONS, date("2024-01-02"), vec![1, 2, 3, 4, 5], 7, None).is_ok());
        assert!(DrawRecord::new(&MEGA_MILLIONS, date("2024-01-02"), vec![1, 2, 3, 4], 7, None).is_err());
        assert!(DrawRecord::new(&MEGA_MILLIONS, date("2024-01-02"), vec![1, 2, 3, 4, 71], 7, None).is_err());
        assert!(DrawRecord::new(&MEGA_MILLIONS, date("2024-01-02"), vec![1, 2, 3, 4, 5], 26, None).is_err());
    }

    #[test]
    fn parse_numbers_field_happy_path() {
        let numbers = parse_numbers_field(&POWERBALL, "10 24 33 47 60").unwrap();
        assert_eq!(numbers, vec![10, 24, 33, 47, 60]);
    }

    #[test]
    fn parse_numbers_field_rejects_wrong_count() {
        assert!(matches!(
            parse_numbers_field(&POWERBALL, "10 24 33 47"),
            Err(LottoError::MalformedRow { .. })
        ));
        assert!(matches!(
            parse_numbers_field(&POWERBALL, "10 24 33 47 60 3"),
            Err(LottoError::MalformedRow { .. })
        ));
    }

    #[test]
    fn parse_numbers_field_rejects_non_numeric() {
        assert!(matches!(
            parse_numbers_field(&POWERBALL, "10 24 xx 47 60"),
            Err(LottoError::MalformedRow { .. })
        ));
    }

    #[test]
    fn parse_draw_date_formats() {
        assert_eq!(date("2024-03-15").to_string(), "2024-03-15");
        assert!(parse_draw_date("03/15/2024").is_err());
        assert!(parse_draw_date("not-a-date").is_err());
    }

    #[test]
    fn push_rejects_record_from_other_variant() {
        // 70 is legal for Mega Millions but not for Powerball.
        let record =
            DrawRecord::new(&MEGA_MILLIONS, date("2024-01-02"), vec![1, 2, 3, 4, 70], 7, None)
                .unwrap();
        let mut set = DrawSet::new(POWERBALL);
        assert!(set.push(record).is_err());
        assert!(set.is_empty());
    }
}
