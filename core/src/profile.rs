//! Lottery variant parameters.
//!
//! RULE: Every algorithm in this crate is written against a
//! LotteryProfile value. Nothing outside this module hardcodes a
//! number range or a draw size, so one implementation serves every
//! supported variant.

use crate::error::{LottoError, LottoResult};
use crate::types::Number;
use serde::Serialize;

/// The supported lottery variants. The `as_str` name is the stable
/// identifier used as the `lottery_type` column value in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryKind {
    MegaMillions,
    Powerball,
}

impl LotteryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MegaMillions => "mega_millions",
            Self::Powerball => "powerball",
        }
    }

    pub fn profile(&self) -> LotteryProfile {
        match self {
            Self::MegaMillions => MEGA_MILLIONS,
            Self::Powerball => POWERBALL,
        }
    }
}

impl std::str::FromStr for LotteryKind {
    type Err = LottoError;

    fn from_str(s: &str) -> LottoResult<Self> {
        match s {
            "mega_millions" | "mega-millions" => Ok(Self::MegaMillions),
            "powerball" => Ok(Self::Powerball),
            other => Err(LottoError::invalid(format!(
                "unknown lottery '{other}' (expected 'mega-millions' or 'powerball')"
            ))),
        }
    }
}

/// Draw shape of one lottery variant: `draw_size` main numbers in
/// `[1, main_max]` plus one special ball in `[1, special_max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LotteryProfile {
    pub kind: LotteryKind,
    pub label: &'static str,
    pub draw_size: usize,
    pub main_max: Number,
    pub special_max: Number,
}

pub const MEGA_MILLIONS: LotteryProfile = LotteryProfile {
    kind: LotteryKind::MegaMillions,
    label: "Mega Millions",
    draw_size: 5,
    main_max: 70,
    special_max: 25,
};

pub const POWERBALL: LotteryProfile = LotteryProfile {
    kind: LotteryKind::Powerball,
    label: "Powerball",
    draw_size: 5,
    main_max: 69,
    special_max: 26,
};

impl LotteryProfile {
    /// Check a full main-number selection: exact count, every number in
    /// `[1, main_max]`, no duplicates. The error names the rule broken.
    pub fn validate_main_numbers(&self, numbers: &[Number]) -> LottoResult<()> {
        if numbers.len() != self.draw_size {
            return Err(LottoError::invalid(format!(
                "must provide exactly {} main numbers, got {}",
                self.draw_size,
                numbers.len()
            )));
        }
        for &n in numbers {
            if n < 1 || n > self.main_max {
                return Err(LottoError::invalid(format!(
                    "main number {n} out of range 1-{}",
                    self.main_max
                )));
            }
        }
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                if numbers[i] == numbers[j] {
                    return Err(LottoError::invalid(format!(
                        "duplicate main number {}",
                        numbers[i]
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check a special ball against `[1, special_max]`.
    pub fn validate_special(&self, special: Number) -> LottoResult<()> {
        if special < 1 || special > self.special_max {
            return Err(LottoError::invalid(format!(
                "special ball {special} out of range 1-{}",
                self.special_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_have_expected_ranges() {
        assert_eq!(MEGA_MILLIONS.main_max, 70);
        assert_eq!(MEGA_MILLIONS.special_max, 25);
        assert_eq!(POWERBALL.main_max, 69);
        assert_eq!(POWERBALL.special_max, 26);
        assert_eq!(MEGA_MILLIONS.draw_size, 5);
        assert_eq!(POWERBALL.draw_size, 5);
    }

    #[test]
    fn validate_main_numbers_ok() {
        assert!(MEGA_MILLIONS.validate_main_numbers(&[1, 2, 3, 4, 70]).is_ok());
        assert!(POWERBALL.validate_main_numbers(&[65, 4, 23, 1, 69]).is_ok());
    }

    #[test]
    fn validate_main_numbers_wrong_count() {
        let err = MEGA_MILLIONS
            .validate_main_numbers(&[1, 2, 3, 4])
            .unwrap_err();
        assert!(err.to_string().contains("exactly 5"));
    }

    #[test]
    fn validate_main_numbers_out_of_range() {
        assert!(MEGA_MILLIONS.validate_main_numbers(&[0, 2, 3, 4, 5]).is_err());
        assert!(POWERBALL.validate_main_numbers(&[1, 2, 3, 4, 70]).is_err());
    }

    #[test]
    fn validate_main_numbers_duplicate() {
        let err = MEGA_MILLIONS
            .validate_main_numbers(&[7, 2, 7, 4, 5])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn validate_special_bounds() {
        assert!(MEGA_MILLIONS.validate_special(1).is_ok());
        assert!(MEGA_MILLIONS.validate_special(25).is_ok());
        assert!(MEGA_MILLIONS.validate_special(26).is_err());
        assert!(POWERBALL.validate_special(26).is_ok());
        assert!(POWERBALL.validate_special(0).is_err());
    }

    #[test]
    fn kind_round_trips_through_str() {
        assert_eq!("mega-millions".parse::<LotteryKind>().unwrap(), LotteryKind::MegaMillions);
        assert_eq!("powerball".parse::<LotteryKind>().unwrap(), LotteryKind::Powerball);
        assert!("euromillions".parse::<LotteryKind>().is_err());
    }
}
