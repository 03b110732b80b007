//! Historical lottery draw statistics.
//!
//! The pipeline: raw rows -> DrawSet -> frequency analysis ->
//! { tables, combination index } -> existence checks and
//! novel-combination generation. Two variants (Mega Millions,
//! Powerball) share one implementation parameterized by LotteryProfile.

pub mod combination;
pub mod draw;
pub mod error;
pub mod frequency;
pub mod generator;
pub mod matcher;
pub mod profile;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::draw::{parse_draw_date, DrawRecord};
    use crate::profile::{LotteryKind, LotteryProfile};
    use crate::types::Number;

    /// Small toy profile so unit tests can saturate ranges.
    pub fn profile_5_10_10() -> LotteryProfile {
        LotteryProfile {
            kind: LotteryKind::MegaMillions,
            label: "Test Lottery",
            draw_size: 5,
            main_max: 10,
            special_max: 10,
        }
    }

    pub fn draw(
        profile: &LotteryProfile,
        date: &str,
        numbers: &[Number],
        special: Number,
    ) -> DrawRecord {
        DrawRecord::new(
            profile,
            parse_draw_date(date).unwrap(),
            numbers.to_vec(),
            special,
            None,
        )
        .unwrap()
    }
}
