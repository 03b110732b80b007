//! Shared primitive types used across the crate.

/// A calendar draw date. Draws carry no time component.
pub type DrawDate = chrono::NaiveDate;

/// A drawn number. Every legal range in this domain fits in a u8.
pub type Number = u8;
