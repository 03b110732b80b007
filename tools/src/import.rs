//! CSV ingestion for upstream draw exports.
//!
//! Accepts the published column layout: `Draw Date`, `Winning Numbers`,
//! a variant-specific special-ball column (`Mega Ball` / `Powerball`),
//! and an optional `Multiplier`. Powerball exports sometimes fold the
//! ball into the numbers field as a sixth token; both shapes import.
//! Malformed rows are counted and rejected, never ingested.

use anyhow::{Context, Result};
use lotto_core::draw::DrawRecord;
use lotto_core::profile::{LotteryKind, LotteryProfile};
use lotto_core::store::LottoStore;
use lotto_core::types::{DrawDate, Number};
use std::path::Path;

pub struct ImportResult {
    pub total_rows: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub rejected: u32,
}

fn special_column(kind: LotteryKind) -> &'static str {
    match kind {
        LotteryKind::MegaMillions => "Mega Ball",
        LotteryKind::Powerball => "Powerball",
    }
}

pub fn parse_date(raw: &str) -> Result<DrawDate> {
    let raw = raw.trim();
    DrawDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DrawDate::parse_from_str(raw, "%m/%d/%Y"))
        .with_context(|| format!("bad draw date '{raw}'"))
}

fn field<'a>(
    record: &'a csv::StringRecord,
    headers: &csv::StringRecord,
    name: &str,
) -> Option<&'a str> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .and_then(|idx| record.get(idx))
        .map(str::trim)
}

fn parse_record(
    profile: &LotteryProfile,
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
) -> Result<DrawRecord> {
    let date = parse_date(field(record, headers, "Draw Date").context("missing 'Draw Date'")?)?;

    let numbers_raw = field(record, headers, "Winning Numbers")
        .context("missing 'Winning Numbers'")?;
    let mut tokens: Vec<Number> = numbers_raw
        .split_whitespace()
        .map(|t| {
            t.parse::<Number>()
                .with_context(|| format!("non-numeric token '{t}'"))
        })
        .collect::<Result<_>>()?;

    let special = match field(record, headers, special_column(profile.kind)) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<Number>()
            .with_context(|| format!("bad special ball '{raw}'"))?,
        _ => {
            // Folded shape: the ball is the trailing token.
            if tokens.len() != profile.draw_size + 1 {
                anyhow::bail!(
                    "no special-ball column and {} tokens in '{numbers_raw}'",
                    tokens.len()
                );
            }
            match tokens.pop() {
                Some(ball) => ball,
                None => anyhow::bail!("empty numbers field '{numbers_raw}'"),
            }
        }
    };

    let multiplier = match field(record, headers, "Multiplier") {
        Some(raw) if !raw.is_empty() => raw.parse::<u8>().ok(),
        _ => None,
    };

    DrawRecord::new(profile, date, tokens, special, multiplier).map_err(Into::into)
}

pub fn import_csv(store: &LottoStore, kind: LotteryKind, path: &Path) -> Result<ImportResult> {
    let profile = kind.profile();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open {path:?}"))?;
    let headers = reader.headers()?.clone();

    let mut result = ImportResult {
        total_rows: 0,
        inserted: 0,
        skipped: 0,
        rejected: 0,
    };

    for row in reader.records() {
        result.total_rows += 1;
        let record = match row {
            Ok(r) => r,
            Err(e) => {
                log::warn!("row {}: unreadable: {e}", result.total_rows);
                result.rejected += 1;
                continue;
            }
        };
        match parse_record(&profile, &headers, &record) {
            Ok(draw) => match store.insert_draw(kind, &draw) {
                Ok(true) => result.inserted += 1,
                Ok(false) => result.skipped += 1,
                Err(e) => {
                    log::warn!("row {}: insert failed: {e}", result.total_rows);
                    result.rejected += 1;
                }
            },
            Err(e) => {
                log::warn!("row {}: rejected: {e:#}", result.total_rows);
                result.rejected += 1;
            }
        }
    }

    Ok(result)
}
