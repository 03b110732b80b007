//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. Everything else works on
//! DrawSet and AnalysisSnapshot values. Draw rows keep the upstream
//! shape: a space-separated winning-numbers string in slot order, the
//! special ball as its own column. Frequency tables are derived output
//! and are replaced wholesale after each analysis pass; the special
//! ball is stored under position `draw_size + 1`, as upstream does.

use crate::draw::{parse_draw_date, parse_numbers_field, DrawRecord, DrawSet};
use crate::error::LottoResult;
use crate::frequency::AnalysisSnapshot;
use crate::profile::{LotteryKind, LotteryProfile};
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    lottery_type    TEXT NOT NULL,
    draw_date       TEXT NOT NULL,
    winning_numbers TEXT NOT NULL,
    special_ball    INTEGER NOT NULL,
    multiplier      INTEGER,
    UNIQUE (lottery_type, draw_date, winning_numbers, special_ball)
);
CREATE INDEX IF NOT EXISTS idx_draws_date    ON draws (draw_date);
CREATE INDEX IF NOT EXISTS idx_draws_numbers ON draws (winning_numbers);

CREATE TABLE IF NOT EXISTS number_frequencies (
    lottery_type TEXT NOT NULL,
    number       INTEGER NOT NULL,
    frequency    INTEGER NOT NULL,
    percentage   REAL NOT NULL,
    PRIMARY KEY (lottery_type, number)
);

CREATE TABLE IF NOT EXISTS position_frequencies (
    lottery_type TEXT NOT NULL,
    position     INTEGER NOT NULL,
    number       INTEGER NOT NULL,
    frequency    INTEGER NOT NULL,
    percentage   REAL NOT NULL,
    PRIMARY KEY (lottery_type, position, number)
);
";

pub struct LottoStore {
    conn: Connection,
}

impl LottoStore {
    /// Open (or create) the draw database at `path`.
    pub fn open(path: &str) -> LottoResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LottoResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> LottoResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ── Draws ──────────────────────────────────────────────────

    /// Insert one draw. Returns false when an identical draw is already
    /// stored (idempotent re-imports).
    pub fn insert_draw(&self, kind: LotteryKind, record: &DrawRecord) -> LottoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO draws
                 (lottery_type, draw_date, winning_numbers, special_ball, multiplier)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                kind.as_str(),
                record.date.to_string(),
                numbers_to_field(record),
                record.special_ball,
                record.multiplier,
            ],
        )?;
        Ok(changed > 0)
    }

    /// All draws for one variant, oldest first.
    pub fn load_draws(&self, profile: LotteryProfile) -> LottoResult<DrawSet> {
        let mut stmt = self.conn.prepare(
            "SELECT draw_date, winning_numbers, special_ball, multiplier
             FROM draws WHERE lottery_type = ?1
             ORDER BY draw_date ASC, id ASC",
        )?;
        let rows = stmt.query_map([profile.kind.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, Option<u8>>(3)?,
            ))
        })?;

        let mut set = DrawSet::new(profile);
        for row in rows {
            let (date, numbers, special, multiplier) = row?;
            let record = DrawRecord::new(
                &profile,
                parse_draw_date(&date)?,
                parse_numbers_field(&profile, &numbers)?,
                special,
                multiplier,
            )?;
            set.push(record)?;
        }
        Ok(set)
    }

    /// Newest draws first, up to `limit`.
    pub fn latest_draws(
        &self,
        profile: LotteryProfile,
        limit: u32,
    ) -> LottoResult<Vec<DrawRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT draw_date, winning_numbers, special_ball, multiplier
             FROM draws WHERE lottery_type = ?1
             ORDER BY draw_date DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![profile.kind.as_str(), limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, Option<u8>>(3)?,
            ))
        })?;

        let mut draws = Vec::new();
        for row in rows {
            let (date, numbers, special, multiplier) = row?;
            draws.push(DrawRecord::new(
                &profile,
                parse_draw_date(&date)?,
                parse_numbers_field(&profile, &numbers)?,
                special,
                multiplier,
            )?);
        }
        Ok(draws)
    }

    pub fn draw_count(&self, kind: LotteryKind) -> LottoResult<u32> {
        let count: u32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM draws WHERE lottery_type = ?1",
                [kind.as_str()],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(0);
        Ok(count)
    }

    // ── Derived frequency tables ───────────────────────────────

    /// Replace both frequency tables for the snapshot's variant.
    /// Derived data only — draws are never touched here.
    pub fn replace_frequencies(&self, snapshot: &AnalysisSnapshot) -> LottoResult<()> {
        let kind = snapshot.profile.kind.as_str();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM number_frequencies WHERE lottery_type = ?1",
            [kind],
        )?;
        tx.execute(
            "DELETE FROM position_frequencies WHERE lottery_type = ?1",
            [kind],
        )?;

        {
            let mut insert_number = tx.prepare(
                "INSERT INTO number_frequencies (lottery_type, number, frequency, percentage)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (&number, stats) in &snapshot.overall {
                insert_number.execute(params![kind, number, stats.count, stats.percentage])?;
            }

            let mut insert_position = tx.prepare(
                "INSERT INTO position_frequencies
                     (lottery_type, position, number, frequency, percentage)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (idx, table) in snapshot.position.iter().enumerate() {
                let position = idx + 1;
                for (&number, stats) in table {
                    insert_position
                        .execute(params![kind, position, number, stats.count, stats.percentage])?;
                }
            }
            // Special ball rides in the position table one past the
            // last main slot.
            let special_position = snapshot.profile.draw_size + 1;
            for (&number, stats) in &snapshot.special {
                insert_position.execute(params![
                    kind,
                    special_position,
                    number,
                    stats.count,
                    stats.percentage
                ])?;
            }
        }

        tx.commit()?;
        log::info!(
            "replaced frequency tables for {} ({} draws)",
            snapshot.profile.label,
            snapshot.total_draws
        );
        Ok(())
    }

    pub fn number_frequency_rows(&self, kind: LotteryKind) -> LottoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM number_frequencies WHERE lottery_type = ?1",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn position_frequency_rows(&self, kind: LotteryKind) -> LottoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM position_frequencies WHERE lottery_type = ?1",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn numbers_to_field(record: &DrawRecord) -> String {
    record
        .main_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
