use lotto_core::draw::{parse_draw_date, DrawRecord, DrawSet};
use lotto_core::frequency::analyze;
use lotto_core::profile::{LotteryKind, LotteryProfile, MEGA_MILLIONS, POWERBALL};
use lotto_core::store::LottoStore;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn store() -> LottoStore {
    let store = LottoStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn record(
    profile: &LotteryProfile,
    date: &str,
    numbers: &[u8],
    special: u8,
    multiplier: Option<u8>,
) -> DrawRecord {
    DrawRecord::new(
        profile,
        parse_draw_date(date).unwrap(),
        numbers.to_vec(),
        special,
        multiplier,
    )
    .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Stored draws come back intact and oldest first.
#[test]
fn insert_and_load_round_trip() {
    let store = store();
    let newer = record(&MEGA_MILLIONS, "2024-09-13", &[7, 11, 22, 29, 38], 4, None);
    let older = record(&MEGA_MILLIONS, "2024-09-10", &[12, 24, 31, 56, 70], 18, Some(3));

    assert!(store.insert_draw(LotteryKind::MegaMillions, &newer).unwrap());
    assert!(store.insert_draw(LotteryKind::MegaMillions, &older).unwrap());

    let set: DrawSet = store.load_draws(MEGA_MILLIONS).unwrap();
    assert_eq!(set.len(), 2);

    let records = set.records();
    assert_eq!(records[0].date.to_string(), "2024-09-10");
    assert_eq!(records[0].main_numbers, vec![12, 24, 31, 56, 70]);
    assert_eq!(records[0].special_ball, 18);
    assert_eq!(records[0].multiplier, Some(3));
    assert_eq!(records[1].date.to_string(), "2024-09-13");
    assert_eq!(records[1].multiplier, None);
}

/// Re-inserting an identical draw is a no-op, which makes re-importing
/// the same CSV idempotent.
#[test]
fn duplicate_insert_is_ignored() {
    let store = store();
    let draw = record(&MEGA_MILLIONS, "2024-09-10", &[12, 24, 31, 56, 70], 18, Some(3));

    assert!(store.insert_draw(LotteryKind::MegaMillions, &draw).unwrap());
    assert!(!store.insert_draw(LotteryKind::MegaMillions, &draw).unwrap());
    assert_eq!(store.draw_count(LotteryKind::MegaMillions).unwrap(), 1);
}

#[test]
fn variants_are_stored_side_by_side() {
    let store = store();
    let mega = record(&MEGA_MILLIONS, "2024-09-10", &[12, 24, 31, 56, 70], 18, None);
    let power = record(&POWERBALL, "2024-09-10", &[3, 14, 27, 41, 62], 22, Some(2));

    store.insert_draw(LotteryKind::MegaMillions, &mega).unwrap();
    store.insert_draw(LotteryKind::Powerball, &power).unwrap();

    assert_eq!(store.draw_count(LotteryKind::MegaMillions).unwrap(), 1);
    assert_eq!(store.draw_count(LotteryKind::Powerball).unwrap(), 1);
    assert_eq!(store.load_draws(MEGA_MILLIONS).unwrap().len(), 1);
    assert_eq!(store.load_draws(POWERBALL).unwrap().len(), 1);
}

#[test]
fn latest_draws_returns_newest_first_up_to_limit() {
    let store = store();
    for (date, special) in [("2024-09-06", 2), ("2024-09-10", 18), ("2024-09-13", 4)] {
        let draw = record(&MEGA_MILLIONS, date, &[12, 24, 31, 56, 70], special, None);
        store.insert_draw(LotteryKind::MegaMillions, &draw).unwrap();
    }

    let latest = store.latest_draws(MEGA_MILLIONS, 2).unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].date.to_string(), "2024-09-13");
    assert_eq!(latest[1].date.to_string(), "2024-09-10");
}

/// Frequency tables are wholesale-replaced: row counts mirror the
/// snapshot and a second pass does not accumulate.
#[test]
fn replace_frequencies_mirrors_the_snapshot() {
    let store = store();
    let draws = [
        ("2024-09-06", vec![12, 24, 31, 56, 70], 18),
        ("2024-09-10", vec![7, 11, 22, 29, 38], 4),
        ("2024-09-13", vec![12, 24, 31, 56, 70], 18),
    ];
    for (date, numbers, special) in &draws {
        let draw = record(&MEGA_MILLIONS, date, numbers, *special, None);
        store.insert_draw(LotteryKind::MegaMillions, &draw).unwrap();
    }

    let snapshot = analyze(&store.load_draws(MEGA_MILLIONS).unwrap());
    store.replace_frequencies(&snapshot).unwrap();

    let number_rows = store.number_frequency_rows(LotteryKind::MegaMillions).unwrap();
    assert_eq!(number_rows as usize, snapshot.overall.len());

    // Five main positions plus the special ball stored one past them.
    let expected_position_rows: usize =
        snapshot.position.iter().map(|t| t.len()).sum::<usize>() + snapshot.special.len();
    let position_rows = store.position_frequency_rows(LotteryKind::MegaMillions).unwrap();
    assert_eq!(position_rows as usize, expected_position_rows);

    store.replace_frequencies(&snapshot).unwrap();
    assert_eq!(
        store.number_frequency_rows(LotteryKind::MegaMillions).unwrap(),
        number_rows
    );
    assert_eq!(
        store.position_frequency_rows(LotteryKind::MegaMillions).unwrap(),
        position_rows
    );
}

/// Draws loaded from disk re-validate; analysis over a reloaded set
/// matches analysis over the original records.
#[test]
fn reloaded_set_analyzes_identically() {
    let store = store();
    let original = vec![
        record(&MEGA_MILLIONS, "2024-09-06", &[12, 24, 31, 56, 70], 18, None),
        record(&MEGA_MILLIONS, "2024-09-10", &[7, 11, 22, 29, 38], 4, None),
    ];
    for draw in &original {
        store.insert_draw(LotteryKind::MegaMillions, draw).unwrap();
    }

    let from_memory = analyze(
        &DrawSet::from_records(MEGA_MILLIONS, original).unwrap(),
    );
    let from_disk = analyze(&store.load_draws(MEGA_MILLIONS).unwrap());

    assert_eq!(from_memory.total_draws, from_disk.total_draws);
    assert_eq!(from_memory.overall, from_disk.overall);
    assert_eq!(from_memory.position, from_disk.position);
    assert_eq!(from_memory.special, from_disk.special);
}
