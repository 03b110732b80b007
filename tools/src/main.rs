//! lotto: command-line runner for the lottery statistics core.
//!
//! Usage:
//!   lotto import   --lottery mega-millions --csv draws.csv [--db lottery.db]
//!   lotto analyze  --lottery powerball [--db lottery.db] [--json]
//!   lotto check    --lottery powerball --numbers "3 14 27 41 62" [--special 22]
//!   lotto generate --lottery mega-millions [--mode random|optimized]
//!                  [--max-attempts 1000] [--seed 42]
//!   lotto latest   --lottery powerball [--limit 20]

mod import;

use anyhow::{bail, Context, Result};
use lotto_core::draw::DrawSet;
use lotto_core::error::LottoError;
use lotto_core::frequency::{analyze, AnalysisSnapshot};
use lotto_core::generator::{generate_optimized, generate_random, DEFAULT_MAX_ATTEMPTS};
use lotto_core::matcher::check;
use lotto_core::profile::LotteryKind;
use lotto_core::rng::DrawRng;
use lotto_core::store::LottoStore;
use lotto_core::types::Number;
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            // Caller-input errors and search-space exhaustion get
            // distinct exit codes; everything else is operational.
            match e.downcast_ref::<LottoError>() {
                Some(LottoError::InvalidCombination { .. }) => ExitCode::from(2),
                Some(LottoError::GenerationExhausted { .. }) => ExitCode::from(3),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

const COMMANDS: [&str; 5] = ["import", "analyze", "check", "generate", "latest"];

fn is_command(name: &str) -> bool {
    COMMANDS.contains(&name)
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = match args.get(1) {
        Some(c) => c.as_str(),
        None => {
            print_usage();
            return Ok(());
        }
    };

    // Reject bad commands before any flag is required and before the
    // database file is created.
    if !is_command(command) {
        print_usage();
        bail!("unknown command '{command}'");
    }

    let kind: LotteryKind = flag_value(&args, "--lottery")
        .context("--lottery is required (mega-millions or powerball)")?
        .parse()?;
    let db = flag_value(&args, "--db").unwrap_or("lottery.db");
    let json = args.iter().any(|a| a == "--json");

    let store = LottoStore::open(db)?;
    store.migrate()?;

    match command {
        "import" => cmd_import(&args, &store, kind),
        "analyze" => cmd_analyze(&store, kind, json),
        "check" => cmd_check(&args, &store, kind, json),
        "generate" => cmd_generate(&args, &store, kind, json),
        "latest" => cmd_latest(&args, &store, kind),
        other => bail!("unknown command '{other}'"),
    }
}

fn cmd_import(args: &[String], store: &LottoStore, kind: LotteryKind) -> Result<()> {
    let csv_path = flag_value(args, "--csv").context("--csv FILE is required")?;
    let result = import::import_csv(store, kind, Path::new(csv_path))?;
    println!("=== IMPORT SUMMARY ===");
    println!("  file:     {csv_path}");
    println!("  lottery:  {}", kind.profile().label);
    println!("  rows:     {}", result.total_rows);
    println!("  inserted: {}", result.inserted);
    println!("  skipped:  {} (already stored)", result.skipped);
    println!("  rejected: {} (malformed)", result.rejected);
    Ok(())
}

fn load_snapshot(store: &LottoStore, kind: LotteryKind) -> Result<AnalysisSnapshot> {
    let draws: DrawSet = store.load_draws(kind.profile())?;
    Ok(analyze(&draws))
}

fn cmd_analyze(store: &LottoStore, kind: LotteryKind, json: bool) -> Result<()> {
    let snapshot = load_snapshot(store, kind)?;
    store.replace_frequencies(&snapshot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis_report(&snapshot))?);
        return Ok(());
    }

    let profile = &snapshot.profile;
    println!("=== {} ANALYSIS ===", profile.label.to_uppercase());
    println!("  total draws:        {}", snapshot.total_draws);
    println!(
        "  main coverage:      {:.1}% ({}/{})",
        snapshot.coverage.main_coverage_pct, snapshot.coverage.used_main, profile.main_max
    );
    println!(
        "  special coverage:   {:.1}% ({}/{})",
        snapshot.coverage.special_coverage_pct, snapshot.coverage.used_special, profile.special_max
    );
    println!("  distinct full keys: {}", snapshot.index.distinct_full());
    if !snapshot.coverage.unused_main.is_empty() {
        println!("  never-drawn main:   {:?}", snapshot.coverage.unused_main);
    }
    if !snapshot.coverage.unused_special.is_empty() {
        println!("  never-drawn special: {:?}", snapshot.coverage.unused_special);
    }

    println!();
    println!("  top main numbers:");
    for (number, stats) in top_by_count(&snapshot.overall, 10) {
        println!("    {number:>3}: {:>5} draws ({:.2}%)", stats.count, stats.percentage);
    }
    println!("  top special balls:");
    for (number, stats) in top_by_count(&snapshot.special, 5) {
        println!("    {number:>3}: {:>5} draws ({:.2}%)", stats.count, stats.percentage);
    }
    Ok(())
}

fn cmd_check(args: &[String], store: &LottoStore, kind: LotteryKind, json: bool) -> Result<()> {
    let raw = flag_value(args, "--numbers").context("--numbers \"a b c d e\" is required")?;
    let numbers = parse_query_numbers(raw)?;
    let special = flag_value(args, "--special")
        .map(|s| s.parse::<Number>().with_context(|| format!("bad special ball '{s}'")))
        .transpose()?;

    let snapshot = load_snapshot(store, kind)?;
    let result = check(&snapshot, &numbers, special)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let combo = result
        .main_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    match (result.exists, result.special_ball) {
        (true, Some(s)) => {
            println!("[{combo}] + {s}: drawn {} time(s)", result.frequency);
            for date in &result.dates {
                println!("  {date}");
            }
        }
        (true, None) => println!("[{combo}]: drawn {} time(s)", result.frequency),
        (false, Some(s)) => println!("[{combo}] + {s}: never drawn"),
        (false, None) => println!("[{combo}]: never drawn"),
    }
    Ok(())
}

fn cmd_generate(args: &[String], store: &LottoStore, kind: LotteryKind, json: bool) -> Result<()> {
    let mode = flag_value(args, "--mode").unwrap_or("random");
    let snapshot = load_snapshot(store, kind)?;

    let result = match mode {
        "random" => {
            let max_attempts = parse_flag(args, "--max-attempts", DEFAULT_MAX_ATTEMPTS)?;
            let mut rng = match flag_value(args, "--seed") {
                Some(s) => DrawRng::seed_from_u64(s.parse().with_context(|| format!("bad seed '{s}'"))?),
                None => DrawRng::from_entropy(),
            };
            generate_random(&snapshot, &mut rng, max_attempts)?
        }
        "optimized" => generate_optimized(&snapshot),
        other => bail!("unknown mode '{other}' (expected 'random' or 'optimized')"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let combo = result
        .main_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("[{combo}] + {}", result.special_ball);
    if let Some(pcts) = &result.position_percentages {
        let formatted: Vec<String> = pcts.iter().map(|p| format!("{p:.2}%")).collect();
        println!("  position percentages: {}", formatted.join(", "));
    }
    if result.is_unique {
        println!("  never drawn before ({} attempt(s))", result.attempts);
    } else {
        println!("  WARNING: collides with history; no novel variant found");
    }
    Ok(())
}

fn cmd_latest(args: &[String], store: &LottoStore, kind: LotteryKind) -> Result<()> {
    let limit = parse_flag(args, "--limit", 20u32)?;
    let draws = store.latest_draws(kind.profile(), limit)?;
    if draws.is_empty() {
        println!("no draws stored for {}", kind.profile().label);
        return Ok(());
    }
    for draw in draws {
        let numbers = draw
            .main_numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        match draw.multiplier {
            Some(m) => println!("{}  [{numbers}] + {}  x{m}", draw.date, draw.special_ball),
            None => println!("{}  [{numbers}] + {}", draw.date, draw.special_ball),
        }
    }
    Ok(())
}

// ── Report shapes (JSON output) ────────────────────────────────────

#[derive(serde::Serialize)]
struct FrequencyRow {
    number: Number,
    count: u32,
    percentage: f64,
}

#[derive(serde::Serialize)]
struct AnalysisReport<'a> {
    lottery: &'a str,
    total_draws: u32,
    coverage: &'a lotto_core::frequency::CoverageStats,
    overall: Vec<FrequencyRow>,
    special: Vec<FrequencyRow>,
    position: Vec<Vec<FrequencyRow>>,
}

fn analysis_report(snapshot: &AnalysisSnapshot) -> AnalysisReport<'_> {
    let rows = |table: &std::collections::BTreeMap<Number, lotto_core::frequency::FrequencyStats>| {
        table
            .iter()
            .map(|(&number, stats)| FrequencyRow {
                number,
                count: stats.count,
                percentage: stats.percentage,
            })
            .collect::<Vec<_>>()
    };
    AnalysisReport {
        lottery: snapshot.profile.label,
        total_draws: snapshot.total_draws,
        coverage: &snapshot.coverage,
        overall: rows(&snapshot.overall),
        special: rows(&snapshot.special),
        position: snapshot.position.iter().map(&rows).collect(),
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn top_by_count<'a>(
    table: &'a std::collections::BTreeMap<Number, lotto_core::frequency::FrequencyStats>,
    limit: usize,
) -> Vec<(Number, &'a lotto_core::frequency::FrequencyStats)> {
    let mut rows: Vec<_> = table.iter().map(|(&n, s)| (n, s)).collect();
    rows.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    rows.truncate(limit);
    rows
}

fn parse_query_numbers(raw: &str) -> Result<Vec<Number>> {
    raw.split_whitespace()
        .map(|t| {
            t.parse::<Number>()
                .with_context(|| format!("non-numeric main number '{t}'"))
        })
        .collect()
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T> {
    match flag_value(args, flag) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("bad value '{raw}' for {flag}")),
    }
}


fn print_usage() {
    println!("lotto — lottery draw statistics");
    println!();
    println!("Commands:");
    println!("  import   --lottery L --csv FILE [--db PATH]");
    println!("  analyze  --lottery L [--db PATH] [--json]");
    println!("  check    --lottery L --numbers \"a b c d e\" [--special n] [--json]");
    println!("  generate --lottery L [--mode random|optimized] [--max-attempts N] [--seed S]");
    println!("  latest   --lottery L [--limit N]");
    println!();
    println!("L is 'mega-millions' or 'powerball'. Default db: lottery.db");
}
