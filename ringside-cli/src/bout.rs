//! Bout command - resolve bouts between two boxers without a server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_arena(), fight_bouts(), report_results()
//! - Level 3: fight_single_bout()
//! - Level 4: argument parsing and formatting utilities

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use ringside_core::{
    skill_score, Arena, BoxerId, LeaderboardEntry, MemoryStore, NewBoxer, SeededRandom, SortBy,
};

use crate::PolicyArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BoutArgs {
    /// First boxer as NAME:WEIGHT:HEIGHT:REACH:AGE
    #[arg(long, value_parser = parse_boxer)]
    pub a: NewBoxer,

    /// Second boxer as NAME:WEIGHT:HEIGHT:REACH:AGE
    #[arg(long, value_parser = parse_boxer)]
    pub b: NewBoxer,

    /// Number of bouts (corners alternate each bout)
    #[arg(long, default_value = "1")]
    pub bouts: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Result of a single bout
#[derive(Clone, Debug, serde::Serialize)]
struct BoutRecord {
    bout_number: usize,
    corner_a: String,
    corner_b: String,
    winner: String,
    probability_a: f64,
    draw: f64,
}

/// Skill scores of both boxers, as registered
#[derive(Clone, Debug, serde::Serialize)]
struct Scores {
    a: f64,
    b: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bout command
///
/// 1. Register both boxers in a fresh arena
/// 2. Fight the requested number of bouts
/// 3. Report bouts and the resulting leaderboard
pub fn run(args: BoutArgs, seed: Option<u64>) -> Result<()> {
    let (arena, id_a, id_b) = build_arena(&args, seed)?;

    tracing::info!(
        "Starting {} bout(s): {} vs {}",
        args.bouts,
        args.a.name,
        args.b.name
    );

    let scores = compute_scores(&arena, id_a, id_b)?;
    let records = fight_bouts(&arena, id_a, id_b, args.bouts)?;
    let leaderboard = arena.leaderboard(SortBy::WinPct);

    report_results(&scores, &records, &leaderboard, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Create an in-memory arena holding both boxers
fn build_arena(args: &BoutArgs, seed: Option<u64>) -> Result<(Arena, BoxerId, BoxerId)> {
    let arena = Arena::new(
        Arc::new(MemoryStore::new()),
        Box::new(SeededRandom::new(seed)),
    )
    .with_policy(args.policy.to_policy()?);

    let a = arena
        .create_boxer(args.a.clone())
        .with_context(|| format!("Failed to register {}", args.a.name))?;
    let b = arena
        .create_boxer(args.b.clone())
        .with_context(|| format!("Failed to register {}", args.b.name))?;

    Ok((arena, a.id, b.id))
}

fn compute_scores(arena: &Arena, id_a: BoxerId, id_b: BoxerId) -> Result<Scores> {
    let a = arena.get_boxer(id_a)?;
    let b = arena.get_boxer(id_b)?;
    Ok(Scores {
        a: skill_score(&a, arena.weights()),
        b: skill_score(&b, arena.weights()),
    })
}

/// Fight all bouts, alternating which boxer enters first
fn fight_bouts(
    arena: &Arena,
    id_a: BoxerId,
    id_b: BoxerId,
    bouts: usize,
) -> Result<Vec<BoutRecord>> {
    let mut records = Vec::with_capacity(bouts);

    for bout_num in 0..bouts {
        let swap_corners = bout_num % 2 == 1;

        let record = if swap_corners {
            fight_single_bout(arena, id_b, id_a, bout_num + 1)?
        } else {
            fight_single_bout(arena, id_a, id_b, bout_num + 1)?
        };

        tracing::info!("Bout {}: {} wins", record.bout_number, record.winner);
        records.push(record);
    }

    Ok(records)
}

/// Report results
fn report_results(
    scores: &Scores,
    records: &[BoutRecord],
    leaderboard: &[LeaderboardEntry],
    json: bool,
) {
    if json {
        print_json_results(scores, records, leaderboard);
    } else {
        print_text_results(scores, records, leaderboard);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Put both boxers in the ring and resolve
fn fight_single_bout(
    arena: &Arena,
    first: BoxerId,
    second: BoxerId,
    bout_number: usize,
) -> Result<BoutRecord> {
    arena.enter_ring(first)?;
    arena.enter_ring(second).inspect_err(|_| arena.clear_ring())?;
    let result = arena.fight()?;

    let (corner_a, corner_b) = if result.winner.id == first {
        (result.winner.name.clone(), result.loser.name.clone())
    } else {
        (result.loser.name.clone(), result.winner.name.clone())
    };

    Ok(BoutRecord {
        bout_number,
        corner_a,
        corner_b,
        winner: result.winner.name,
        probability_a: result.decision.probability_a,
        draw: result.decision.draw,
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Parse NAME:WEIGHT:HEIGHT:REACH:AGE
fn parse_boxer(s: &str) -> Result<NewBoxer, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 5 {
        return Err(format!(
            "expected NAME:WEIGHT:HEIGHT:REACH:AGE, got '{}'",
            s
        ));
    }

    let number = |field: &str, value: &str| -> Result<f64, String> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid {} '{}': {}", field, value, e))
    };

    Ok(NewBoxer {
        name: parts[0].to_string(),
        weight: number("weight", parts[1])?,
        height: number("height", parts[2])?,
        reach: number("reach", parts[3])?,
        age: parts[4]
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid age '{}': {}", parts[4], e))?,
    })
}

fn format_pct(win_pct: Option<f64>) -> String {
    match win_pct {
        Some(p) => format!("{:.1}%", p * 100.0),
        None => "-".to_string(),
    }
}

/// Print results as JSON
fn print_json_results(scores: &Scores, records: &[BoutRecord], leaderboard: &[LeaderboardEntry]) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        scores: &'a Scores,
        bouts: &'a [BoutRecord],
        leaderboard: &'a [LeaderboardEntry],
    }

    let output = JsonOutput {
        scores,
        bouts: records,
        leaderboard,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(scores: &Scores, records: &[BoutRecord], leaderboard: &[LeaderboardEntry]) {
    println!("\n=== Bout Results ===");
    println!("Skill scores: {:.2} vs {:.2}", scores.a, scores.b);

    for record in records {
        println!(
            "  Bout {}: {} vs {} -> {} (P(A)={:.3}, draw={:.3})",
            record.bout_number,
            record.corner_a,
            record.corner_b,
            record.winner,
            record.probability_a,
            record.draw
        );
    }

    println!("\nLeaderboard:");
    for (rank, entry) in leaderboard.iter().enumerate() {
        println!(
            "  {}. {:<20} {:>3}-{:<3} {:>7}",
            rank + 1,
            entry.boxer.name,
            entry.boxer.wins,
            entry.losses,
            format_pct(entry.win_pct)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
