//! Campaign Simulator - Deterministic multi-day progression replays
//!
//! Usage:
//!   campaign_sim --days 14 --pattern daily-briefing
//!   campaign_sim --days 30 --pattern war-room --scenario trade_war
//!   campaign_sim --days 21 --pattern lapsed
//!   campaign_sim --days 14 --pattern mixed --seed 7
//!
//! Drives a real advisory session day by day and reports the
//! progression outcome as machine-readable JSON under
//! ./artifacts/simulations/

use std::fs;
use std::path::PathBuf;

use aethelred_core::engine::level_for_xp;
use aethelred_core::profile::NotificationKind;
use aethelred_core::scenario::ScenarioKind;
use aethelred_core::{AdvisorSession, Config};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayOutcome {
    day: String,
    active: bool,
    actions: Vec<String>,
    xp_after: u32,
    level_after: u32,
    streak_after: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SimulationReport {
    pattern: String,
    scenario: String,
    days: usize,
    active_days: usize,
    final_xp: u32,
    final_level: u32,
    final_streak: u32,
    longest_streak: u32,
    problems_solved: u32,
    analysis_runs: u32,
    achievements_unlocked: Vec<String>,
    missions_completed: usize,
    level_ups: usize,
    day_log: Vec<DayOutcome>,
    success: bool,
    notes: String,
}

// ============================================================================
// SIMULATOR LOGIC
// ============================================================================

const CAMPAIGN_START: (i32, u32, u32) = (2026, 1, 5);

const CHAT_PROMPTS: [&str; 4] = [
    "Assess the current conflict situation in Ukraine",
    "What are the biggest risks on the board right now?",
    "Give me a SWOT analysis of our position",
    "Predict how this develops over the next quarter",
];

/// One day's worth of actions for a pattern. Returns the action labels
/// recorded in the day log.
fn play_day(
    session: &mut AdvisorSession,
    pattern: &str,
    scenario: &str,
    day_index: usize,
    rng: &mut StdRng,
) -> Vec<String> {
    let mut actions = Vec::new();

    match pattern {
        "daily-briefing" | "lapsed" => {
            let _ = session.handle_message(CHAT_PROMPTS[day_index % CHAT_PROMPTS.len()]);
            actions.push("chat".to_string());
            session.run_forecast(Some(scenario), None);
            actions.push("forecast".to_string());
        }
        "war-room" => {
            session.run_full_analysis(Some(scenario));
            actions.push("analysis".to_string());
            session.run_forecast(Some(scenario), None);
            actions.push("forecast".to_string());
            for prompt in CHAT_PROMPTS.iter().take(3) {
                let _ = session.handle_message(prompt);
                actions.push("chat".to_string());
            }
        }
        "mixed" => {
            let count = rng.gen_range(1..=4);
            for _ in 0..count {
                match rng.gen_range(0..4) {
                    0 => {
                        let _ =
                            session.handle_message(CHAT_PROMPTS[rng.gen_range(0..CHAT_PROMPTS.len())]);
                        actions.push("chat".to_string());
                    }
                    1 => {
                        session.run_forecast(Some(scenario), None);
                        actions.push("forecast".to_string());
                    }
                    2 => {
                        session.run_full_analysis(Some(scenario));
                        actions.push("analysis".to_string());
                    }
                    _ => {
                        if session.start_workflow("rapid").is_some() {
                            while session.advance_workflow().is_some() {}
                        }
                        actions.push("workflow".to_string());
                    }
                }
            }
        }
        _ => unreachable!("pattern validated in main"),
    }

    actions
}

fn run_campaign(pattern: &str, scenario: &str, days: usize, seed: u64) -> SimulationReport {
    let (y, m, d) = CAMPAIGN_START;
    let start = NaiveDate::from_ymd_opt(y, m, d).unwrap();

    let mut session = AdvisorSession::starting_on(Config::default(), start);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut day_log = Vec::with_capacity(days);
    let mut active_days = 0;
    let mut longest_streak = 0;
    let mut missions_completed = 0;
    let mut level_ups = 0;

    for offset in 0..days {
        let today = start + Duration::days(offset as i64);
        // An inactive day means the session was never opened, so no
        // streak accounting runs either.
        let active = pattern != "lapsed" || offset % 3 == 0;

        let actions = if active {
            if offset > 0 {
                session.begin_day(today);
            }
            active_days += 1;
            play_day(&mut session, pattern, scenario, offset, &mut rng)
        } else {
            Vec::new()
        };

        for note in session.take_notifications() {
            match note.kind {
                NotificationKind::MissionComplete => missions_completed += 1,
                NotificationKind::LevelUp => level_ups += 1,
                NotificationKind::AchievementUnlocked => {}
            }
        }

        let profile = session.profile();
        longest_streak = longest_streak.max(profile.current_streak);
        day_log.push(DayOutcome {
            day: today.format("%Y-%m-%d").to_string(),
            active,
            actions,
            xp_after: profile.xp,
            level_after: profile.level,
            streak_after: profile.current_streak,
        });
    }

    let profile = session.profile();
    let achievements_unlocked: Vec<String> = profile
        .unlocked_achievements()
        .iter()
        .map(|a| a.id.clone())
        .collect();

    let invariants_hold = profile.level == level_for_xp(profile.xp)
        && profile.total_points == profile.xp
        && profile.current_streak <= longest_streak;
    let success = invariants_hold && profile.xp > 0;

    let notes = if !invariants_hold {
        "Progression invariants violated; see day_log.".to_string()
    } else {
        format!(
            "{} active days produced {} XP, {} level-ups and {} achievement(s).",
            active_days,
            profile.xp,
            level_ups,
            achievements_unlocked.len()
        )
    };

    SimulationReport {
        pattern: pattern.to_string(),
        scenario: scenario.to_string(),
        days,
        active_days,
        final_xp: profile.xp,
        final_level: profile.level,
        final_streak: profile.current_streak,
        longest_streak,
        problems_solved: profile.problems_solved,
        analysis_runs: profile.analysis_runs,
        achievements_unlocked,
        missions_completed,
        level_ups,
        day_log,
        success,
        notes,
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse arguments
    let mut days = 14usize;
    let mut pattern = "daily-briefing".to_string();
    let mut scenario = "ukraine".to_string();
    let mut seed = 42u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14);
                    i += 2;
                } else {
                    eprintln!("Error: --days requires a value");
                    std::process::exit(1);
                }
            }
            "--pattern" => {
                if i + 1 < args.len() {
                    pattern = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --pattern requires a value");
                    std::process::exit(1);
                }
            }
            "--scenario" => {
                if i + 1 < args.len() {
                    scenario = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --scenario requires a value");
                    std::process::exit(1);
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().unwrap_or(42);
                    i += 2;
                } else {
                    eprintln!("Error: --seed requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Campaign Simulator - multi-day progression replays");
                println!();
                println!("Usage:");
                println!("  campaign_sim --days <N> --pattern <pattern> [--scenario <key>] [--seed <S>]");
                println!();
                println!("Options:");
                println!("  --days <N>          Campaign length in days (1-365, default: 14)");
                println!("  --pattern <name>    daily-briefing, war-room, lapsed, mixed");
                println!("  --scenario <key>    Conflict scenario for forecasts (default: ukraine)");
                println!("  --seed <S>          RNG seed for the mixed pattern (default: 42)");
                println!();
                println!("Examples:");
                println!("  campaign_sim --days 14 --pattern daily-briefing");
                println!("  campaign_sim --days 30 --pattern war-room --scenario trade_war");
                println!("  campaign_sim --days 21 --pattern lapsed");
                std::process::exit(0);
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                eprintln!("Run with --help for usage");
                std::process::exit(1);
            }
        }
    }

    // Validate days
    if !(1..=365).contains(&days) {
        eprintln!("Error: days must be between 1 and 365");
        std::process::exit(1);
    }

    // Validate pattern
    if !["daily-briefing", "war-room", "lapsed", "mixed"].contains(&pattern.as_str()) {
        eprintln!("Error: Unknown pattern: {}", pattern);
        eprintln!("Valid patterns: daily-briefing, war-room, lapsed, mixed");
        std::process::exit(1);
    }

    // Validate scenario
    if ScenarioKind::from_name(&scenario).is_none() {
        eprintln!("Error: Unknown scenario: {}", scenario);
        let keys: Vec<&str> = ScenarioKind::all().iter().map(|k| k.as_str()).collect();
        eprintln!("Valid scenarios: {}", keys.join(", "));
        std::process::exit(1);
    }

    // Run simulation
    let report = run_campaign(&pattern, &scenario, days, seed);

    // Create output directory
    let output_dir = PathBuf::from("./artifacts/simulations");
    fs::create_dir_all(&output_dir).unwrap();

    // Write report
    let output_file = output_dir.join(format!("campaign_{}.json", pattern));
    let json = serde_json::to_string_pretty(&report).unwrap();
    fs::write(&output_file, json).unwrap();

    // Print summary
    println!("\n=== Campaign Simulation: {} ===\n", pattern);
    println!("Scenario:             {}", report.scenario);
    println!("Days:                 {}", report.days);
    println!("Active Days:          {}", report.active_days);
    println!("Final XP:             {}", report.final_xp);
    println!("Final Level:          {}", report.final_level);
    println!("Final Streak:         {}", report.final_streak);
    println!("Longest Streak:       {}", report.longest_streak);
    println!("Problems Solved:      {}", report.problems_solved);
    println!("Analysis Runs:        {}", report.analysis_runs);
    println!("Missions Completed:   {}", report.missions_completed);
    println!("Level Ups:            {}", report.level_ups);

    if report.achievements_unlocked.is_empty() {
        println!("Achievements:         none");
    } else {
        println!(
            "Achievements:         {}",
            report.achievements_unlocked.join(", ")
        );
    }

    println!("\nNotes: {}", report.notes);
    println!("\nReport saved to: {}\n", output_file.display());

    if report.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_is_deterministic_for_a_fixed_seed() {
        let a = serde_json::to_string(&run_campaign("mixed", "ukraine", 10, 7)).unwrap();
        let b = serde_json::to_string(&run_campaign("mixed", "ukraine", 10, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_daily_briefing_builds_an_unbroken_streak() {
        let report = run_campaign("daily-briefing", "ukraine", 14, 42);
        assert!(report.success);
        assert_eq!(report.active_days, 14);
        // The first day starts the count at zero, so 14 consecutive
        // days end on a 13-day streak.
        assert_eq!(report.final_streak, 13);
        assert_eq!(report.longest_streak, 13);
        assert_eq!(report.analysis_runs, 14);
        assert_eq!(report.problems_solved, 0);
    }

    #[test]
    fn test_lapsed_pattern_keeps_resetting_the_streak() {
        let report = run_campaign("lapsed", "trade_war", 21, 42);
        assert!(report.success);
        assert_eq!(report.active_days, 7);
        assert_eq!(report.longest_streak, 1);
        assert_eq!(report.final_streak, 1);
    }

    #[test]
    fn test_war_room_counts_problems_and_analyses() {
        let report = run_campaign("war-room", "cyber_escalation", 5, 42);
        assert!(report.success);
        assert_eq!(report.problems_solved, 5);
        assert_eq!(report.analysis_runs, 5);
        assert_eq!(report.day_log.len(), 5);
    }
}
