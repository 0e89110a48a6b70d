//! Progression Lifecycle Tests
//!
//! Walks complete advisory sessions through the public facade and
//! verifies the progression rules hold end to end:
//!
//! 1. A first working day pays out XP, missions and achievements
//! 2. Daily streaks extend, pay bonuses at milestones and reset on gaps
//! 3. Mission boards reset daily while achievements persist
//! 4. Long-run accumulation unlocks the whole threshold ladder
//!
//! ## Running
//!
//! ```bash
//! cargo test -p aethelred_core --test progression_lifecycle -- --nocapture
//! ```

use aethelred_core::engine::level_for_xp;
use aethelred_core::profile::NotificationKind;
use aethelred_core::{AdvisorSession, Config};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fresh_session() -> AdvisorSession {
    AdvisorSession::starting_on(Config::default(), day(2024, 6, 3))
}

// ============================================================================
// Test: First Working Day
// ============================================================================

/// A realistic first day: one full analysis, one forecast, three chats.
/// Every XP amount below follows from the fixed reward table.
#[test]
fn test_first_day_of_advisory_work() {
    let mut session = fresh_session();

    // Full analysis: 100 problem XP + 100 First Steps + 50 Daily Intel.
    session.run_full_analysis(None);
    assert_eq!(session.profile().xp, 250);
    assert_eq!(session.profile().problems_solved, 1);

    // Forecast: 50 analysis XP + 40 Forecaster payout (Daily Intel is
    // already banked).
    session.run_forecast(None, None);
    assert_eq!(session.profile().xp, 340);
    assert_eq!(session.profile().analysis_runs, 1);

    // Three consultations: 10 XP each, 30 XP Consultation payout.
    for _ in 0..3 {
        session.handle_message("what should we watch next week?");
    }
    assert_eq!(session.profile().xp, 400);

    let profile = session.profile();
    assert_eq!(profile.total_points, profile.xp, "points mirror xp");
    assert_eq!(profile.level, level_for_xp(profile.xp));
    assert_eq!(profile.completed_missions(), 3, "all dailies cleared");
    assert_eq!(profile.unlocked_achievements().len(), 1);

    // Transcript: the analysis banner plus three exchange pairs.
    assert_eq!(profile.chat.len(), 7);

    let drained = session.take_notifications();
    let count_of = |kind: NotificationKind| drained.iter().filter(|n| n.kind == kind).count();
    assert_eq!(count_of(NotificationKind::LevelUp), 2, "levels 2 and 3");
    assert_eq!(count_of(NotificationKind::AchievementUnlocked), 1);
    assert_eq!(count_of(NotificationKind::MissionComplete), 3);
    assert!(session.take_notifications().is_empty(), "queue drains once");
}

// ============================================================================
// Test: Streak Accounting
// ============================================================================

/// Seven consecutive days reach Week Warrior; the milestone bonus pays
/// exactly once and a gap later resets the chain.
#[test]
fn test_week_long_streak_unlocks_week_warrior() {
    let mut session = fresh_session();

    for offset in 1..=6 {
        session.begin_day(day(2024, 6, 3 + offset));
        assert_eq!(session.profile().current_streak, offset);
        assert_eq!(session.profile().xp, 0, "no bonus before day seven");
    }

    session.begin_day(day(2024, 6, 10));
    let profile = session.profile();
    assert_eq!(profile.current_streak, 7);
    // 70 streak bonus + 500 Week Warrior reward.
    assert_eq!(profile.xp, 570);
    assert!(profile
        .achievements
        .iter()
        .find(|a| a.id == "week_warrior")
        .unwrap()
        .unlocked);

    let drained = session.take_notifications();
    assert!(drained
        .iter()
        .any(|n| n.kind == NotificationKind::AchievementUnlocked && n.message.contains("Week Warrior")));

    // Day eight: streak grows, no second bonus.
    session.begin_day(day(2024, 6, 11));
    assert_eq!(session.profile().current_streak, 8);
    assert_eq!(session.profile().xp, 570);

    // Three silent days break the chain.
    session.begin_day(day(2024, 6, 14));
    assert_eq!(session.profile().current_streak, 1);
    assert_eq!(session.profile().last_active, day(2024, 6, 14));
}

// ============================================================================
// Test: Daily Board Reset
// ============================================================================

/// Completing a mission pays once per board; the next day's board is
/// fresh and pays again, while achievement unlocks never repeat.
#[test]
fn test_mission_boards_reset_daily_but_achievements_persist() {
    let mut session = fresh_session();

    for _ in 0..3 {
        session.handle_message("status check");
    }
    assert_eq!(session.profile().xp, 60, "3 chats + Consultation payout");
    assert_eq!(session.profile().completed_missions(), 1);

    // A fourth chat the same day adds only the chat XP.
    session.handle_message("still there?");
    assert_eq!(session.profile().xp, 70);

    session.begin_day(day(2024, 6, 4));
    assert_eq!(session.profile().completed_missions(), 0, "fresh board");

    for _ in 0..3 {
        session.handle_message("morning briefing please");
    }
    let profile = session.profile();
    assert_eq!(profile.xp, 70 + 60, "the new board pays again");
    assert_eq!(profile.missions_generated_on, day(2024, 6, 4));
    assert!(profile.unlocked_achievements().is_empty(), "no chat achievement exists");
}

// ============================================================================
// Test: Threshold Ladder
// ============================================================================

/// A long forecasting marathon climbs the whole accumulation ladder:
/// Intelligence Analyst at 10 runs, Grand Strategist at 1000 XP,
/// Strategic Legend at level 10. Problem-count achievements stay
/// locked because no full analysis ever runs.
#[test]
fn test_marathon_unlocks_accumulation_ladder() {
    let mut session = fresh_session();

    for _ in 0..45 {
        session.run_forecast(Some("trade_war"), Some(6));
    }

    let profile = session.profile();
    assert_eq!(profile.analysis_runs, 45);
    // 140 first run, 50 per further run, plus 300 + 400 + 1000 rewards.
    assert_eq!(profile.xp, 4040);
    assert_eq!(profile.total_points, profile.xp);
    assert_eq!(profile.level, level_for_xp(4040));
    assert!(profile.level >= 10);

    let unlocked: Vec<&str> = profile
        .unlocked_achievements()
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert!(unlocked.contains(&"analyst"));
    assert!(unlocked.contains(&"strategist"));
    assert!(unlocked.contains(&"legend"));
    assert!(!unlocked.contains(&"first_steps"));
    assert!(!unlocked.contains(&"workflow_master"));
    assert!(!unlocked.contains(&"week_warrior"));
}

// ============================================================================
// Test: Invariants Under Mixed Load
// ============================================================================

/// Interleaved operations keep the core invariants: XP never
/// decreases, the level matches the curve, mission progress stays
/// clamped, unlock timestamps are set exactly for unlocked entries.
#[test]
fn test_invariants_hold_under_mixed_load() {
    let mut session = fresh_session();
    let mut last_xp = 0;

    let mut check = |session: &AdvisorSession, last_xp: &mut u32| {
        let p = session.profile();
        assert!(p.xp >= *last_xp, "xp is monotonic");
        *last_xp = p.xp;
        assert_eq!(p.level, level_for_xp(p.xp));
        assert_eq!(p.total_points, p.xp);
        for m in &p.missions {
            assert!(m.progress <= m.target, "{} overflowed", m.id);
        }
        for a in &p.achievements {
            assert_eq!(a.unlocked, a.unlocked_at.is_some(), "{} timestamp", a.id);
        }
    };

    session.handle_message("ukraine outlook?");
    check(&session, &mut last_xp);
    session.run_forecast(Some("cyber_escalation"), Some(3));
    check(&session, &mut last_xp);
    session.start_workflow("strategic");
    check(&session, &mut last_xp);
    while session.advance_workflow().is_some() {}
    check(&session, &mut last_xp);
    session.run_full_analysis(Some("ai_arms_race"));
    check(&session, &mut last_xp);
    session.begin_day(day(2024, 6, 4));
    check(&session, &mut last_xp);
    session.quick_action("risk");
    check(&session, &mut last_xp);
}
