//! Gamification engine - Progression rule evaluation
//!
//! All mutation of [`Profile`] progression state funnels through here:
//! XP awards, level derivation, streak accounting, achievement unlocks
//! and mission progress. The engine itself is stateless; rules operate
//! on the profile passed in.

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::achievements::ConditionKind;
use crate::missions;
use crate::profile::{Notification, NotificationKind, Profile};

/// XP for completing a full strategic analysis.
pub const PROBLEM_XP: u32 = 100;
/// XP for a single analysis action (forecast, assessment).
pub const ANALYSIS_XP: u32 = 50;
/// XP for one advisor chat exchange.
pub const CHAT_XP: u32 = 10;
/// XP for kicking off a decision workflow.
pub const WORKFLOW_XP: u32 = 25;
/// Streak lengths that pay a bonus (streak x 10 XP) when first reached.
pub const STREAK_BONUS_DAYS: [u32; 2] = [7, 30];

/// Level implied by an XP total.
///
/// Inverse of the `100 * level^1.5` cost curve: each level requires
/// polynomially more XP than the last. Level 1 is the floor; 100 XP
/// reaches level 2, 1000 XP reaches level 5, 3000 XP reaches level 10.
pub fn level_for_xp(xp: u32) -> u32 {
    (f64::from(xp) / 100.0).powf(2.0 / 3.0).floor() as u32 + 1
}

/// Stateless rule evaluator over [`Profile`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GamificationEngine;

impl GamificationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Award XP and run the downstream rule cascade.
    ///
    /// Recomputes the level from the new total, queues a level-up
    /// notification on increase, then re-evaluates achievements and
    /// feeds the raw gain to XP-tagged missions. Reward chaining
    /// (achievements and missions paying XP of their own) re-enters
    /// here and terminates because unlock flags are set before their
    /// rewards are awarded.
    pub fn add_xp(&self, profile: &mut Profile, amount: u32, reason: &str) {
        let old_level = profile.level;
        profile.xp += amount;
        profile.total_points += amount;
        debug!(amount, reason, total = profile.xp, "xp awarded");

        let new_level = level_for_xp(profile.xp);
        if new_level > old_level {
            profile.level = new_level;
            info!(level = new_level, "level up");
            profile.push_notification(
                NotificationKind::LevelUp,
                format!("🎉 Level Up! You are now Level {new_level}!"),
            );
        }

        self.check_achievements(profile);
        self.update_missions(profile, "xp", amount);
    }

    /// Record a completed full analysis: counter, 100 XP, missions.
    pub fn record_problem_solved(&self, profile: &mut Profile) {
        profile.problems_solved += 1;
        self.add_xp(profile, PROBLEM_XP, "Problem solved");
        self.update_missions(profile, "problem", 1);
        self.check_achievements(profile);
    }

    /// Record a single analysis action: counter, 50 XP, missions.
    pub fn record_analysis(&self, profile: &mut Profile, label: &str) {
        profile.analysis_runs += 1;
        self.add_xp(profile, ANALYSIS_XP, &format!("Analysis: {label}"));
        self.update_missions(profile, "analysis", 1);
        self.check_achievements(profile);
    }

    /// Roll the consecutive-day streak forward to `today`.
    ///
    /// Exactly one day since the last active date extends the streak;
    /// a longer gap resets it to 1; the same day is a no-op. Streak
    /// bonuses pay only at the moment a milestone length is reached,
    /// never retroactively.
    pub fn check_streak(&self, profile: &mut Profile, today: NaiveDate) {
        let last = profile.last_active;
        if today - last == Duration::days(1) {
            profile.current_streak += 1;
            info!(streak = profile.current_streak, "streak extended");
            if STREAK_BONUS_DAYS.contains(&profile.current_streak) {
                self.add_xp(profile, profile.current_streak * 10, "Streak bonus");
            }
        } else if today > last {
            debug!(streak = profile.current_streak, "streak broken");
            profile.current_streak = 1;
        }
        profile.last_active = today;
        self.check_achievements(profile);
    }

    /// Re-test every locked achievement against current counters.
    ///
    /// The unlock flag is set before the reward XP is awarded, so the
    /// recursive re-evaluation triggered by the award skips this entry.
    pub fn check_achievements(&self, profile: &mut Profile) {
        for i in 0..profile.achievements.len() {
            let ach = &profile.achievements[i];
            if ach.unlocked {
                continue;
            }

            let current = match ach.condition {
                ConditionKind::ProblemsSolved => profile.problems_solved,
                ConditionKind::XpTotal => profile.xp,
                ConditionKind::StreakDays => profile.current_streak,
                ConditionKind::Level => profile.level,
                ConditionKind::AnalysisRuns => profile.analysis_runs,
            };
            if current < ach.threshold {
                continue;
            }

            let ach = &mut profile.achievements[i];
            ach.unlocked = true;
            ach.unlocked_at = Some(Utc::now());
            let name = ach.name.clone();
            let icon = ach.icon.clone();
            let reward = ach.xp_reward;
            info!(id = %profile.achievements[i].id, reward, "achievement unlocked");

            self.add_xp(profile, reward, &format!("Achievement: {name}"));
            profile.push_notification(
                NotificationKind::AchievementUnlocked,
                format!("🏆 Achievement Unlocked: {name} {icon}"),
            );
        }
    }

    /// Feed an action tag into the mission board.
    ///
    /// Progress clamps at the target; completion pays the reward once
    /// and completed missions ignore further actions.
    pub fn update_missions(&self, profile: &mut Profile, action: &str, amount: u32) {
        for i in 0..profile.missions.len() {
            let mission = &profile.missions[i];
            if mission.completed || !mission.matches_action(action) {
                continue;
            }

            let mission = &mut profile.missions[i];
            mission.progress = (mission.progress + amount).min(mission.target);
            if mission.progress < mission.target {
                continue;
            }
            mission.completed = true;
            let name = mission.name.clone();
            let reward = mission.xp_reward;
            info!(id = %profile.missions[i].id, reward, "mission complete");

            self.add_xp(profile, reward, &format!("Mission: {name}"));
            profile.push_notification(
                NotificationKind::MissionComplete,
                format!("✅ Mission Complete: {name}"),
            );
        }
    }

    /// Replace the mission board when the session crosses into a new day.
    pub fn regenerate_missions(&self, profile: &mut Profile, today: NaiveDate) {
        if profile.missions_generated_on == today {
            return;
        }
        debug!(%today, "regenerating daily missions");
        profile.missions = missions::daily_missions();
        profile.missions_generated_on = today;
    }

    /// XP still needed to reach the next level boundary.
    pub fn xp_to_next_level(&self, profile: &Profile) -> u32 {
        let next_level_xp = (100.0 * f64::from(profile.level).powf(1.5)).floor() as u32;
        next_level_xp.saturating_sub(profile.xp)
    }

    /// Hand the pending notification queue to the caller, emptying it.
    pub fn drain_notifications(&self, profile: &mut Profile) -> Vec<Notification> {
        std::mem::take(&mut profile.notifications)
    }
}
