//! Achievement catalog - One-time unlockable milestones
//!
//! Each achievement pairs a threshold condition with an XP reward.
//! Unlocking is one-way: the flag and timestamp are set once and never
//! reset for the life of the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which profile counter an achievement threshold is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Cumulative full analyses completed.
    ProblemsSolved,
    /// Lifetime XP total.
    XpTotal,
    /// Consecutive-day activity streak.
    StreakDays,
    /// Current level.
    Level,
    /// Cumulative analysis actions (forecasts, assessments).
    AnalysisRuns,
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::ProblemsSolved => "problems_solved",
            ConditionKind::XpTotal => "xp_total",
            ConditionKind::StreakDays => "streak_days",
            ConditionKind::Level => "level",
            ConditionKind::AnalysisRuns => "analysis_runs",
        }
    }
}

/// A single unlockable milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier, e.g. `"first_steps"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description shown in the gallery.
    pub description: String,
    /// Emoji badge.
    pub icon: String,
    /// XP awarded on unlock.
    pub xp_reward: u32,
    /// Counter the threshold applies to.
    pub condition: ConditionKind,
    /// Unlock threshold (greater-or-equal comparison).
    pub threshold: u32,
    /// Set exactly once, never cleared.
    pub unlocked: bool,
    /// When the unlock happened.
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        xp_reward: u32,
        condition: ConditionKind,
        threshold: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            xp_reward,
            condition,
            threshold,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// The built-in milestone catalog, in display order.
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "first_steps",
            "First Steps",
            "Solve your first strategic problem",
            "🎯",
            100,
            ConditionKind::ProblemsSolved,
            1,
        ),
        Achievement::new(
            "workflow_master",
            "Workflow Master",
            "Complete 5 strategic analyses",
            "⚡",
            250,
            ConditionKind::ProblemsSolved,
            5,
        ),
        Achievement::new(
            "analyst",
            "Intelligence Analyst",
            "Run 10 predictive forecasts",
            "📊",
            300,
            ConditionKind::AnalysisRuns,
            10,
        ),
        Achievement::new(
            "strategist",
            "Grand Strategist",
            "Accumulate 1000 XP",
            "💡",
            400,
            ConditionKind::XpTotal,
            1000,
        ),
        Achievement::new(
            "week_warrior",
            "Week Warrior",
            "Maintain a 7-day streak",
            "🔥",
            500,
            ConditionKind::StreakDays,
            7,
        ),
        Achievement::new(
            "legend",
            "Strategic Legend",
            "Reach Level 10",
            "👑",
            1000,
            ConditionKind::Level,
            10,
        ),
    ]
}
