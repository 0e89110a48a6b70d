//! Player profile - Session-scoped progression state
//!
//! Single source of truth for XP, level, streaks, counters, the chat
//! transcript and the pending notification queue. All rule evaluation
//! lives in [`crate::engine`]; this module is plain state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::achievements::{self, Achievement};
use crate::missions::{self, Mission};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human operator.
    User,
    /// The canned strategic advisor.
    Advisor,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Advisor => "advisor",
        }
    }
}

/// One entry in the session chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn advisor(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Advisor,
            text: text.into(),
        }
    }
}

/// Category of a queued progression event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    LevelUp,
    AchievementUnlocked,
    MissionComplete,
}

/// A progression event waiting to be surfaced to the user.
///
/// Rule evaluation pushes these; the presentation layer drains them
/// via [`crate::engine::GamificationEngine::drain_notifications`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Full progression state for one advisory session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Lifetime experience points. Monotonically non-decreasing.
    pub xp: u32,
    /// Current level, derived from `xp` (see `engine::level_for_xp`).
    pub level: u32,
    /// Count of completed full strategic analyses.
    pub problems_solved: u32,
    /// Count of analysis actions (forecasts, assessments).
    pub analysis_runs: u32,
    /// Running score mirror of `xp`, kept for display totals.
    pub total_points: u32,
    /// Consecutive active days, including today once counted.
    pub current_streak: u32,
    /// Most recent day on which activity was recorded.
    pub last_active: NaiveDate,
    /// Achievement catalog with per-entry unlock flags.
    pub achievements: Vec<Achievement>,
    /// Today's mission board.
    pub missions: Vec<Mission>,
    /// Day the current mission board was generated.
    pub missions_generated_on: NaiveDate,
    /// Chat transcript, oldest first.
    pub chat: Vec<ChatMessage>,
    /// Progression events not yet shown to the user.
    pub notifications: Vec<Notification>,
}

impl Profile {
    /// Fresh profile: level 1, zero XP, full locked catalog, today's
    /// missions, empty transcript.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            xp: 0,
            level: 1,
            problems_solved: 0,
            analysis_runs: 0,
            total_points: 0,
            current_streak: 0,
            last_active: today,
            achievements: achievements::default_achievements(),
            missions: missions::daily_missions(),
            missions_generated_on: today,
            chat: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Achievements already unlocked, in catalog order.
    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }

    /// Missions completed today.
    pub fn completed_missions(&self) -> usize {
        self.missions.iter().filter(|m| m.completed).count()
    }

    pub fn push_notification(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification::new(kind, message));
    }
}
