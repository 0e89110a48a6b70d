//! Daily mission board - Short repeatable objectives
//!
//! Missions accumulate progress from tagged actions and pay out XP
//! once on completion. The board regenerates when the session crosses
//! into a new day.

use serde::{Deserialize, Serialize};

/// A single daily objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    /// Stable identifier, e.g. `"daily_chat"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// XP paid out once on completion.
    pub xp_reward: u32,
    /// Action tag this mission listens for (substring match).
    pub requirement: String,
    /// Paid-out flag. Completed missions ignore further progress.
    pub completed: bool,
    /// Accumulated progress, clamped to `target`.
    pub progress: u32,
    /// Progress needed to complete.
    pub target: u32,
}

impl Mission {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        xp_reward: u32,
        requirement: &str,
        target: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            xp_reward,
            requirement: requirement.to_string(),
            completed: false,
            progress: 0,
            target,
        }
    }

    /// Whether an action tag advances this mission.
    ///
    /// The match is substring-based: the action kind must appear inside
    /// the requirement tag. A solved problem additionally counts toward
    /// analysis missions, since a full analysis subsumes one.
    pub fn matches_action(&self, action: &str) -> bool {
        self.requirement.contains(action) || (action == "problem" && self.requirement.contains("analysis"))
    }

    /// Completion ratio in `[0.0, 1.0]` for progress bars.
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        f64::from(self.progress) / f64::from(self.target)
    }
}

/// Today's mission board, regenerated each day.
pub fn daily_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            "daily_analysis",
            "Daily Intel",
            "Run one strategic analysis",
            50,
            "analysis",
            1,
        ),
        Mission::new(
            "daily_chat",
            "Consultation",
            "Send 3 messages to the advisor",
            30,
            "chat",
            3,
        ),
        Mission::new(
            "daily_forecast",
            "Forecaster",
            "Generate a 6-month forecast",
            40,
            "forecast",
            1,
        ),
    ]
}
