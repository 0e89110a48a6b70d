//! Decision workflows - Fixed step sequences with progress tracking
//!
//! Four built-in frameworks. The engine holds at most one active
//! workflow and a cursor; stepping past the end returns nothing and
//! leaves the cursor parked.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The built-in decision frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Standard,
    Rapid,
    Strategic,
    Innovation,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Standard => "standard",
            WorkflowKind::Rapid => "rapid",
            WorkflowKind::Strategic => "strategic",
            WorkflowKind::Innovation => "innovation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(WorkflowKind::Standard),
            "rapid" => Some(WorkflowKind::Rapid),
            "strategic" => Some(WorkflowKind::Strategic),
            "innovation" => Some(WorkflowKind::Innovation),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowKind::Standard => "Standard Problem Solving",
            WorkflowKind::Rapid => "Rapid Decision",
            WorkflowKind::Strategic => "Strategic Planning",
            WorkflowKind::Innovation => "Innovation Process",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowKind::Standard => "6-step comprehensive problem-solving framework",
            WorkflowKind::Rapid => "3-step crisis decision protocol",
            WorkflowKind::Strategic => "6-step adaptive strategy cycle",
            WorkflowKind::Innovation => "4-step double-diamond innovation framework",
        }
    }

    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            WorkflowKind::Standard => {
                &["Define", "Analyze", "Ideate", "Decide", "Implement", "Review"]
            }
            WorkflowKind::Rapid => &["Assess", "Decide", "Act"],
            WorkflowKind::Strategic => {
                &["Scan", "Sense", "Decide", "Align", "Execute", "Adapt"]
            }
            WorkflowKind::Innovation => &["Discover", "Define", "Develop", "Deliver"],
        }
    }

    pub fn all() -> [WorkflowKind; 4] {
        [
            WorkflowKind::Standard,
            WorkflowKind::Rapid,
            WorkflowKind::Strategic,
            WorkflowKind::Innovation,
        ]
    }
}

/// Cursor over at most one active workflow.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WorkflowEngine {
    current: Option<WorkflowKind>,
    step: usize,
}

impl WorkflowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a workflow by key, resetting the cursor. An unknown
    /// key clears the active workflow and returns `None`.
    pub fn start(&mut self, id: &str) -> Option<WorkflowKind> {
        self.current = WorkflowKind::from_name(id);
        self.step = 0;
        match self.current {
            Some(kind) => debug!(workflow = kind.as_str(), "workflow started"),
            None => warn!(id, "unknown workflow id"),
        }
        self.current
    }

    pub fn current(&self) -> Option<WorkflowKind> {
        self.current
    }

    /// Name of the next step, advancing the cursor. `None` once the
    /// sequence is exhausted or when nothing is active.
    pub fn next_step(&mut self) -> Option<&'static str> {
        let kind = self.current?;
        let steps = kind.steps();
        if self.step < steps.len() {
            let name = steps[self.step];
            self.step += 1;
            Some(name)
        } else {
            None
        }
    }

    /// Fraction of steps consumed, zero when nothing is active.
    pub fn progress(&self) -> f64 {
        match self.current {
            Some(kind) => self.step as f64 / kind.steps().len() as f64,
            None => 0.0,
        }
    }

    pub fn step_index(&self) -> usize {
        self.step
    }
}
