//! Analysis crew - Sequential multi-agent pipeline
//!
//! Four fixed agents run a research, modeling, synthesis pipeline over
//! a scenario table. Each phase composes a prompt from the agent's
//! role, its task and the previous phase's output, then answers it
//! from the canned briefing library. The orchestrator coordinates but
//! executes no task of its own.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advisor;
use crate::scenario::{ScenarioKind, SeriesTable};

const RESEARCH_TASK: &str = "Analyze structured data using realist framework. Extract alliance cohesion metrics, resource dependencies, capability gaps. Identify security dilemmas and power transitions.";
const MODELING_TASK: &str = "Apply Prospect Theory (loss aversion analysis), SWOT matrix, and escalation ladder (reversible steps). Map contradictions in the strategic landscape.";
const SYNTHESIS_TASK: &str = "Create final advisory with: 1) Executive Summary (300 words), 2) No-regrets moves (90-day timeline), 3) KPI dashboard specs, 4) Risk register (top 5)";

/// One member of the analysis crew.
#[derive(Debug, Clone, Copy)]
pub struct CrewAgent {
    pub name: &'static str,
    pub role: &'static str,
    pub backstory: &'static str,
}

impl CrewAgent {
    /// Run one task: compose the full prompt and answer it from the
    /// briefing library. Role and backstory ride along in the prompt,
    /// so they participate in keyword routing.
    pub fn execute(&self, task: &str, context: &str) -> String {
        debug!(agent = self.name, "executing crew task");
        let prompt = format!(
            "Role: {}\nBackstory: {}\n\nTask: {}\nContext: {}\n\nProvide rigorous, structured analysis using established strategic frameworks.",
            self.role, self.backstory, task, context
        );
        advisor::generate_reply(&prompt)
    }
}

/// One titled block of crew output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewSection {
    pub title: String,
    pub body: String,
}

/// Assembled output of a full crew run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewReport {
    pub scenario: String,
    pub sections: Vec<CrewSection>,
}

impl CrewReport {
    /// Render all sections as one markdown document.
    pub fn combined(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("## {}\n{}", s.title, s.body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The fixed four-agent crew for one scenario.
pub struct StrategicCrew {
    scenario: ScenarioKind,
    orchestrator: CrewAgent,
    research: CrewAgent,
    model: CrewAgent,
    synthesis: CrewAgent,
}

impl StrategicCrew {
    pub fn new(scenario: ScenarioKind) -> Self {
        Self {
            scenario,
            orchestrator: CrewAgent {
                name: "Orchestrator",
                role: "Strategic Orchestrator",
                backstory: "Expert in systems thinking with Thucydidean realism. Coordinates workflow and ensures epistemic rigor.",
            },
            research: CrewAgent {
                name: "Research",
                role: "Geopolitical Risk Researcher",
                backstory: "Applies Thucydidean power transition theory and Sun Tzu principles. Uses base-rate discipline.",
            },
            model: CrewAgent {
                name: "Model",
                role: "Strategic Framework Modeler",
                backstory: "Expert in Prospect Theory, SWOT, and escalation ladders. Maps contradictions and feedback loops.",
            },
            synthesis: CrewAgent {
                name: "Synthesis",
                role: "Strategic Synthesizer",
                backstory: "Former policy advisor. Creates no-regrets moves and stop-loss protocols with tactical specificity.",
            },
        }
    }

    pub fn scenario(&self) -> ScenarioKind {
        self.scenario
    }

    /// Broad problem class of the scenario under analysis.
    pub fn focus(&self) -> &'static str {
        match self.scenario {
            ScenarioKind::Ukraine => "geopolitical",
            _ => "technological",
        }
    }

    /// All four members, orchestrator first.
    pub fn roster(&self) -> [&CrewAgent; 4] {
        [
            &self.orchestrator,
            &self.research,
            &self.model,
            &self.synthesis,
        ]
    }

    /// Run the three-phase pipeline over a scenario table.
    ///
    /// The research phase sees the scenario name and the serialized
    /// table; each later phase sees the previous phase's output as its
    /// context.
    pub fn run_analysis(&self, table: &SeriesTable) -> CrewReport {
        info!(scenario = self.scenario.as_str(), "running crew analysis");

        let data_json = serde_json::to_string_pretty(table).unwrap_or_default();
        let context = format!(
            "Scenario: {}\nData: {}",
            self.scenario.display_name(),
            data_json
        );

        let research_result = self.research.execute(RESEARCH_TASK, &context);
        let model_result = self.model.execute(MODELING_TASK, &research_result);
        let synthesis_result = self.synthesis.execute(SYNTHESIS_TASK, &model_result);

        CrewReport {
            scenario: self.scenario.display_name().to_string(),
            sections: vec![
                CrewSection {
                    title: "Research Phase".to_string(),
                    body: research_result,
                },
                CrewSection {
                    title: "Modeling Phase".to_string(),
                    body: model_result,
                },
                CrewSection {
                    title: "Strategic Recommendations".to_string(),
                    body: synthesis_result,
                },
            ],
        }
    }
}
