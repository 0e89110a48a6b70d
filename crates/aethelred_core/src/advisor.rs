//! Canned advisor - Keyword-routed strategic briefings
//!
//! No model inference happens here. Prompts are matched against a
//! small keyword table and answered from a fixed briefing library, in
//! priority order: conflict, forecast, risk, framework, general.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Briefing category a prompt resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorTopic {
    ConflictAnalysis,
    ForecastBriefing,
    RiskAssessment,
    StrategicFramework,
    General,
}

impl AdvisorTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorTopic::ConflictAnalysis => "conflict_analysis",
            AdvisorTopic::ForecastBriefing => "forecast_briefing",
            AdvisorTopic::RiskAssessment => "risk_assessment",
            AdvisorTopic::StrategicFramework => "strategic_framework",
            AdvisorTopic::General => "general",
        }
    }
}

/// Resolve a prompt to a briefing category.
///
/// Case-insensitive substring checks, first match wins. Conflict
/// keywords outrank forecast keywords, which outrank risk, which
/// outrank framework.
pub fn route_topic(prompt: &str) -> AdvisorTopic {
    let p = prompt.to_lowercase();
    let topic = if p.contains("ukraine") || p.contains("russia") {
        AdvisorTopic::ConflictAnalysis
    } else if p.contains("forecast") || p.contains("predict") {
        AdvisorTopic::ForecastBriefing
    } else if p.contains("risk") {
        AdvisorTopic::RiskAssessment
    } else if p.contains("swot") || p.contains("strategy") {
        AdvisorTopic::StrategicFramework
    } else {
        AdvisorTopic::General
    };
    debug!(topic = topic.as_str(), "routed advisor prompt");
    topic
}

/// Produce the canned briefing for a prompt.
pub fn generate_reply(prompt: &str) -> String {
    let text = match route_topic(prompt) {
        AdvisorTopic::ConflictAnalysis => CONFLICT_ANALYSIS,
        AdvisorTopic::ForecastBriefing => FORECAST_BRIEFING,
        AdvisorTopic::RiskAssessment => RISK_ASSESSMENT,
        AdvisorTopic::StrategicFramework => STRATEGIC_FRAMEWORK,
        AdvisorTopic::General => GENERAL_ADVISORY,
    };
    text.to_string()
}

/// Prompt behind a one-click action button, by action key.
pub fn quick_action_prompt(action: &str) -> Option<&'static str> {
    match action {
        "forecast" => Some("Generate 6-month forecast for current scenario"),
        "risk" => Some("Provide risk assessment matrix and mitigation strategies"),
        "swot" => Some("Conduct SWOT analysis on strategic position"),
        "research" => Some("Deep research on historical precedents and realist framework"),
        _ => None,
    }
}

const CONFLICT_ANALYSIS: &str = "**Executive Summary: Ukraine-Russia Conflict Analysis**

🔹 **Strategic Assessment (Thucydidean Framework)**
- Security Dilemma: NATO expansion fears vs. sovereignty rights creating irreconcilable structural pressures
- Power Transition: Asymmetric capabilities favor defensive attrition (Ukraine) vs. offensive maneuver (Russia)
- Honor/Interest Calculus: Both parties locked in commitment escalation; face-saving exit barriers exceed tactical costs

🔹 **Predictive Indicators**
- Alliance Cohesion trending down (-0.5σ/month) due to fatigue factors
- Energy dependency reduction accelerating (-2pts/month) via LNG diversification
- Cyber resilience improving (+1.5σ/month) through NATO capability transfers

🔹 **No-Regrets Moves (90-Day Horizon)**
1. **Immediate**: Pre-position medical stockpiles in Poland/Romania (escalation hedge)
2. **Short-term**: Accelerate renewable infrastructure to reduce Russian energy leverage below 30%
3. **Medium-term**: Establish cyber-defense pact with Baltic states (mutual assistance clause)

🔹 **Risk Register**
- **HIGH**: Winter energy coercion (Probability: 65%, Impact: Critical)
- **MEDIUM**: Cyber infrastructure attacks (Probability: 40%, Impact: High)
- **LOW**: Nuclear escalation (Probability: <5%, Impact: Catastrophic)

🔹 **Epistemic Confidence**: 7.2/10 (High OSINT availability, fog of war persists in tactical domains)";

const FORECAST_BRIEFING: &str = "**Predictive Modeling Results**

Using ensemble methods (Gradient Boosting + Linear Trend):

📊 **6-Month Trajectory**
- Alliance Cohesion: Decline to 58.3 (CI: 54.1-62.5) - concerns over sustained commitment
- Energy Independence: Improvement to 28.4% dependency (CI: 24.2-32.6) - diversification working
- Cyber Resilience: Strengthening to 82.1 (CI: 78.3-85.9) - capability transfers effective
- Military Readiness: Stable at 71.2 (CI: 67.8-74.6) - attrition equilibrium

⚠️ **Critical Inflection Points**
1. Month 3: Potential alliance stress if no territorial gains materialize
2. Month 5: Energy infrastructure vulnerability window (pre-diversification completion)
3. Month 6: Decision point for industrial mobilization scale-up

📈 **Confidence Intervals**: 80% prediction intervals shown; model MAPE ~12% on historical validation";

const RISK_ASSESSMENT: &str = "**Risk Assessment Matrix**

| Risk Category | Probability | Impact | Velocity | Mitigation Priority |
|---------------|-------------|--------|----------|---------------------|
| Energy Coercion | 65% | Critical | Medium | **P0** - Diversify now |
| Cyber Escalation | 40% | High | Fast | **P1** - Harden infrastructure |
| Supply Disruption | 35% | Medium | Slow | **P2** - Stockpile reserves |
| Alliance Fracture | 25% | High | Slow | **P1** - Diplomatic engagement |

**Cascading Effects Analysis**:
Energy crisis → Industrial slowdown → Social unrest → Political pressure → Strategic flexibility reduction

**Recommended Hedging**: Maintain 90-day strategic petroleum reserve; establish redundant supply corridors via Romania.";

const STRATEGIC_FRAMEWORK: &str = "**SWOT Analysis Framework**

**Strengths (Internal)**
- Technological asymmetry favoring defensive capabilities
- High international legitimacy and material support
- Terrain advantages (urban defense, winter conditions)

**Weaknesses (Internal)**
- Resource dependency on external supply chains
- Demographic constraints on manpower
- Infrastructure vulnerability to long-range fires

**Opportunities (External)**
- Alliance capability transfers accelerating
- Energy transition reducing adversary leverage
- Technological innovation in autonomous systems

**Threats (External)**
- Alliance cohesion decay over time (historical pattern: 18-month fatigue cycle)
- Escalation to WMD domain (low probability, high impact)
- Economic warfare spillover effects

**Strategic Recommendation**: Exploit window of alliance solidarity (T+0 to T+12 months) to achieve durable territorial security before fatigue factors dominate.";

const GENERAL_ADVISORY: &str = "**Strategic Advisory Response**

Based on problem-solving framework analysis:

1. **Problem Decomposition**: The scenario presents a complex adaptive system with multiple equilibria
2. **Key Variables**: Alliance cohesion, resource dependency, capability gaps, escalation thresholds
3. **Analytical Approach**: Applied realist framework (Mearsheimer/Waltz) + Prospect Theory (loss aversion bias detected in stakeholder preferences)

**Actionable Recommendations**:
- **No-regrets move**: Diversify critical supply chains immediately (cost: medium, benefit: high resilience)
- **Stop-loss protocol**: Define clear de-escalation triggers before commitment traps form
- **Information advantage**: Invest in OSINT capabilities for early warning (6-month lead time critical)

*Analysis confidence: Moderate-High. Recommend red-team review for cognitive bias checks.*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_keywords_route_first() {
        assert_eq!(route_topic("What about Ukraine?"), AdvisorTopic::ConflictAnalysis);
        assert_eq!(route_topic("RUSSIA energy leverage"), AdvisorTopic::ConflictAnalysis);
        // Conflict keywords outrank the rest even when both appear.
        assert_eq!(
            route_topic("forecast the ukraine situation"),
            AdvisorTopic::ConflictAnalysis
        );
    }

    #[test]
    fn test_forecast_and_predict_keywords() {
        assert_eq!(route_topic("Give me a forecast"), AdvisorTopic::ForecastBriefing);
        assert_eq!(
            route_topic("predict the next six months"),
            AdvisorTopic::ForecastBriefing
        );
    }

    #[test]
    fn test_risk_and_framework_keywords() {
        assert_eq!(route_topic("top risk factors"), AdvisorTopic::RiskAssessment);
        assert_eq!(route_topic("run a swot"), AdvisorTopic::StrategicFramework);
        assert_eq!(
            route_topic("what is our strategy"),
            AdvisorTopic::StrategicFramework
        );
    }

    #[test]
    fn test_unmatched_prompt_goes_general() {
        assert_eq!(route_topic("hello there"), AdvisorTopic::General);
        assert_eq!(route_topic(""), AdvisorTopic::General);
    }

    #[test]
    fn test_reply_matches_routed_topic() {
        assert!(generate_reply("ukraine").contains("Thucydidean"));
        assert!(generate_reply("forecast").contains("Predictive Modeling"));
        assert!(generate_reply("risk").contains("Risk Assessment Matrix"));
        assert!(generate_reply("swot").contains("SWOT Analysis"));
        assert!(generate_reply("hi").contains("Strategic Advisory Response"));
    }

    #[test]
    fn test_quick_action_prompts_route_sensibly() {
        let forecast = quick_action_prompt("forecast").unwrap();
        assert_eq!(route_topic(forecast), AdvisorTopic::ForecastBriefing);
        let risk = quick_action_prompt("risk").unwrap();
        assert_eq!(route_topic(risk), AdvisorTopic::RiskAssessment);
        let swot = quick_action_prompt("swot").unwrap();
        assert_eq!(route_topic(swot), AdvisorTopic::StrategicFramework);
        // The research prompt carries no routing keyword on purpose.
        let research = quick_action_prompt("research").unwrap();
        assert_eq!(route_topic(research), AdvisorTopic::General);
        assert!(quick_action_prompt("dance").is_none());
    }
}
