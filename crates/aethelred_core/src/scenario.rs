//! Synthetic scenario data - Deterministic geopolitical indicator series
//!
//! Each scenario defines a set of named indicators with a starting
//! level, a monthly drift and a volatility. Generation runs a seeded
//! random walk per indicator, so the same scenario always produces the
//! same table.

use chrono::{Days, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fixed seed for scenario generation. Identical inputs always yield
/// identical tables.
pub const SCENARIO_SEED: u64 = 42;

/// The built-in scenario library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    #[default]
    Ukraine,
    AiArmsRace,
    TradeWar,
    CyberEscalation,
}

/// Starting level, monthly drift and volatility for one indicator.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub name: &'static str,
    pub start: f64,
    pub drift: f64,
    pub volatility: f64,
}

const fn spec(name: &'static str, start: f64, drift: f64, volatility: f64) -> IndicatorSpec {
    IndicatorSpec {
        name,
        start,
        drift,
        volatility,
    }
}

const UKRAINE_INDICATORS: [IndicatorSpec; 4] = [
    spec("Alliance_Cohesion", 65.0, -0.5, 2.0),
    spec("Energy_Dependency", 45.0, -2.0, 3.0),
    spec("Cyber_Resilience", 70.0, 1.5, 2.0),
    spec("Military_Readiness", 60.0, 0.8, 1.5),
];

const AI_ARMS_RACE_INDICATORS: [IndicatorSpec; 3] = [
    spec("AI_Capability_Gap", 50.0, 4.0, 5.0),
    spec("Safety_Compliance", 35.0, 2.0, 3.0),
    spec("R&D_Intensity", 65.0, 3.5, 4.0),
];

const TRADE_WAR_INDICATORS: [IndicatorSpec; 3] = [
    spec("Supply_Chain_Stress", 40.0, 3.0, 4.0),
    spec("Tariff_Impact", 30.0, 5.0, 3.0),
    spec("Currency_Volatility", 50.0, 2.0, 6.0),
];

const CYBER_ESCALATION_INDICATORS: [IndicatorSpec; 3] = [
    spec("Attack_Frequency", 20.0, 8.0, 5.0),
    spec("Defense_Effectiveness", 75.0, -1.0, 2.0),
    spec("Critical_Infrastructure_Risk", 35.0, 4.0, 3.0),
];

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Ukraine => "ukraine",
            ScenarioKind::AiArmsRace => "ai_arms_race",
            ScenarioKind::TradeWar => "trade_war",
            ScenarioKind::CyberEscalation => "cyber_escalation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScenarioKind::Ukraine => "Ukraine-Russia Conflict",
            ScenarioKind::AiArmsRace => "AI Arms Race",
            ScenarioKind::TradeWar => "Trade Wars",
            ScenarioKind::CyberEscalation => "Cyberwar Escalation",
        }
    }

    /// Look up a scenario by canonical key. `None` for unknown keys;
    /// callers that need the lenient behavior use
    /// [`generate_synthetic_scenario`] directly.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ukraine" => Some(ScenarioKind::Ukraine),
            "ai_arms_race" => Some(ScenarioKind::AiArmsRace),
            "trade_war" => Some(ScenarioKind::TradeWar),
            "cyber_escalation" => Some(ScenarioKind::CyberEscalation),
            _ => None,
        }
    }

    pub fn all() -> [ScenarioKind; 4] {
        [
            ScenarioKind::Ukraine,
            ScenarioKind::AiArmsRace,
            ScenarioKind::TradeWar,
            ScenarioKind::CyberEscalation,
        ]
    }

    pub fn indicators(&self) -> &'static [IndicatorSpec] {
        match self {
            ScenarioKind::Ukraine => &UKRAINE_INDICATORS,
            ScenarioKind::AiArmsRace => &AI_ARMS_RACE_INDICATORS,
            ScenarioKind::TradeWar => &TRADE_WAR_INDICATORS,
            ScenarioKind::CyberEscalation => &CYBER_ESCALATION_INDICATORS,
        }
    }
}

/// One named indicator series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// A month-indexed table of indicator series, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesTable {
    /// Month-end label for each row.
    pub months: Vec<NaiveDate>,
    /// Indicator columns, all the same length as `months`.
    pub columns: Vec<SeriesColumn>,
}

impl SeriesTable {
    /// Number of rows (months) in the table.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Most recent value of a column.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.column(name).and_then(|v| v.last().copied())
    }

    /// Month-end labels continuing past the last row, for forecast axes.
    pub fn future_months(&self, horizon: usize) -> Vec<NaiveDate> {
        let offset = self.months.len() as u32;
        (0..horizon as u32).map(|i| month_end(offset + i)).collect()
    }
}

/// Month-end date for the i-th month of the series epoch (2024-01).
fn month_end(index: u32) -> NaiveDate {
    let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    epoch + Months::new(index + 1) - Days::new(1)
}

/// Standard normal draw via the Box-Muller transform, scaled.
pub(crate) fn sample_normal<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the argument of ln strictly positive.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let radius = (-2.0 * u1.ln()).sqrt();
    let angle = std::f64::consts::TAU * u2;
    mean + std_dev * radius * angle.cos()
}

/// Build the indicator table for a scenario.
///
/// Each column is a random walk: indicator start plus the cumulative
/// sum of seeded normal draws, clipped to the 0-100 index scale after
/// the walk completes. An unrecognized key degrades to the default
/// scenario rather than erroring.
pub fn generate_synthetic_scenario(kind: &str, months: usize) -> SeriesTable {
    let scenario = ScenarioKind::from_name(kind).unwrap_or_else(|| {
        warn!(kind, "unknown scenario kind, using default");
        ScenarioKind::default()
    });

    let mut rng = StdRng::seed_from_u64(SCENARIO_SEED);
    let dates: Vec<NaiveDate> = (0..months as u32).map(month_end).collect();

    let mut columns = Vec::with_capacity(scenario.indicators().len());
    for spec in scenario.indicators() {
        let mut level = spec.start;
        let mut values = Vec::with_capacity(months);
        for _ in 0..months {
            level += sample_normal(&mut rng, spec.drift, spec.volatility);
            values.push(level);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 100.0);
        }
        columns.push(SeriesColumn {
            name: spec.name.to_string(),
            values,
        });
    }

    SeriesTable {
        months: dates,
        columns,
    }
}
