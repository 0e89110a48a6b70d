//! Aethelred Core - Strategic advisory engine
//!
//! Gamified progression, deterministic scenario data, per-indicator
//! forecasting and a canned advisory pipeline behind one session
//! facade. No model inference, no persistence; everything lives for
//! the length of a session.

pub mod achievements;
pub mod advisor;
pub mod config;
pub mod crew;
pub mod engine;
pub mod forecast;
pub mod missions;
pub mod profile;
pub mod scenario;
pub mod session;
pub mod workflow;

pub use config::Config;
pub use engine::GamificationEngine;
pub use forecast::{ForecastMode, ForecastReport, StrategicForecaster};
pub use profile::Profile;
pub use scenario::{generate_synthetic_scenario, ScenarioKind, SeriesTable};
pub use session::{AdvisorSession, ForecastRun};
pub use workflow::{WorkflowEngine, WorkflowKind};
