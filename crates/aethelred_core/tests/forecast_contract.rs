//! Forecast Contract Tests
//!
//! Exercises the forecaster through the public API across all three
//! model families and checks the numeric contract of the reports:
//!
//! 1. Regression bands widen toward the horizon; fallback bands do not
//! 2. A constant history projects the constant, inside its band
//! 3. Identical inputs always produce identical forecasts
//! 4. The fallback rides its bands on the noisy point, not the trend
//! 5. Reports carry horizon, confidence and per-column vectors
//!
//! ## Running
//!
//! ```bash
//! cargo test -p aethelred_core --test forecast_contract -- --nocapture
//! ```

use aethelred_core::forecast::{sample_std, LinearModel};
use aethelred_core::scenario::SeriesColumn;
use aethelred_core::{
    generate_synthetic_scenario, AdvisorSession, Config, ForecastMode, SeriesTable,
    StrategicForecaster,
};
use approx::assert_relative_eq;

fn fitted(mode: ForecastMode, scenario: &str) -> StrategicForecaster {
    let table = generate_synthetic_scenario(scenario, 12);
    let mut forecaster = StrategicForecaster::new(mode);
    forecaster.fit(&table, &table.column_names());
    forecaster
}

fn constant_table(value: f64, rows: usize) -> SeriesTable {
    SeriesTable {
        months: generate_synthetic_scenario("ukraine", rows).months,
        columns: vec![SeriesColumn {
            name: "Steady_State".to_string(),
            values: vec![value; rows],
        }],
    }
}

// ============================================================================
// Test: Band Geometry
// ============================================================================

#[test]
fn test_regression_bands_widen_with_step() {
    for mode in [ForecastMode::Linear, ForecastMode::Ensemble] {
        let mut forecaster = fitted(mode, "ukraine");
        let report = forecaster.forecast(8, 0.8);
        assert_eq!(report.method, mode);

        for col in &report.columns {
            assert_eq!(col.point.len(), 8);
            let mut prev = -1.0;
            for step in 0..8 {
                let half = col.upper[step] - col.point[step];
                assert_relative_eq!(
                    col.point[step] - col.lower[step],
                    half,
                    epsilon = 1e-9
                );
                assert!(half > prev, "{} stopped widening at {step}", col.name);
                prev = half;
            }
        }
    }
}

#[test]
fn test_fallback_bands_stay_constant_width() {
    let mut forecaster = fitted(ForecastMode::Statistical, "ai_arms_race");
    let table = generate_synthetic_scenario("ai_arms_race", 12);
    let report = forecaster.forecast(8, 0.8);
    assert_eq!(report.method, ForecastMode::Statistical);
    assert_eq!(report.columns.len(), 3);

    for col in &report.columns {
        let std = sample_std(table.column(&col.name).unwrap());
        assert!(std > 0.0, "{} history should vary", col.name);
        for step in 0..8 {
            assert_relative_eq!(col.upper[step] - col.point[step], std, epsilon = 1e-9);
            assert_relative_eq!(col.point[step] - col.lower[step], std, epsilon = 1e-9);
        }
    }
}

/// Zero historical variance collapses the band onto the point itself:
/// both regression families must project the constant and keep every
/// step inside [lower, upper].
#[test]
fn test_constant_series_projects_the_constant_inside_its_band() {
    for mode in [ForecastMode::Linear, ForecastMode::Ensemble] {
        let table = constant_table(50.0, 12);
        let mut forecaster = StrategicForecaster::new(mode);
        forecaster.fit(&table, &table.column_names());
        let report = forecaster.forecast(6, 0.95);

        assert_eq!(report.columns.len(), 1);
        let col = &report.columns[0];
        for step in 0..6 {
            assert_relative_eq!(col.point[step], 50.0, epsilon = 1e-9);
            assert!(
                col.lower[step] <= col.point[step] && col.point[step] <= col.upper[step],
                "{mode:?} step {step} left its band"
            );
        }
    }
}

// ============================================================================
// Test: Determinism
// ============================================================================

#[test]
fn test_identical_runs_are_bit_identical() {
    for mode in [
        ForecastMode::Linear,
        ForecastMode::Ensemble,
        ForecastMode::Statistical,
    ] {
        let a = fitted(mode, "cyber_escalation").forecast(6, 0.8);
        let b = fitted(mode, "cyber_escalation").forecast(6, 0.8);

        assert_eq!(a.columns.len(), b.columns.len());
        for (ca, cb) in a.columns.iter().zip(&b.columns) {
            assert_eq!(ca.name, cb.name);
            assert_eq!(ca.point, cb.point);
            assert_eq!(ca.lower, cb.lower);
            assert_eq!(ca.upper, cb.upper);
        }
    }
}

#[test]
fn test_report_ids_are_unique_per_run() {
    let mut forecaster = fitted(ForecastMode::Linear, "ukraine");
    let first = forecaster.forecast(6, 0.8);
    let second = forecaster.forecast(6, 0.8);
    assert_ne!(first.forecast_id, second.forecast_id);
    // Same fitted models, same projections.
    assert_eq!(first.columns[0].point, second.columns[0].point);
}

// ============================================================================
// Test: Fallback Noise Placement
// ============================================================================

/// The fallback adds noise to the trend prediction and centers the
/// band on the noisy value. At least one step per column should land
/// off the bare trend line.
#[test]
fn test_fallback_point_departs_from_bare_trend() {
    let table = generate_synthetic_scenario("trade_war", 12);
    let mut forecaster = StrategicForecaster::new(ForecastMode::Statistical);
    forecaster.fit(&table, &table.column_names());
    let report = forecaster.forecast(6, 0.8);

    for col in &report.columns {
        let history = table.column(&col.name).unwrap();
        let trend = LinearModel::fit(history);
        let off_trend = (0..6).any(|step| {
            (col.point[step] - trend.predict((12 + step) as f64)).abs() > 1e-9
        });
        assert!(off_trend, "{} produced noiseless fallback", col.name);
    }
}

// ============================================================================
// Test: Report Shape
// ============================================================================

#[test]
fn test_report_carries_request_metadata() {
    let mut forecaster = fitted(ForecastMode::Ensemble, "ukraine");
    let report = forecaster.forecast(9, 0.65);
    assert_eq!(report.horizon, 9);
    assert_eq!(report.confidence_level, 0.65);
    assert!(report.notes.is_empty());
    assert!(!report.forecast_id.is_empty());
    for col in &report.columns {
        assert_eq!(col.point.len(), 9);
        assert_eq!(col.lower.len(), 9);
        assert_eq!(col.upper.len(), 9);
    }
}

#[test]
fn test_columns_follow_history_order() {
    let table = generate_synthetic_scenario("ukraine", 12);
    let mut forecaster = StrategicForecaster::new(ForecastMode::Linear);
    forecaster.fit(&table, &table.column_names());
    let report = forecaster.forecast(4, 0.8);

    let names: Vec<&str> = report.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Alliance_Cohesion",
            "Energy_Dependency",
            "Cyber_Resilience",
            "Military_Readiness"
        ]
    );
}

// ============================================================================
// Test: Session Integration
// ============================================================================

/// The session-level forecast run wires scenario, axis and report
/// together: future month labels continue where the history ends.
#[test]
fn test_session_forecast_axis_continues_history() {
    let mut session = AdvisorSession::starting_on(
        Config::default(),
        chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    );
    let run = session.run_forecast(Some("ukraine"), Some(6));

    assert_eq!(run.history.len(), 12);
    let future = run.history.future_months(run.report.horizon);
    assert_eq!(future.len(), 6);
    assert!(future[0] > *run.history.months.last().unwrap());
    for w in future.windows(2) {
        assert!(w[0] < w[1], "future axis must be increasing");
    }
}
