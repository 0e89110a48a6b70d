//! Strategic forecaster - Per-indicator trend extrapolation
//!
//! Fits one model per indicator column over the month index and
//! projects it over a forward horizon with widening confidence bands.
//! When no models are available the forecaster degrades to a plain
//! statistical extrapolation with constant bands; callers never see an
//! error from this module.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::scenario::{sample_normal, SeriesTable};

/// z-multiplier for the regression interval width.
const CONFIDENCE_Z: f64 = 1.96;
/// Fallback noise scale, as a fraction of the historical deviation.
const FALLBACK_NOISE_FRACTION: f64 = 0.1;
/// Seed for the fallback noise stream.
const FALLBACK_NOISE_SEED: u64 = 42;

/// Boosting rounds for ensemble mode.
const N_ESTIMATORS: usize = 100;
/// Shrinkage applied to each boosting round.
const LEARNING_RATE: f64 = 0.1;
/// Depth limit per regression tree.
const MAX_DEPTH: usize = 3;

/// Which model family the forecaster fits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    /// Ordinary least squares over the month index.
    Linear,
    /// Gradient-boosted regression trees.
    #[default]
    Ensemble,
    /// No model fitting; every forecast uses the statistical fallback.
    Statistical,
}

impl ForecastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMode::Linear => "linear",
            ForecastMode::Ensemble => "ensemble",
            ForecastMode::Statistical => "statistical",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(ForecastMode::Linear),
            "ensemble" => Some(ForecastMode::Ensemble),
            "statistical" => Some(ForecastMode::Statistical),
            _ => None,
        }
    }
}

/// Least-squares line over the series index.
#[derive(Debug, Clone, Copy)]
pub struct LinearModel {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearModel {
    /// Fit `y = intercept + slope * i` over `i = 0..values.len()`.
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                intercept: 0.0,
                slope: 0.0,
            };
        }
        let n_f = n as f64;
        let x_mean = (n_f - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n_f;

        let mut num = 0.0;
        let mut den = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            num += dx * (y - y_mean);
            den += dx * dx;
        }

        let slope = if den == 0.0 { 0.0 } else { num / den };
        Self {
            intercept: y_mean - slope * x_mean,
            slope,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Depth-limited regression tree over a single feature.
#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, x: f64) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                threshold,
                left,
                right,
            } => {
                if x <= *threshold {
                    left.predict(x)
                } else {
                    right.predict(x)
                }
            }
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_sq_error(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

/// Best threshold by total squared error, or `None` when no split
/// improves on the parent node.
fn best_split(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    let parent_sse = sum_sq_error(ys);
    let mut best: Option<(f64, f64)> = None;

    for k in 1..n {
        if xs[k - 1] == xs[k] {
            continue;
        }
        let sse = sum_sq_error(&ys[..k]) + sum_sq_error(&ys[k..]);
        if sse < parent_sse - 1e-12 && best.map_or(true, |(b, _)| sse < b) {
            best = Some((sse, (xs[k - 1] + xs[k]) / 2.0));
        }
    }

    best.map(|(_, threshold)| threshold)
}

fn build_node(xs: &[f64], ys: &[f64], depth: usize) -> TreeNode {
    if depth == 0 || ys.len() < 2 {
        return TreeNode::Leaf { value: mean(ys) };
    }
    let Some(threshold) = best_split(xs, ys) else {
        return TreeNode::Leaf { value: mean(ys) };
    };

    let split_at = xs.partition_point(|&x| x <= threshold);
    TreeNode::Split {
        threshold,
        left: Box::new(build_node(&xs[..split_at], &ys[..split_at], depth - 1)),
        right: Box::new(build_node(&xs[split_at..], &ys[split_at..], depth - 1)),
    }
}

/// Gradient-boosted regression trees over the series index.
///
/// Squared loss, constant base prediction, fixed shrinkage. Inputs
/// arrive sorted by index so tree fitting scans split positions in
/// order. Prediction beyond the fitted range is constant, matching the
/// behavior of tree ensembles generally.
#[derive(Debug, Clone)]
pub struct BoostedModel {
    base: f64,
    trees: Vec<TreeNode>,
}

impl BoostedModel {
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let base = mean(ys);
        let mut residuals: Vec<f64> = ys.iter().map(|y| y - base).collect();
        let mut trees = Vec::with_capacity(N_ESTIMATORS);

        for _ in 0..N_ESTIMATORS {
            let tree = build_node(xs, &residuals, MAX_DEPTH);
            for (r, &x) in residuals.iter_mut().zip(xs) {
                *r -= LEARNING_RATE * tree.predict(x);
            }
            trees.push(tree);
        }

        Self { base, trees }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.base
            + self
                .trees
                .iter()
                .map(|t| LEARNING_RATE * t.predict(x))
                .sum::<f64>()
    }
}

#[derive(Debug, Clone)]
enum FittedModel {
    Linear(LinearModel),
    Boosted(BoostedModel),
}

impl FittedModel {
    fn predict(&self, x: f64) -> f64 {
        match self {
            FittedModel::Linear(m) => m.predict(x),
            FittedModel::Boosted(m) => m.predict(x),
        }
    }
}

/// Forecast bands for one indicator column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnForecast {
    pub name: String,
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// A complete forecast run across all fitted columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecast_id: String,
    pub generated_at: DateTime<Utc>,
    /// Steps projected past the end of the fitted history.
    pub horizon: usize,
    /// Confidence level the caller asked for. Recorded for the report;
    /// interval width uses a fixed z-multiplier.
    pub confidence_level: f64,
    /// Model family that actually produced the numbers.
    pub method: ForecastMode,
    pub columns: Vec<ColumnForecast>,
    pub notes: Vec<String>,
}

/// Sample standard deviation (n-1 divisor).
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    var.sqrt()
}

/// Per-indicator forecaster over a fitted [`SeriesTable`].
pub struct StrategicForecaster {
    mode: ForecastMode,
    models: Vec<(String, FittedModel)>,
    history: Option<SeriesTable>,
    noise_rng: StdRng,
}

impl StrategicForecaster {
    pub fn new(mode: ForecastMode) -> Self {
        Self {
            mode,
            models: Vec::new(),
            history: None,
            noise_rng: StdRng::seed_from_u64(FALLBACK_NOISE_SEED),
        }
    }

    pub fn mode(&self) -> ForecastMode {
        self.mode
    }

    /// Store the history table and fit one model per target column.
    ///
    /// Statistical mode stores the table and fits nothing; forecasts
    /// then run entirely through the fallback. Missing target columns
    /// are skipped with a warning.
    pub fn fit(&mut self, table: &SeriesTable, target_columns: &[String]) {
        self.history = Some(table.clone());
        self.models.clear();

        if self.mode == ForecastMode::Statistical {
            debug!("statistical mode, skipping model fit");
            return;
        }

        for name in target_columns {
            let Some(values) = table.column(name) else {
                warn!(column = %name, "target column missing from table");
                continue;
            };
            let model = match self.mode {
                ForecastMode::Linear => FittedModel::Linear(LinearModel::fit(values)),
                _ => {
                    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
                    FittedModel::Boosted(BoostedModel::fit(&xs, values))
                }
            };
            self.models.push((name.clone(), model));
        }

        info!(
            models = self.models.len(),
            mode = self.mode.as_str(),
            "forecast models fitted"
        );
    }

    /// Project every fitted column `horizon` steps forward.
    ///
    /// With fitted models: point predictions from the model, band
    /// half-width `1.96 * std * sqrt(step / horizon)` so uncertainty
    /// widens toward the horizon. Without models the statistical
    /// fallback runs instead. Without any fitted history the report
    /// comes back empty with a note.
    pub fn forecast(&mut self, horizon: usize, confidence: f64) -> ForecastReport {
        info!(horizon, mode = self.mode.as_str(), "generating forecast");

        let Some(history) = &self.history else {
            warn!("forecast requested before any history was fitted");
            return ForecastReport {
                forecast_id: Uuid::new_v4().to_string(),
                generated_at: Utc::now(),
                horizon,
                confidence_level: confidence,
                method: self.mode,
                columns: vec![],
                notes: vec!["No fitted history available".to_string()],
            };
        };

        if self.models.is_empty() {
            return Self::statistical_forecast(history, &mut self.noise_rng, horizon, confidence);
        }

        let last_idx = history.len();
        let mut columns = Vec::with_capacity(self.models.len());
        for (name, model) in &self.models {
            let Some(values) = history.column(name) else {
                continue;
            };
            let std = sample_std(values);

            let mut point = Vec::with_capacity(horizon);
            let mut lower = Vec::with_capacity(horizon);
            let mut upper = Vec::with_capacity(horizon);
            for step in 0..horizon {
                let y = model.predict((last_idx + step) as f64);
                let margin =
                    CONFIDENCE_Z * std * ((step as f64 + 1.0) / horizon as f64).sqrt();
                point.push(y);
                lower.push(y - margin);
                upper.push(y + margin);
            }

            columns.push(ColumnForecast {
                name: name.clone(),
                point,
                lower,
                upper,
            });
        }

        ForecastReport {
            forecast_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            horizon,
            confidence_level: confidence,
            method: self.mode,
            columns,
            notes: vec![],
        }
    }

    /// Trend-plus-noise fallback over every history column.
    ///
    /// Least-squares trend extrapolation with seeded noise draws, band
    /// half-width fixed at one historical standard deviation. The band
    /// rides on the noisy point, so it is deliberately not symmetric
    /// around the bare trend line.
    fn statistical_forecast(
        history: &SeriesTable,
        rng: &mut StdRng,
        horizon: usize,
        confidence: f64,
    ) -> ForecastReport {
        debug!("running statistical fallback forecast");
        let n = history.len();

        let mut columns = Vec::with_capacity(history.columns.len());
        for col in &history.columns {
            let trend = LinearModel::fit(&col.values);
            let std = sample_std(&col.values);

            let mut point = Vec::with_capacity(horizon);
            let mut lower = Vec::with_capacity(horizon);
            let mut upper = Vec::with_capacity(horizon);
            for step in 0..horizon {
                let noise = sample_normal(rng, 0.0, std * FALLBACK_NOISE_FRACTION);
                let y = trend.predict((n + step) as f64) + noise;
                point.push(y);
                lower.push(y - std);
                upper.push(y + std);
            }

            columns.push(ColumnForecast {
                name: col.name.clone(),
                point,
                lower,
                upper,
            });
        }

        ForecastReport {
            forecast_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            horizon,
            confidence_level: confidence,
            method: ForecastMode::Statistical,
            columns,
            notes: vec![],
        }
    }
}
