//! Twelve-month seasonally adjusted crime count forecast.
//!
//! The monthly count predicted by the backend is spread over the calendar
//! with fixed seasonal factors, scaled up by hotspot intensity and risk
//! probability, and perturbed by up to ±5% per month. The perturbation
//! comes from a [`Jitter`] so callers can make output reproducible.

use crime_predict_prediction_models::ServerResults;
use rand::Rng;
use serde_json::json;

use crate::chart::{ChartConfig, ChartData, ChartKind, Dataset};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Historical seasonal multipliers, January first. Winter is lowest,
/// summer peaks in July.
pub const SEASONAL_FACTORS: [f64; 12] = [
    0.85, 0.90, 1.15, 1.20, 1.25, 1.35, 1.40, 1.35, 1.20, 1.10, 1.00, 0.95,
];

const MAX_JITTER: f64 = 0.05;

/// Source of the per-month random multiplier.
pub trait Jitter {
    /// Returns a multiplier in `1 - 0.05 .. 1 + 0.05`.
    fn next_factor(&mut self) -> f64;
}

impl<R: Rng> Jitter for R {
    fn next_factor(&mut self) -> f64 {
        1.0 + self.random_range(-MAX_JITTER..MAX_JITTER)
    }
}

/// Always returns exactly `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn next_factor(&mut self) -> f64 {
        1.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the twelve monthly values.
///
/// A zero `base` is treated as 1. Zero intensity or risk leave the value
/// unscaled. Every value is non-negative and rounded to two decimals.
#[must_use]
pub fn monthly_forecast(
    base: f64,
    intensity: Option<f64>,
    high_risk: Option<f64>,
    jitter: &mut impl Jitter,
) -> [f64; 12] {
    let base = if base == 0.0 || base.is_nan() { 1.0 } else { base };

    SEASONAL_FACTORS.map(|factor| {
        let mut prediction = base * factor;

        if let Some(intensity) = intensity.filter(|i| *i != 0.0) {
            prediction *= 1.0 + intensity;
        }
        if let Some(risk) = high_risk.filter(|r| *r != 0.0) {
            prediction *= 1.0 + risk * 0.5;
        }

        prediction *= jitter.next_factor();

        round2(prediction).max(0.0)
    })
}

/// Builds the forecast line chart, or `None` without a Poisson result.
#[must_use]
pub fn forecast_chart(results: &ServerResults, jitter: &mut impl Jitter) -> Option<ChartConfig> {
    let poisson = results.poisson?;
    let values = monthly_forecast(
        poisson.prediction.unwrap_or(0.0),
        results.kde.map(|kde| kde.intensity),
        results.svm.map(|svm| svm.high_risk),
        jitter,
    );

    let peak = values.iter().copied().fold(0.0_f64, f64::max);
    let tooltips = values
        .iter()
        .zip(SEASONAL_FACTORS)
        .map(|(value, factor)| {
            vec![
                format!("Predicted Crimes: {value:.1}"),
                format!("Seasonal Factor: {:.0}%", factor * 100.0),
            ]
        })
        .collect();

    Some(ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: MONTH_LABELS.iter().map(ToString::to_string).collect(),
            datasets: vec![
                Dataset::new(values.to_vec())
                    .with_label("Predicted Crime Rate")
                    .with_style("borderColor", "rgba(54, 162, 235, 1)")
                    .with_style("backgroundColor", "rgba(54, 162, 235, 0.2)")
                    .with_style("fill", true)
                    .with_style("tension", 0.4)
                    .with_style("pointRadius", 4)
                    .with_style("pointHoverRadius", 6),
            ],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "y": {
                    "beginAtZero": true,
                    "title": { "display": true, "text": "Predicted Number of Crimes" },
                    "suggestedMin": 0,
                    "suggestedMax": (peak * 1.1).ceil()
                },
                "x": {
                    "title": { "display": true, "text": "Month" }
                }
            },
            "plugins": { "legend": { "position": "top" } }
        }),
        tooltips,
    })
}
