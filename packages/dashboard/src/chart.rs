//! Chart.js-shaped chart configuration.
//!
//! [`ChartConfig`] serializes to the object passed to `new Chart(ctx, ...)`
//! except for `tooltips`, which holds the pre-rendered tooltip lines per
//! data point (Chart.js callbacks cannot cross the JSON boundary).

use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Line,
    Pie,
}

/// One dataset. Style keys (`borderColor`, `tension`, ...) are kept in a
/// free-form map since they differ per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl Dataset {
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            label: None,
            data,
            style: Map::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.style.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
    /// Tooltip lines per data point, in data order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltips: Vec<Vec<String>>,
}

impl ChartConfig {
    /// Labels of the first (only) dataset's points.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Values of the first dataset, empty if there is none.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.data.datasets.first().map_or(&[], |d| d.data.as_slice())
    }
}

/// Formats a `0..=1` share as a percentage with one decimal, e.g. `42.0%`.
#[must_use]
pub fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}
