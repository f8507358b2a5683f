//! High-risk probability doughnut.

use crime_predict_prediction_models::SvmResult;
use serde_json::json;

use crate::chart::{ChartConfig, ChartData, ChartKind, Dataset};

/// Two slices: low risk `(1 - p) * 100` and high risk `p * 100`.
#[must_use]
pub fn risk_chart(svm: SvmResult) -> ChartConfig {
    let high = svm.high_risk * 100.0;
    let low = (1.0 - svm.high_risk) * 100.0;

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec!["Low Risk".to_string(), "High Risk".to_string()],
            datasets: vec![
                Dataset::new(vec![low, high])
                    .with_style("backgroundColor", json!(["#4CAF50", "#F44336"])),
            ],
        },
        options: json!({
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } }
        }),
        tooltips: Vec::new(),
    }
}
