//! Crime category distribution pie for the district's k-means cluster.

use crime_predict_prediction_models::KmeansResult;
use serde_json::json;

use crate::chart::{ChartConfig, ChartData, ChartKind, Dataset, percent};

/// Shares at or below this are dropped from the pie.
pub const MIN_VISIBLE_SHARE: f64 = 0.02;

/// Red, blue, yellow, teal, purple, orange, grey, tomato, light green.
const PALETTE: [(u8, u8, u8); 9] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
    (201, 203, 207),
    (255, 99, 71),
    (144, 238, 144),
];

fn palette(count: usize, alpha: f64) -> Vec<String> {
    PALETTE
        .iter()
        .cycle()
        .take(count)
        .map(|(r, g, b)| format!("rgba({r}, {g}, {b}, {alpha})"))
        .collect()
}

/// Uniform distribution over `crime_types`.
#[must_use]
pub fn uniform_distribution(crime_types: &[String]) -> Vec<f64> {
    if crime_types.is_empty() {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let share = 1.0 / crime_types.len() as f64;
    vec![share; crime_types.len()]
}

/// Pairs each crime type with its share and keeps those above
/// [`MIN_VISIBLE_SHARE`]. Types without a share are dropped.
#[must_use]
pub fn significant_shares(crime_types: &[String], distribution: &[f64]) -> Vec<(String, f64)> {
    crime_types
        .iter()
        .zip(distribution)
        .filter(|(_, share)| **share > MIN_VISIBLE_SHARE)
        .map(|(label, share)| (label.clone(), *share))
        .collect()
}

/// Builds the cluster pie. A missing or malformed distribution is replaced
/// by a uniform one.
#[must_use]
pub fn cluster_chart(kmeans: &KmeansResult, crime_types: &[String]) -> ChartConfig {
    log::info!("K-Means cluster: {}", kmeans.cluster);
    log::info!("K-Means distribution: {:?}", kmeans.crime_distribution);

    let distribution = kmeans.distribution().unwrap_or_else(|| {
        log::warn!("Invalid K-Means distribution, using default");
        uniform_distribution(crime_types)
    });

    let (labels, values): (Vec<String>, Vec<f64>) =
        significant_shares(crime_types, &distribution).into_iter().unzip();
    let tooltips = labels
        .iter()
        .zip(&values)
        .map(|(label, share)| vec![format!("{label}: {}", percent(*share))])
        .collect();

    let count = labels.len();

    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels,
            datasets: vec![
                Dataset::new(values)
                    .with_style("backgroundColor", palette(count, 0.7))
                    .with_style("borderColor", palette(count, 1.0))
                    .with_style("borderWidth", 1),
            ],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "position": "bottom",
                    "display": true,
                    "labels": { "boxWidth": 12, "padding": 10, "font": { "size": 11 } }
                }
            }
        }),
        tooltips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn small_shares_are_hidden() {
        let kmeans = KmeansResult {
            cluster: 3,
            crime_distribution: Some(json!([0.5, 0.02, 0.01, 0.47])),
        };
        let chart = cluster_chart(&kmeans, &types(&["THEFT", "ASSAULT", "ROBBERY", "OTHER"]));
        assert_eq!(chart.labels(), ["THEFT", "OTHER"]);
        assert_eq!(chart.values(), [0.5, 0.47]);
        assert_eq!(chart.tooltips[1], vec!["OTHER: 47.0%"]);
    }

    #[test]
    fn malformed_distribution_becomes_uniform() {
        let crime_types = types(&["THEFT", "ASSAULT", "ROBBERY", "OTHER"]);
        for bad in [None, Some(json!([])), Some(json!("oops"))] {
            let kmeans = KmeansResult {
                cluster: 0,
                crime_distribution: bad,
            };
            let chart = cluster_chart(&kmeans, &crime_types);
            assert_eq!(chart.labels().len(), 4);
            assert!(chart.values().iter().all(|v| (v - 0.25).abs() < 1e-12));
        }
    }

    #[test]
    fn colors_match_category_count_and_cycle() {
        let crime_types: Vec<String> = (0..11).map(|i| format!("TYPE {i}")).collect();
        let kmeans = KmeansResult {
            cluster: 1,
            crime_distribution: Some(json!(vec![0.09; 11])),
        };
        let chart = cluster_chart(&kmeans, &crime_types);
        let dataset = &chart.data.datasets[0];
        let colors = dataset.style["backgroundColor"].as_array().unwrap();
        assert_eq!(colors.len(), 11);
        assert_eq!(colors[0], "rgba(255, 99, 132, 0.7)");
        assert_eq!(colors[9], colors[0]);
        assert_eq!(dataset.style["borderColor"][1], "rgba(54, 162, 235, 1)");
    }

    #[test]
    fn shorter_distribution_drops_unpaired_types() {
        let shares = significant_shares(&types(&["A", "B", "C"]), &[0.6, 0.4]);
        assert_eq!(shares, vec![("A".to_string(), 0.6), ("B".to_string(), 0.4)]);
    }

    #[test]
    fn no_hidden_share_ever_appears() {
        let crime_types = types(&["A", "B", "C", "D", "E", "F"]);
        let distribution = [0.0, 0.019, 0.02, 0.021, 0.5, 0.44];
        for (label, share) in significant_shares(&crime_types, &distribution) {
            assert!(share > MIN_VISIBLE_SHARE, "{label} share {share} visible");
        }
    }
}
