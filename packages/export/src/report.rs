//! Format-independent report contents.

use crime_predict_prediction_models::ServerResults;

/// Label used when the distribution is longer than the crime type list.
const UNKNOWN_TYPE: &str = "UNKNOWN";

/// A `label: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub label: String,
    pub value: String,
}

impl ReportEntry {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Cluster id and the full (unfiltered) category distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSection {
    pub cluster: i64,
    pub distribution: Vec<ReportEntry>,
}

/// Prediction results flattened for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Predicted crimes, hotspot intensity and risk probability, in that
    /// order, each only if present.
    pub summary: Vec<ReportEntry>,
    pub cluster: Option<ClusterSection>,
}

fn percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

impl Report {
    /// Collects the sections present in `results`.
    #[must_use]
    pub fn new(results: &ServerResults, crime_types: &[String]) -> Self {
        let mut summary = Vec::new();

        if let Some(poisson) = results.poisson {
            let value = poisson
                .prediction
                .map_or_else(|| "N/A".to_string(), |p| p.to_string());
            summary.push(ReportEntry::new("Predicted Crimes", value));
        }
        if let Some(kde) = results.kde {
            summary.push(ReportEntry::new("Hotspot Intensity", percent(kde.intensity)));
        }
        if let Some(svm) = results.svm {
            summary.push(ReportEntry::new("Risk Probability", percent(svm.high_risk)));
        }

        let cluster = results.kmeans.as_ref().map(|kmeans| {
            let shares = kmeans.distribution().unwrap_or_else(|| {
                log::warn!("Cluster distribution is malformed, exporting cluster id only");
                Vec::new()
            });

            ClusterSection {
                cluster: kmeans.cluster,
                distribution: shares
                    .iter()
                    .enumerate()
                    .map(|(i, share)| {
                        let label = crime_types.get(i).map_or(UNKNOWN_TYPE, String::as_str);
                        ReportEntry::new(label, percent(*share))
                    })
                    .collect(),
            }
        });

        Self { summary, cluster }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::{default_crime_types, parse_server_data};

    #[test]
    fn sections_in_fixed_order() {
        let results = parse_server_data(Some(
            r#"{"svm": {"high_risk": 0.731}, "kde": {"intensity": 0.05}, "poisson": {"prediction": 3}}"#,
        ))
        .unwrap();
        let report = Report::new(&results, &default_crime_types());
        assert_eq!(
            report.summary,
            vec![
                ReportEntry::new("Predicted Crimes", "3"),
                ReportEntry::new("Hotspot Intensity", "5.0%"),
                ReportEntry::new("Risk Probability", "73.1%"),
            ]
        );
        assert!(report.cluster.is_none());
    }

    #[test]
    fn distribution_keeps_small_shares_and_labels_extras() {
        let results = parse_server_data(Some(
            r#"{"kmeans": {"cluster": 4, "crime_distribution": [0.5, 0.01, 0.2, 0.19, 0.1]}}"#,
        ))
        .unwrap();
        let cluster = Report::new(&results, &default_crime_types()).cluster.unwrap();
        assert_eq!(cluster.cluster, 4);
        assert_eq!(cluster.distribution.len(), 5);
        assert_eq!(cluster.distribution[1], ReportEntry::new("ASSAULT", "1.0%"));
        assert_eq!(cluster.distribution[4].label, "UNKNOWN");
    }

    #[test]
    fn malformed_distribution_exports_cluster_only() {
        let results =
            parse_server_data(Some(r#"{"kmeans": {"cluster": 1, "crime_distribution": {}}}"#))
                .unwrap();
        let cluster = Report::new(&results, &default_crime_types()).cluster.unwrap();
        assert!(cluster.distribution.is_empty());
    }
}
