#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard map and chart view builders for prediction results.
//!
//! Given the parsed `server-data` payload and the `crime-types` list, this
//! crate produces everything the dashboard draws: the hotspot map, the
//! high-risk doughnut, the seasonal forecast line and the cluster pie.
//! Each chart is present only when its model's section is in the payload.

pub mod chart;
pub mod cluster;
pub mod forecast;
pub mod maps;
pub mod risk;

use crime_predict_map_models::MapScene;
use crime_predict_prediction_models::ServerResults;
use serde::Serialize;

pub use chart::{ChartConfig, ChartKind};
pub use forecast::{Jitter, NoJitter};

/// Everything rendered on the dashboard for one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub hotspot_map: MapScene,
    pub risk_chart: Option<ChartConfig>,
    pub forecast_chart: Option<ChartConfig>,
    pub cluster_chart: Option<ChartConfig>,
}

/// Builds the dashboard for `results` (which may be absent when no
/// prediction has been made yet).
#[must_use]
pub fn render(
    results: Option<&ServerResults>,
    crime_types: &[String],
    jitter: &mut impl Jitter,
) -> DashboardView {
    let hotspot_map = maps::hotspot_map(results);

    let Some(results) = results else {
        log::debug!("No prediction results, rendering empty dashboard");
        return DashboardView {
            hotspot_map,
            risk_chart: None,
            forecast_chart: None,
            cluster_chart: None,
        };
    };

    DashboardView {
        hotspot_map,
        risk_chart: results.svm.map(risk::risk_chart),
        forecast_chart: forecast::forecast_chart(results, jitter),
        cluster_chart: results
            .kmeans
            .as_ref()
            .map(|kmeans| cluster::cluster_chart(kmeans, crime_types)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::{default_crime_types, parse_server_data};

    #[test]
    fn empty_dashboard_without_results() {
        let view = render(None, &default_crime_types(), &mut NoJitter);
        assert!(view.risk_chart.is_none());
        assert!(view.forecast_chart.is_none());
        assert!(view.cluster_chart.is_none());
        assert!(view.hotspot_map.overlays.is_empty());
    }

    #[test]
    fn full_payload_renders_everything() {
        let results = parse_server_data(Some(
            r#"{
                "kde": {"intensity": 0.4},
                "svm": {"high_risk": 0.6},
                "poisson": {"prediction": 5},
                "kmeans": {"cluster": 1, "crime_distribution": [0.7, 0.3, 0.0, 0.0]},
                "input_features": {"Latitude": 16.3, "Longitude": 80.4}
            }"#,
        ));
        let view = render(results.as_ref(), &default_crime_types(), &mut NoJitter);
        assert_eq!(view.hotspot_map.overlays.len(), 1);
        assert_eq!(view.risk_chart.unwrap().kind, ChartKind::Doughnut);
        assert_eq!(view.forecast_chart.unwrap().kind, ChartKind::Line);
        assert_eq!(view.cluster_chart.unwrap().labels(), ["THEFT", "ASSAULT"]);
    }

    #[test]
    fn view_serializes_camel_case() {
        let view = render(None, &default_crime_types(), &mut NoJitter);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("hotspotMap").is_some());
        assert!(json["riskChart"].is_null());
    }
}
