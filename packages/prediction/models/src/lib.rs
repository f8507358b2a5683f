#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction result payload types and embedded JSON parsing.
//!
//! The dashboard page embeds two JSON documents rendered by the prediction
//! backend: `server-data` (a [`ServerResults`] or `null`) and `crime-types`
//! (the ordered category labels the k-means distribution is indexed by).
//! Parsing never fails outward: malformed input is logged and replaced by
//! a default.

use crime_predict_map_models::LatLng;
use serde::{Deserialize, Serialize};

/// Category labels used when the page provides none.
pub const DEFAULT_CRIME_TYPES: [&str; 4] = ["THEFT", "ASSAULT", "ROBBERY", "OTHER"];

/// Kernel density estimate at the requested point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KdeResult {
    /// Hotspot intensity, nominally in `0..=1`.
    #[serde(default)]
    pub intensity: f64,
}

/// Binary high-risk classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SvmResult {
    /// Probability of the high-risk class.
    #[serde(default)]
    pub high_risk: f64,
}

/// Monthly incident count regression output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoissonResult {
    #[serde(default)]
    pub prediction: Option<f64>,
}

/// Cluster assignment for the district and the cluster's category mix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KmeansResult {
    /// Cluster id, `-1` when the district was not clustered.
    #[serde(default = "unclustered")]
    pub cluster: i64,
    /// Share per crime type, indexed like the `crime-types` list. Kept as
    /// raw JSON because the backend has been seen sending non-arrays.
    #[serde(default)]
    pub crime_distribution: Option<serde_json::Value>,
}

const fn unclustered() -> i64 {
    -1
}

impl KmeansResult {
    /// Returns the distribution when it is a non-empty array of numbers.
    #[must_use]
    pub fn distribution(&self) -> Option<Vec<f64>> {
        let values = self.crime_distribution.as_ref()?.as_array()?;
        if values.is_empty() {
            return None;
        }
        values.iter().map(serde_json::Value::as_f64).collect()
    }
}

/// A number the backend may send either as JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Echo of the coordinates the prediction was requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFeatures {
    #[serde(rename = "Latitude")]
    pub latitude: LooseNumber,
    #[serde(rename = "Longitude")]
    pub longitude: LooseNumber,
}

impl InputFeatures {
    #[must_use]
    pub fn coordinate(&self) -> Option<LatLng> {
        let point = LatLng::new(self.latitude.value()?, self.longitude.value()?);
        point.is_finite().then_some(point)
    }
}

/// Everything the prediction backend returned. Each model's section is
/// independently present or absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerResults {
    #[serde(default)]
    pub kde: Option<KdeResult>,
    #[serde(default)]
    pub svm: Option<SvmResult>,
    #[serde(default)]
    pub poisson: Option<PoissonResult>,
    #[serde(default)]
    pub kmeans: Option<KmeansResult>,
    #[serde(default)]
    pub input_features: Option<InputFeatures>,
}

/// Parses the `server-data` node text.
///
/// Missing or blank text is treated as `null`. Parse failures are logged
/// and yield `None`.
#[must_use]
pub fn parse_server_data(text: Option<&str>) -> Option<ServerResults> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;

    match serde_json::from_str::<Option<ServerResults>>(text) {
        Ok(results) => results,
        Err(e) => {
            log::error!("Error parsing server data: {e}");
            None
        }
    }
}

/// Parses the `crime-types` node text, falling back to
/// [`DEFAULT_CRIME_TYPES`] when it is missing, `null` or malformed.
#[must_use]
pub fn parse_crime_types(text: Option<&str>) -> Vec<String> {
    let parsed = text.and_then(|text| {
        serde_json::from_str::<Option<Vec<String>>>(text)
            .map_err(|e| log::error!("Error parsing crime types: {e}"))
            .ok()
            .flatten()
    });

    parsed.unwrap_or_else(default_crime_types)
}

/// Owned copy of [`DEFAULT_CRIME_TYPES`].
#[must_use]
pub fn default_crime_types() -> Vec<String> {
    DEFAULT_CRIME_TYPES.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "kde": {"intensity": 0.42},
        "svm": {"high_risk": 0.73},
        "poisson": {"prediction": 3},
        "kmeans": {"cluster": 2, "crime_distribution": [0.5, 0.01, 0.3, 0.19]},
        "input_features": {"Latitude": 16.3067, "Longitude": "80.4365"}
    }"#;

    #[test]
    fn parses_full_payload() {
        let results = parse_server_data(Some(FULL)).unwrap();
        assert!((results.kde.unwrap().intensity - 0.42).abs() < 1e-12);
        assert!((results.svm.unwrap().high_risk - 0.73).abs() < 1e-12);
        assert_eq!(results.poisson.unwrap().prediction, Some(3.0));

        let kmeans = results.kmeans.unwrap();
        assert_eq!(kmeans.cluster, 2);
        assert_eq!(kmeans.distribution().unwrap(), vec![0.5, 0.01, 0.3, 0.19]);

        let point = results.input_features.unwrap().coordinate().unwrap();
        assert!((point.lat - 16.3067).abs() < 1e-12);
        assert!((point.lng - 80.4365).abs() < 1e-12);
    }

    #[test]
    fn sections_are_independent() {
        let results = parse_server_data(Some(r#"{"svm": {"high_risk": 0.1}}"#)).unwrap();
        assert!(results.kde.is_none());
        assert!(results.poisson.is_none());
        assert!(results.kmeans.is_none());
        assert!(results.svm.is_some());
    }

    #[test]
    fn null_blank_and_garbage_are_none() {
        assert!(parse_server_data(None).is_none());
        assert!(parse_server_data(Some("")).is_none());
        assert!(parse_server_data(Some("null")).is_none());
        assert!(parse_server_data(Some("{not json")).is_none());
    }

    #[test]
    fn crime_types_fall_back_to_default() {
        let default = default_crime_types();
        assert_eq!(parse_crime_types(None), default);
        assert_eq!(parse_crime_types(Some("null")), default);
        assert_eq!(parse_crime_types(Some("[1, 2")), default);
        assert_eq!(
            parse_crime_types(Some(r#"["THEFT", "BATTERY"]"#)),
            vec!["THEFT".to_string(), "BATTERY".to_string()]
        );
    }

    #[test]
    fn malformed_distribution_is_rejected() {
        let not_array = KmeansResult {
            cluster: 1,
            crime_distribution: Some(serde_json::json!({"THEFT": 0.5})),
        };
        assert!(not_array.distribution().is_none());

        let empty = KmeansResult {
            cluster: 1,
            crime_distribution: Some(serde_json::json!([])),
        };
        assert!(empty.distribution().is_none());

        let mixed = KmeansResult {
            cluster: 1,
            crime_distribution: Some(serde_json::json!([0.5, "x"])),
        };
        assert!(mixed.distribution().is_none());

        assert!(KmeansResult::default().distribution().is_none());
    }

    #[test]
    fn missing_cluster_defaults_to_unclustered() {
        let results = parse_server_data(Some(r#"{"kmeans": {}}"#)).unwrap();
        assert_eq!(results.kmeans.unwrap().cluster, -1);
    }

    #[test]
    fn non_numeric_input_features_have_no_coordinate() {
        let features = InputFeatures {
            latitude: LooseNumber::Text("north".to_string()),
            longitude: LooseNumber::Number(80.0),
        };
        assert!(features.coordinate().is_none());
    }
}
