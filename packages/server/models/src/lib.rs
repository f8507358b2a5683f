#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the crime prediction server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the static district records so the API contract can evolve
//! independently.

use chrono::NaiveDate;
use crime_predict_district_models::{District, IncidentSample, IntensityTier};
use crime_predict_map_models::{BoundingBox, LatLng};
use crime_predict_picker::PickerView;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// The two embedded JSON texts of a results page, forwarded verbatim.
///
/// Used by the dashboard and both export endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPayload {
    /// Text of the `server-data` node.
    pub server_data: Option<String>,
    /// Text of the `crime-types` node.
    pub crime_types: Option<String>,
}

/// A sample incident as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncidentSample {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub intensity: IntensityTier,
    pub crime_types: Vec<String>,
}

impl From<&IncidentSample> for ApiIncidentSample {
    fn from(sample: &IncidentSample) -> Self {
        Self {
            latitude: sample.position.lat,
            longitude: sample.position.lng,
            description: sample.description.to_string(),
            intensity: sample.tier,
            crime_types: sample.crime_types.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A district as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDistrict {
    pub name: String,
    pub center: LatLng,
    pub bounds: BoundingBox,
    pub aliases: Vec<String>,
    /// Sample incidents, highest intensity first.
    pub samples: Vec<ApiIncidentSample>,
}

impl ApiDistrict {
    /// Builds the API form of `district` with `samples` in the given order.
    #[must_use]
    pub fn new(district: &District, samples: &[IncidentSample]) -> Self {
        Self {
            name: district.name.to_string(),
            center: district.center,
            bounds: district.bounds,
            aliases: district.aliases.iter().map(ToString::to_string).collect(),
            samples: samples.iter().map(ApiIncidentSample::from).collect(),
        }
    }
}

/// A district search dropdown entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSearchResult {
    pub name: String,
    pub center: LatLng,
}

impl From<&District> for ApiSearchResult {
    fn from(district: &District) -> Self {
        Self {
            name: district.name.to_string(),
            center: district.center,
        }
    }
}

/// Query parameters for the district search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQueryParams {
    /// Search term; missing is the same as empty.
    pub q: Option<String>,
}

/// Body of `POST /api/picker`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePickerRequest {
    /// District already chosen on the form, if any.
    pub district: Option<String>,
}

/// A picker session and its current view.
#[derive(Debug, Clone, Serialize)]
pub struct ApiPickerSession {
    pub id: Uuid,
    pub view: PickerView,
}

/// A blocking alert to show the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAlert {
    pub alert: String,
}

/// Body of `POST /api/date/validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct DateValidateRequest {
    /// The new `YYYY-MM-DD` field value.
    pub value: String,
    /// Overrides the server's current date.
    pub today: Option<NaiveDate>,
}

/// Result of a date change: the value the field should now hold, its
/// range, and the alert to show when the change was rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateValidateResponse {
    pub value: NaiveDate,
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case() {
        let payload: PredictionPayload =
            serde_json::from_str(r#"{"serverData": "{}", "crimeTypes": null}"#).unwrap();
        assert_eq!(payload.server_data.as_deref(), Some("{}"));
        assert!(payload.crime_types.is_none());

        let empty: PredictionPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.server_data.is_none());
    }

    #[test]
    fn sample_serializes_intensity_lowercase() {
        let sample = IncidentSample {
            position: LatLng::new(16.3, 80.4),
            description: "City Center",
            tier: IntensityTier::High,
            crime_types: &["THEFT"],
        };
        let json = serde_json::to_value(ApiIncidentSample::from(&sample)).unwrap();
        assert_eq!(json["intensity"], "high");
        assert_eq!(json["crimeTypes"][0], "THEFT");
    }

    #[test]
    fn accepted_date_omits_alert() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let json = serde_json::to_value(DateValidateResponse {
            value: day,
            min: day,
            max: day,
            accepted: true,
            alert: None,
        })
        .unwrap();
        assert_eq!(json["value"], "2026-10-17");
        assert!(json.get("alert").is_none());
    }
}
