#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! District, incident sample and intensity tier types.
//!
//! District records are compile-time constants, so every string field is
//! `&'static str`. The types serialize for the API but are never
//! deserialized.

use crime_predict_map_models::{BoundingBox, LatLng};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Qualitative severity of a sample incident location.
///
/// Ordered so that `High > Medium > Low`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IntensityTier {
    Low,
    Medium,
    High,
}

impl IntensityTier {
    /// Fill color of the map circle marker.
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "orange",
            Self::Low => "blue",
        }
    }

    /// Radius of the map circle marker in pixels.
    #[must_use]
    pub const fn marker_radius(self) -> f64 {
        match self {
            Self::High => 12.0,
            Self::Medium => 8.0,
            Self::Low => 6.0,
        }
    }

    /// Icon color in the suggestion panel.
    #[must_use]
    pub const fn panel_color(self) -> &'static str {
        match self {
            Self::High => "#ff4444",
            Self::Medium => "#ffa700",
            Self::Low => "#4285f4",
        }
    }

    /// Warning badge shown in marker popups. Low-intensity areas get none.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::High => Some("High Intensity Area"),
            Self::Medium => Some("Medium Intensity Area"),
            Self::Low => None,
        }
    }
}

/// A known incident location inside a district.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentSample {
    pub position: LatLng,
    /// Short free-text description, e.g. "Transport Hub".
    pub description: &'static str,
    pub tier: IntensityTier,
    /// Crime category labels commonly reported here.
    pub crime_types: &'static [&'static str],
}

/// A static administrative district record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    /// Display name, also the value of the district `<select>`.
    pub name: &'static str,
    pub center: LatLng,
    pub bounds: BoundingBox,
    /// Lowercase alternate spellings and major towns used for search.
    pub aliases: &'static [&'static str],
    pub samples: &'static [IncidentSample],
}

impl District {
    /// Returns `true` when `term` (already lowercased) is a substring of
    /// the lowercased name or of any alias.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: District = District {
        name: "Krishna",
        center: LatLng::new(16.1697, 81.1339),
        bounds: BoundingBox::new(LatLng::new(15.7697, 80.7339), LatLng::new(16.5697, 81.5339)),
        aliases: &["krishna", "vijayawada", "machilipatnam"],
        samples: &[],
    };

    #[test]
    fn tier_ordering() {
        assert!(IntensityTier::High > IntensityTier::Medium);
        assert!(IntensityTier::Medium > IntensityTier::Low);
    }

    #[test]
    fn tier_styling() {
        let styles: Vec<_> = [IntensityTier::High, IntensityTier::Medium, IntensityTier::Low]
            .into_iter()
            .map(|tier| {
                (
                    tier.marker_color(),
                    tier.marker_radius(),
                    tier.panel_color(),
                    tier.badge(),
                )
            })
            .collect();

        assert_eq!(
            styles,
            vec![
                ("red", 12.0, "#ff4444", Some("High Intensity Area")),
                ("orange", 8.0, "#ffa700", Some("Medium Intensity Area")),
                ("blue", 6.0, "#4285f4", None),
            ]
        );
    }

    #[test]
    fn tier_parses_lowercase() {
        assert_eq!("medium".parse::<IntensityTier>().unwrap(), IntensityTier::Medium);
        assert_eq!(IntensityTier::Low.to_string(), "low");
        assert!("severe".parse::<IntensityTier>().is_err());
    }

    #[test]
    fn matches_name_and_alias() {
        assert!(SAMPLE.matches("krish"));
        assert!(SAMPLE.matches("vijay"));
        assert!(!SAMPLE.matches("guntur"));
    }
}
