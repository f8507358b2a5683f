#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map layer types shared by the dashboard and the location picker.
//!
//! The frontend draws these with Leaflet, so the shapes mirror Leaflet's
//! layer options (`fillColor`, `fillOpacity`, ...). Popups never carry
//! inline script: anything clickable inside a popup is described by a
//! [`PopupAction`] that the page posts back to the owning component.

use serde::{Deserialize, Serialize};

/// OpenStreetMap raster tile URL template.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution text shown for [`OSM_TILE_URL`] tiles.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// An axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// South-west corner.
    pub south_west: LatLng,
    /// North-east corner.
    pub north_east: LatLng,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Builds a box extending `half_span` degrees from `center` in every
    /// direction.
    #[must_use]
    pub const fn around(center: LatLng, half_span: f64) -> Self {
        Self {
            south_west: LatLng::new(center.lat - half_span, center.lng - half_span),
            north_east: LatLng::new(center.lat + half_span, center.lng + half_span),
        }
    }

    /// Returns `true` when `point` lies inside the box or on its edge.
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Map center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    #[must_use]
    pub const fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// Base raster layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// A callback a popup button may trigger.
///
/// Replaces page-global functions: the page sends the action back to the
/// component that built the popup, which dispatches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PopupAction {
    /// Select a district by name.
    SelectDistrict { name: String },
    /// Select a single coordinate.
    SelectLocation { lat: f64, lng: f64 },
}

impl PopupAction {
    /// Button label rendered for this action.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SelectDistrict { .. } => "Select District",
            Self::SelectLocation { .. } => "Select This Location",
        }
    }
}

/// Popup content attached to a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    /// Bold heading line.
    pub title: String,
    /// Body lines, rendered in order.
    pub lines: Vec<String>,
    /// Optional button.
    pub action: Option<PopupAction>,
    /// Text of the button, set together with `action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    /// Whether the popup is opened as soon as the layer is drawn.
    pub open: bool,
}

impl Popup {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            action: None,
            button: None,
            open: false,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: PopupAction) -> Self {
        self.button = Some(action.label().to_string());
        self.action = Some(action);
        self
    }

    #[must_use]
    pub const fn opened(mut self) -> Self {
        self.open = true;
        self
    }
}

/// A pin marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    pub title: Option<String>,
    pub popup: Option<Popup>,
}

impl Marker {
    #[must_use]
    pub const fn at(position: LatLng) -> Self {
        Self {
            position,
            title: None,
            popup: None,
        }
    }
}

/// A fixed-pixel-radius circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarker {
    pub position: LatLng,
    pub radius: f64,
    pub fill_color: String,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub popup: Option<Popup>,
}

/// A rectangle outline, used for district boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub bounds: BoundingBox,
    pub color: String,
    pub weight: u32,
    pub fill_opacity: f64,
}

impl Rectangle {
    /// Standard district boundary style.
    #[must_use]
    pub fn boundary(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            color: "#3388ff".to_string(),
            weight: 2,
            fill_opacity: 0.1,
        }
    }
}

/// Any overlay drawn on top of the tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Overlay {
    Marker(Marker),
    CircleMarker(CircleMarker),
    Rectangle(Rectangle),
}

/// A full map: view, base layer and overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    pub view: MapView,
    /// When set, the page fits the map to these bounds after applying `view`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_bounds: Option<BoundingBox>,
    pub tiles: TileLayer,
    pub overlays: Vec<Overlay>,
}

impl MapScene {
    /// A scene with only the base tile layer.
    #[must_use]
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            fit_bounds: None,
            tiles: TileLayer::default(),
            overlays: Vec::new(),
        }
    }

    /// Removes every overlay while keeping the tile layer.
    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contain_edges() {
        let bounds = BoundingBox::new(LatLng::new(10.0, 20.0), LatLng::new(11.0, 21.0));
        assert!(bounds.contains(LatLng::new(10.0, 20.0)));
        assert!(bounds.contains(LatLng::new(11.0, 21.0)));
        assert!(bounds.contains(LatLng::new(10.5, 20.5)));
        assert!(!bounds.contains(LatLng::new(9.999, 20.5)));
        assert!(!bounds.contains(LatLng::new(10.5, 21.001)));
    }

    #[test]
    fn around_spans_both_directions() {
        let bounds = BoundingBox::around(LatLng::new(16.0, 80.0), 0.5);
        assert!((bounds.south_west.lat - 15.5).abs() < 1e-9);
        assert!((bounds.north_east.lng - 80.5).abs() < 1e-9);
    }

    #[test]
    fn clearing_overlays_keeps_tiles() {
        let mut scene = MapScene::new(MapView::new(LatLng::new(0.0, 0.0), 3));
        scene
            .overlays
            .push(Overlay::Marker(Marker::at(LatLng::new(1.0, 1.0))));
        scene.clear_overlays();
        assert!(scene.overlays.is_empty());
        assert_eq!(scene.tiles, TileLayer::default());
    }

    #[test]
    fn popup_action_serializes_tagged() {
        let action = PopupAction::SelectDistrict {
            name: "Guntur".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "selectDistrict");
        assert_eq!(json["name"], "Guntur");
    }

    #[test]
    fn popup_button_follows_action() {
        let popup = Popup::new("Krishna District");
        assert!(popup.button.is_none());
        assert!(serde_json::to_value(&popup).unwrap().get("button").is_none());

        let popup = popup.with_action(PopupAction::SelectLocation {
            lat: 16.5,
            lng: 80.6,
        });
        assert_eq!(popup.button.as_deref(), Some("Select This Location"));

        let popup = Popup::new("Krishna District").with_action(PopupAction::SelectDistrict {
            name: "Krishna".to_string(),
        });
        let json = serde_json::to_value(&popup).unwrap();
        assert_eq!(json["button"], "Select District");
    }

    #[test]
    fn scene_omits_fit_bounds_unless_set() {
        let mut scene = MapScene::new(MapView::new(LatLng::new(16.0, 80.0), 10));
        assert!(serde_json::to_value(&scene).unwrap().get("fitBounds").is_none());

        scene.fit_bounds = Some(BoundingBox::around(LatLng::new(16.0, 80.0), 0.4));
        let json = serde_json::to_value(&scene).unwrap();
        let west = json["fitBounds"]["southWest"]["lng"].as_f64().unwrap();
        assert!((west - 79.6).abs() < 1e-9);
    }
}
