//! Base map bootstrap and the hotspot map.

use crime_predict_map_models::{
    CircleMarker, LatLng, MapScene, MapView, Marker, Overlay, Popup,
};
use crime_predict_prediction_models::ServerResults;

use crate::chart::percent;

/// Initial center for both dashboard maps.
pub const DEFAULT_CENTER: LatLng = LatLng::new(28.7041, 77.1025);

const LANDING_ZOOM: u8 = 5;
const HOTSPOT_DEFAULT_ZOOM: u8 = 8;
const HOTSPOT_FOCUS_ZOOM: u8 = 12;

/// Labeled city markers on the landing map.
pub const CITIES: &[(&str, LatLng)] = &[
    ("Visakhapatnam", LatLng::new(17.6868, 83.2185)),
    ("Vijayawada", LatLng::new(16.5062, 80.6480)),
    ("Tirupati", LatLng::new(13.6288, 79.4192)),
];

/// The landing page map: fixed view plus one marker per city.
#[must_use]
pub fn landing_map() -> MapScene {
    let mut scene = MapScene::new(MapView::new(DEFAULT_CENTER, LANDING_ZOOM));
    scene.overlays = CITIES
        .iter()
        .map(|(name, position)| {
            Overlay::Marker(Marker {
                position: *position,
                title: None,
                popup: Some(Popup::new(*name)),
            })
        })
        .collect();
    scene
}

/// Circle radius for a hotspot of the given intensity.
#[must_use]
pub fn hotspot_radius(intensity: f64) -> f64 {
    (intensity * 15.0).max(5.0)
}

/// Renders the hotspot into `scene`, replacing any previous overlays.
///
/// The scene is reused across renders so the tile layer survives. Without
/// both a KDE result and a usable input coordinate only the overlays are
/// cleared.
pub fn render_hotspot(scene: &mut MapScene, results: Option<&ServerResults>) {
    scene.clear_overlays();

    let Some(results) = results else {
        return;
    };
    let (Some(kde), Some(features)) = (results.kde, results.input_features.as_ref()) else {
        return;
    };
    let Some(position) = features.coordinate() else {
        log::warn!("Hotspot input features are not numeric, skipping marker");
        return;
    };

    scene.view = MapView::new(position, HOTSPOT_FOCUS_ZOOM);
    scene.overlays.push(Overlay::CircleMarker(CircleMarker {
        position,
        radius: hotspot_radius(kde.intensity),
        fill_color: "#ff7846".to_string(),
        color: "#ff6347".to_string(),
        weight: 1,
        opacity: 1.0,
        fill_opacity: 0.8,
        popup: Some(
            Popup::new(format!("Hotspot Intensity: {}", percent(kde.intensity))).opened(),
        ),
    }));
}

/// A fresh hotspot map for `results`.
#[must_use]
pub fn hotspot_map(results: Option<&ServerResults>) -> MapScene {
    let mut scene = MapScene::new(MapView::new(DEFAULT_CENTER, HOTSPOT_DEFAULT_ZOOM));
    render_hotspot(&mut scene, results);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_predict_prediction_models::parse_server_data;

    #[test]
    fn landing_map_has_three_cities() {
        let scene = landing_map();
        assert_eq!(scene.view.zoom, 5);
        assert_eq!(scene.overlays.len(), 3);
        let Overlay::Marker(first) = &scene.overlays[0] else {
            panic!("expected marker");
        };
        assert_eq!(first.popup.as_ref().unwrap().title, "Visakhapatnam");
    }

    #[test]
    fn radius_has_floor_of_five() {
        assert!((hotspot_radius(0.1) - 5.0).abs() < 1e-12);
        assert!((hotspot_radius(1.0) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn hotspot_centers_on_input() {
        let results = parse_server_data(Some(
            r#"{"kde": {"intensity": 0.8}, "input_features": {"Latitude": "16.5", "Longitude": 80.6}}"#,
        ));
        let scene = hotspot_map(results.as_ref());
        assert_eq!(scene.view.zoom, 12);
        assert!((scene.view.center.lat - 16.5).abs() < 1e-12);

        let Overlay::CircleMarker(circle) = &scene.overlays[0] else {
            panic!("expected circle marker");
        };
        assert!((circle.radius - 12.0).abs() < 1e-9);
        let popup = circle.popup.as_ref().unwrap();
        assert_eq!(popup.title, "Hotspot Intensity: 80.0%");
        assert!(popup.open);
    }

    #[test]
    fn hotspot_needs_kde_and_features() {
        let results = parse_server_data(Some(r#"{"kde": {"intensity": 0.8}}"#));
        let scene = hotspot_map(results.as_ref());
        assert!(scene.overlays.is_empty());
        assert_eq!(scene.view.zoom, 8);
    }

    #[test]
    fn rerender_replaces_overlays() {
        let results = parse_server_data(Some(
            r#"{"kde": {"intensity": 0.2}, "input_features": {"Latitude": 16.5, "Longitude": 80.6}}"#,
        ));
        let mut scene = hotspot_map(results.as_ref());
        render_hotspot(&mut scene, results.as_ref());
        assert_eq!(scene.overlays.len(), 1);
        render_hotspot(&mut scene, None);
        assert!(scene.overlays.is_empty());
    }
}
