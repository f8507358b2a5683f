//! The location picker.
//!
//! One picker backs one prediction form. It owns the district dropdown,
//! the search box, the map overlays and the four coordinate fields, and
//! changes them only in response to [`PickerEvent`]s.

use crime_predict_district_models::{District, IncidentSample};
use crime_predict_map_models::{
    BoundingBox, CircleMarker, LatLng, MapScene, MapView, Marker, Overlay, Popup, PopupAction,
    Rectangle,
};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::PickerError;

/// Map center showing the whole state.
pub const INITIAL_CENTER: LatLng = LatLng::new(15.9129, 79.7400);
const INITIAL_ZOOM: u8 = 7;
const LOCATION_ZOOM: u8 = 10;

const SUGGESTIONS_HEADING: &str = "High-Risk Areas:";

/// How the user enters coordinates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    /// Pick on the map, by search or by district.
    #[default]
    Map,
    /// Type latitude and longitude.
    Manual,
}

impl InputMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Map => "Map Selection Mode",
            Self::Manual => "Manual Input Mode",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Map => Self::Manual,
            Self::Manual => Self::Map,
        }
    }
}

/// Every user interaction the picker reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PickerEvent {
    SetMode { mode: InputMode },
    ToggleMode,
    SearchInput { text: String },
    SearchFocus,
    /// A click anywhere outside the search box and its dropdown.
    DismissSearch,
    ChooseSearchResult { name: String },
    /// The district `<select>` changed; `None` is the empty option.
    SelectDistrict { name: Option<String> },
    ClickMap { lat: f64, lng: f64 },
    SetManualLatitude { text: String },
    SetManualLongitude { text: String },
    /// An entry of the suggestion panel, by position.
    ChooseSuggestion { index: usize },
    /// A button inside a map popup.
    Popup { action: PopupAction },
}

/// Form field values. `latitude`/`longitude` are the hidden inputs the
/// form submits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub latitude: String,
    pub longitude: String,
    pub manual_latitude: String,
    pub manual_longitude: String,
    /// Value of the district `<select>`, empty when none.
    pub district: String,
    pub search: String,
}

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub name: &'static str,
    pub center: LatLng,
}

/// One row of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub description: &'static str,
    pub crime_types: String,
    pub position: LatLng,
    pub color: &'static str,
}

/// Sample incidents of the selected district, highest intensity first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionPanel {
    pub heading: &'static str,
    pub items: Vec<Suggestion>,
}

/// Snapshot of everything the page draws for the picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerView {
    pub mode: InputMode,
    pub mode_label: &'static str,
    pub fields: FormFields,
    pub map: MapScene,
    /// `None` while the dropdown is hidden.
    pub search_results: Option<Vec<SearchResult>>,
    pub suggestions: Option<SuggestionPanel>,
}

/// Location picker state.
#[derive(Debug, Clone)]
pub struct LocationPicker {
    mode: InputMode,
    view: MapView,
    fields: FormFields,
    selected: Option<&'static District>,
    search_results: Vec<&'static District>,
    dropdown_open: bool,
    current_marker: Option<LatLng>,
    /// District whose marker is on the map, popup open.
    district_marker: Option<&'static District>,
    boundary: Option<&'static District>,
    sample_markers: Vec<IncidentSample>,
    suggestions: Option<&'static District>,
    /// Bounds the map should fit after a district selection.
    fit_bounds: Option<BoundingBox>,
}

impl Default for LocationPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationPicker {
    /// A picker in map mode with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Self {
            mode: InputMode::Map,
            view: MapView::new(INITIAL_CENTER, INITIAL_ZOOM),
            fields: FormFields::default(),
            selected: None,
            search_results: Vec::new(),
            dropdown_open: false,
            current_marker: None,
            district_marker: None,
            boundary: None,
            sample_markers: Vec::new(),
            suggestions: None,
            fit_bounds: None,
        };
        picker.enter(InputMode::Map);
        picker
    }

    /// A picker for a form re-rendered with `district` already chosen.
    /// Unknown names are ignored.
    #[must_use]
    pub fn with_district(district: Option<&str>) -> Self {
        let mut picker = Self::new();
        if let Some(district) = district.and_then(crime_predict_district::find) {
            picker.show_selection(district, false);
        }
        picker
    }

    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    #[must_use]
    pub const fn fields(&self) -> &FormFields {
        &self.fields
    }

    #[must_use]
    pub fn selected_district(&self) -> Option<&'static str> {
        self.selected.map(|d| d.name)
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Returns a [`PickerError`] when the event is rejected; its message is
    /// the alert shown to the user. Rejected events change nothing.
    pub fn apply(&mut self, event: PickerEvent) -> Result<(), PickerError> {
        log::trace!("Picker event: {event:?}");

        match event {
            PickerEvent::SetMode { mode } => self.enter(mode),
            PickerEvent::ToggleMode => self.enter(self.mode.toggled()),
            PickerEvent::SearchInput { text } => {
                self.fields.search = text;
                self.refresh_search();
            }
            PickerEvent::SearchFocus => {
                if !self.fields.search.is_empty() {
                    self.refresh_search();
                }
            }
            PickerEvent::DismissSearch => self.dropdown_open = false,
            PickerEvent::ChooseSearchResult { name } => self.choose_search_result(&name),
            PickerEvent::SelectDistrict { name } => self.select_district(name.as_deref()),
            PickerEvent::ClickMap { lat, lng } => return self.click_map(LatLng::new(lat, lng)),
            PickerEvent::SetManualLatitude { text } => self.set_manual(Some(text), None),
            PickerEvent::SetManualLongitude { text } => self.set_manual(None, Some(text)),
            PickerEvent::ChooseSuggestion { index } => return self.choose_suggestion(index),
            PickerEvent::Popup { action } => self.dispatch(&action),
        }

        Ok(())
    }

    /// Runs a popup button's action.
    pub fn dispatch(&mut self, action: &PopupAction) {
        match action {
            PopupAction::SelectDistrict { name } => match crime_predict_district::find(name) {
                Some(district) => self.show_selection(district, false),
                None => log::warn!("Popup selected unknown district '{name}'"),
            },
            PopupAction::SelectLocation { lat, lng } => {
                self.update_coordinates(LatLng::new(*lat, *lng));
            }
        }
    }

    /// Switches mode and clears what belongs to the other one.
    fn enter(&mut self, mode: InputMode) {
        self.mode = mode;
        match mode {
            InputMode::Manual => {
                self.current_marker = None;
                self.district_marker = None;
                self.boundary = None;
                self.sample_markers.clear();
                self.suggestions = None;
                self.fit_bounds = None;
                self.dropdown_open = false;
                self.selected = None;
                self.fields.district.clear();
                self.fields.search.clear();
            }
            InputMode::Map => {
                self.fields.manual_latitude.clear();
                self.fields.manual_longitude.clear();
            }
        }
        log::debug!("Picker entered {}", mode.label());
    }

    fn refresh_search(&mut self) {
        self.search_results = crime_predict_district::search(&self.fields.search);
        self.dropdown_open = !self.search_results.is_empty();
    }

    fn choose_search_result(&mut self, name: &str) {
        let Some(district) = crime_predict_district::find(name) else {
            log::warn!("Search result '{name}' is not a known district");
            return;
        };
        self.show_selection(district, false);
        self.dropdown_open = false;
    }

    fn select_district(&mut self, name: Option<&str>) {
        match name.and_then(crime_predict_district::find) {
            Some(district) => self.show_selection(district, true),
            None => {
                self.selected = None;
                self.fields.district.clear();
                self.boundary = None;
                self.sample_markers.clear();
                self.suggestions = None;
            }
        }
    }

    /// Selects `district`, draws its marker, boundary and sample incidents
    /// and fits the map to its bounds. The suggestion panel only follows dropdown changes.
    fn show_selection(&mut self, district: &'static District, with_suggestions: bool) {
        self.update_coordinates(district.center);
        self.selected = Some(district);
        self.fields.district = district.name.to_string();
        self.fields.search = district.name.to_string();
        self.district_marker = Some(district);
        self.boundary = Some(district);
        self.sample_markers = district.samples.to_vec();
        self.fit_bounds = Some(district.bounds);
        if with_suggestions {
            self.suggestions = Some(district);
        }
    }

    fn click_map(&mut self, point: LatLng) -> Result<(), PickerError> {
        if self.mode == InputMode::Manual {
            return Ok(());
        }

        if let Some(district) = self.selected {
            if !district.bounds.contains(point) {
                return Err(PickerError::OutsideDistrict {
                    district: district.name,
                });
            }
            self.update_coordinates(point);
            return Ok(());
        }

        self.update_coordinates(point);
        self.fields.district.clear();
        self.fields.search.clear();
        self.district_marker = None;
        self.boundary = None;
        Ok(())
    }

    fn set_manual(&mut self, latitude: Option<String>, longitude: Option<String>) {
        if self.mode != InputMode::Manual {
            log::debug!("Ignoring manual coordinate input in map mode");
            return;
        }

        let edited_latitude = latitude.is_some();

        if let Some(text) = latitude {
            self.fields.manual_latitude = text;
        }
        if let Some(text) = longitude {
            self.fields.manual_longitude = text;
        }

        let other = if edited_latitude {
            &self.fields.manual_longitude
        } else {
            &self.fields.manual_latitude
        };
        if other.is_empty() {
            return;
        }

        let parsed = (
            self.fields.manual_latitude.trim().parse::<f64>(),
            self.fields.manual_longitude.trim().parse::<f64>(),
        );
        if let (Ok(lat), Ok(lng)) = parsed {
            self.update_coordinates(LatLng::new(lat, lng));
        }
    }

    fn choose_suggestion(&mut self, index: usize) -> Result<(), PickerError> {
        let sample = self
            .suggestions
            .map(crime_predict_district::sorted_samples)
            .and_then(|samples| samples.get(index).copied())
            .ok_or(PickerError::UnknownSuggestion { index })?;
        self.update_coordinates(sample.position);
        Ok(())
    }

    /// Writes `point` into the hidden fields. Non-finite input is ignored.
    fn update_coordinates(&mut self, point: LatLng) {
        if !point.is_finite() {
            log::debug!("Ignoring non-finite coordinates {point:?}");
            return;
        }

        self.fields.latitude = format!("{:.4}", point.lat);
        self.fields.longitude = format!("{:.4}", point.lng);

        match self.mode {
            InputMode::Manual => {
                self.fields.manual_latitude.clone_from(&self.fields.latitude);
                self.fields.manual_longitude.clone_from(&self.fields.longitude);
            }
            InputMode::Map => {
                self.current_marker = Some(point);
                self.view = MapView::new(point, LOCATION_ZOOM);
                self.fit_bounds = None;
            }
        }
    }

    /// Renders the current state.
    #[must_use]
    pub fn view(&self) -> PickerView {
        let mut map = MapScene::new(self.view);
        map.fit_bounds = self.fit_bounds;

        if let Some(district) = self.district_marker {
            map.overlays.push(Overlay::Marker(district_marker(district)));
        }
        if let Some(district) = self.boundary {
            map.overlays
                .push(Overlay::Rectangle(Rectangle::boundary(district.bounds)));
        }
        map.overlays.extend(
            self.sample_markers
                .iter()
                .map(|sample| Overlay::CircleMarker(sample_marker(sample))),
        );
        if let Some(position) = self.current_marker {
            map.overlays.push(Overlay::Marker(Marker::at(position)));
        }

        PickerView {
            mode: self.mode,
            mode_label: self.mode.label(),
            fields: self.fields.clone(),
            map,
            search_results: self.dropdown_open.then(|| {
                self.search_results
                    .iter()
                    .map(|d| SearchResult {
                        name: d.name,
                        center: d.center,
                    })
                    .collect()
            }),
            suggestions: self.suggestions.map(suggestion_panel),
        }
    }
}

fn district_marker(district: &District) -> Marker {
    Marker {
        position: district.center,
        title: Some(district.name.to_string()),
        popup: Some(
            Popup::new(format!("{} District", district.name))
                .with_line(format!("Latitude: {}", district.center.lat))
                .with_line(format!("Longitude: {}", district.center.lng))
                .with_action(PopupAction::SelectDistrict {
                    name: district.name.to_string(),
                })
                .opened(),
        ),
    }
}

fn sample_marker(sample: &IncidentSample) -> CircleMarker {
    let mut popup = Popup::new(sample.description);
    if let Some(badge) = sample.tier.badge() {
        popup = popup.with_line(badge);
    }
    popup = popup
        .with_line(format!("Common Crime Types: {}", sample.crime_types.join(", ")))
        .with_line(format!(
            "Coordinates: Lat: {}, Lng: {}",
            sample.position.lat, sample.position.lng
        ))
        .with_action(PopupAction::SelectLocation {
            lat: sample.position.lat,
            lng: sample.position.lng,
        });

    CircleMarker {
        position: sample.position,
        radius: sample.tier.marker_radius(),
        fill_color: sample.tier.marker_color().to_string(),
        color: "#fff".to_string(),
        weight: 2,
        opacity: 1.0,
        fill_opacity: 0.8,
        popup: Some(popup),
    }
}

fn suggestion_panel(district: &'static District) -> SuggestionPanel {
    SuggestionPanel {
        heading: SUGGESTIONS_HEADING,
        items: crime_predict_district::sorted_samples(district)
            .into_iter()
            .map(|sample| Suggestion {
                description: sample.description,
                crime_types: sample.crime_types.join(", "),
                position: sample.position,
                color: sample.tier.panel_color(),
            })
            .collect(),
    }
}
