#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Prediction form inputs: the district-aware location picker and the
//! prediction date field.

pub mod date;
pub mod picker;

pub use date::{DateError, DateRangeField};
pub use picker::{InputMode, LocationPicker, PickerEvent, PickerView};

/// Rejected picker events. The message is the alert shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A map click fell outside the selected district's bounds.
    #[error("Please select a location within the selected district.")]
    OutsideDistrict { district: &'static str },

    /// No suggestion panel entry at this position.
    #[error("No suggested location at position {index}")]
    UnknownSuggestion { index: usize },
}
