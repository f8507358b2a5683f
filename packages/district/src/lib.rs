#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static Andhra Pradesh district table and district search.
//!
//! The table backs the location picker: the district dropdown, the free
//! text search box and the per-district sample incident markers all read
//! from [`all()`].

mod table;

use crime_predict_district_models::{District, IncidentSample};

/// Number of districts in the table. Enforced by a test.
#[cfg(test)]
const EXPECTED_DISTRICT_COUNT: usize = 11;

/// Returns every district in dropdown order.
#[must_use]
pub const fn all() -> &'static [District] {
    table::DISTRICTS
}

/// Looks up a district by its exact display name.
#[must_use]
pub fn find(name: &str) -> Option<&'static District> {
    all().iter().find(|district| district.name == name)
}

/// Case-insensitive substring search over district names and aliases.
///
/// An empty term yields no results, which hides the dropdown. So does an
/// all-whitespace term: a lone space would otherwise match every
/// multi-word district name. Matches are returned in table order.
#[must_use]
pub fn search(term: &str) -> Vec<&'static District> {
    if term.trim().is_empty() {
        return Vec::new();
    }

    let term = term.to_lowercase();
    let matches: Vec<&'static District> = all()
        .iter()
        .filter(|district| district.matches(&term))
        .collect();

    log::debug!("District search '{term}' matched {} districts", matches.len());

    matches
}

/// Returns the district's sample incidents sorted by intensity tier,
/// highest first. Samples within a tier keep their table order.
#[must_use]
pub fn sorted_samples(district: &District) -> Vec<IncidentSample> {
    let mut samples = district.samples.to_vec();
    samples.sort_by(|a, b| b.tier.cmp(&a.tier));
    samples
}
