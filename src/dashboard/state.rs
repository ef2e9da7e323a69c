use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::models::{ContinentFilter, DateRange, SelectionState};
use crate::pipeline::{available_countries, default_selection};

/// A single user interaction with the dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum SelectionEvent {
    ContinentChanged(ContinentFilter),
    CountriesChanged(Vec<String>),
    DateRangeChanged(DateRange),
    Reset,
}

impl SelectionState {
    /// Selection shown before the user touches anything: default countries
    /// for `continent` and the full date extent of the dataset.
    pub fn initial<S: AsRef<str>>(
        dataset: &Dataset,
        continent: ContinentFilter,
        preferences: &[S],
    ) -> Self {
        let available = available_countries(dataset, &continent);
        let date_range = dataset
            .date_extent()
            .map(|(start, end)| DateRange::new(start, end))
            .unwrap_or_default();
        Self {
            countries: default_selection(&available, preferences),
            continent,
            date_range,
        }
    }
}

/// Next selection after `event`. Pure: the previous state is left untouched.
///
/// Switching continent keeps the selected countries that are still available
/// and falls back to the default selection when none are. Country lists are
/// restricted to available names with duplicates dropped. Date bounds are
/// clamped into the dataset's extent.
pub fn apply_event<S: AsRef<str>>(
    dataset: &Dataset,
    previous: &SelectionState,
    event: SelectionEvent,
    default_continent: &ContinentFilter,
    preferences: &[S],
) -> SelectionState {
    match event {
        SelectionEvent::ContinentChanged(continent) => {
            let available = available_countries(dataset, &continent);
            let kept = keep_available(&previous.countries, &available);
            let countries = if kept.is_empty() {
                default_selection(&available, preferences)
            } else {
                kept
            };
            SelectionState {
                continent,
                countries,
                date_range: previous.date_range,
            }
        }
        SelectionEvent::CountriesChanged(countries) => {
            let available = available_countries(dataset, &previous.continent);
            SelectionState {
                countries: keep_available(&countries, &available),
                ..previous.clone()
            }
        }
        SelectionEvent::DateRangeChanged(range) => SelectionState {
            date_range: clamp_range(dataset, range),
            ..previous.clone()
        },
        SelectionEvent::Reset => {
            SelectionState::initial(dataset, default_continent.clone(), preferences)
        }
    }
}

fn keep_available(countries: &[String], available: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    countries
        .iter()
        .filter(|c| available.binary_search(*c).is_ok())
        .filter(|c| seen.insert(*c))
        .cloned()
        .collect()
}

fn clamp_range(dataset: &Dataset, range: DateRange) -> DateRange {
    let Some((min, max)) = dataset.date_extent() else {
        return range;
    };
    DateRange {
        start: range.start.map(|d| d.clamp(min, max)),
        end: range.end.map(|d| d.clamp(min, max)),
    }
}
