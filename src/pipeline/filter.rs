use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{DateRange, Record};
use crate::log_debug;

const ENABLE_LOGS: bool = false;

/// Rows of the dataset inside the current selection, in dataset order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FilteredView {
    records: Vec<Record>,
}

impl FilteredView {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for FilteredView {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Keep rows whose location is one of `countries` (exact match) and whose date
/// falls in the closed `range`.
///
/// Fails with [`DashboardError::EmptySelection`] when no country is selected
/// and [`DashboardError::DegenerateRange`] when a bound is missing.
pub fn filter(
    dataset: &Dataset,
    countries: &[String],
    range: &DateRange,
) -> DashboardResult<FilteredView> {
    if countries.is_empty() {
        return Err(DashboardError::EmptySelection);
    }
    let (start, end) = range.bounds()?;

    let selected: HashSet<&str> = countries.iter().map(String::as_str).collect();
    let view: FilteredView = dataset
        .records()
        .iter()
        .filter(|r| selected.contains(r.location.as_str()))
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    log_debug!(
        "Filtered {} of {} rows for {} countries between {start} and {end}",
        view.len(),
        dataset.len(),
        selected.len()
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{day, sample};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn keeps_selected_locations_within_range() {
        let view = filter(
            &sample(),
            &names(&["A", "B"]),
            &DateRange::new(day(2021, 1, 1), day(2021, 2, 28)),
        )
        .unwrap();
        let locations: Vec<&str> = view.records().iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, vec!["A", "B", "A"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let view = filter(
            &sample(),
            &names(&["A"]),
            &DateRange::new(day(2021, 2, 1), day(2021, 2, 1)),
        )
        .unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].date, day(2021, 2, 1));
    }

    #[test]
    fn location_match_is_case_sensitive() {
        let view = filter(
            &sample(),
            &names(&["a"]),
            &DateRange::new(day(2021, 1, 1), day(2021, 12, 31)),
        )
        .unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn rejects_empty_selection_before_range() {
        let err = filter(&sample(), &[], &DateRange::default()).unwrap_err();
        assert!(matches!(err, DashboardError::EmptySelection));
    }

    #[test]
    fn rejects_missing_bound() {
        let range = DateRange {
            start: None,
            end: Some(day(2021, 2, 1)),
        };
        let err = filter(&sample(), &names(&["A"]), &range).unwrap_err();
        assert!(matches!(err, DashboardError::DegenerateRange));
    }
}
