//! Chart-ready shapes derived from the pipeline outputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{FilteredView, LatestSnapshot};
use crate::dataset::Dataset;
use crate::models::Record;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub pct_vaccinated: Option<f64>,
    pub pct_fully_vaccinated: Option<f64>,
    pub people_vaccinated: Option<f64>,
    pub people_fully_vaccinated: Option<f64>,
    pub population: Option<f64>,
}

impl From<&Record> for SeriesPoint {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date,
            pct_vaccinated: record.pct_vaccinated,
            pct_fully_vaccinated: record.pct_fully_vaccinated,
            people_vaccinated: record.people_vaccinated,
            people_fully_vaccinated: record.people_fully_vaccinated,
            population: record.population,
        }
    }
}

/// One line of the progress-over-time charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationSeries {
    pub location: String,
    pub points: Vec<SeriesPoint>,
}

/// Group the filtered rows into one date-ordered series per location.
pub fn time_series(view: &FilteredView) -> Vec<LocationSeries> {
    let mut grouped: BTreeMap<&str, Vec<SeriesPoint>> = BTreeMap::new();
    for record in view.records() {
        grouped
            .entry(record.location.as_str())
            .or_default()
            .push(SeriesPoint::from(record));
    }

    grouped
        .into_iter()
        .map(|(location, mut points)| {
            // Stable sort keeps file order for duplicate dates.
            points.sort_by_key(|p| p.date);
            LocationSeries {
                location: location.to_string(),
                points,
            }
        })
        .collect()
}

/// Pie-chart split of a population, in percent.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub fully_vaccinated: f64,
    pub partially_vaccinated: f64,
    pub unvaccinated: f64,
}

/// Fully / partially / unvaccinated shares for one location of the snapshot.
/// Values are not clamped, so inconsistent source data can produce negative
/// shares.
pub fn status_breakdown(snapshot: &LatestSnapshot, location: &str) -> Option<StatusBreakdown> {
    let record = snapshot.get(location)?;
    let vaccinated = record.pct_vaccinated?;
    let fully = record.pct_fully_vaccinated?;
    Some(StatusBreakdown {
        fully_vaccinated: fully,
        partially_vaccinated: vaccinated - fully,
        unvaccinated: 100.0 - vaccinated,
    })
}

/// Every row on the dataset's latest date, for the world map.
pub fn world_view(dataset: &Dataset) -> Vec<Record> {
    let Some(latest) = last_updated(dataset) else {
        return Vec::new();
    };
    dataset
        .records()
        .iter()
        .filter(|r| r.date == latest)
        .cloned()
        .collect()
}

pub fn last_updated(dataset: &Dataset) -> Option<NaiveDate> {
    dataset.date_extent().map(|(_, max)| max)
}
