use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

pub const ALL_CONTINENTS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContinentFilter {
    All,
    Named(String),
}

impl Default for ContinentFilter {
    fn default() -> Self {
        ContinentFilter::All
    }
}

impl ContinentFilter {
    /// "All" (case-sensitive, as shown in the continent picker) maps to
    /// [`ContinentFilter::All`]; anything else names a continent.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CONTINENTS {
            ContinentFilter::All
        } else {
            ContinentFilter::Named(value.to_string())
        }
    }

    pub fn matches(&self, continent: Option<&str>) -> bool {
        match self {
            ContinentFilter::All => true,
            ContinentFilter::Named(name) => continent == Some(name.as_str()),
        }
    }
}

impl fmt::Display for ContinentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinentFilter::All => f.write_str(ALL_CONTINENTS),
            ContinentFilter::Named(name) => f.write_str(name),
        }
    }
}

/// Inclusive date window as picked by the user. Either bound may still be
/// missing while the user is mid-selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn bounds(&self) -> DashboardResult<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(DashboardError::DegenerateRange),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Ok((start, end)) => start <= date && date <= end,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub continent: ContinentFilter,
    pub countries: Vec<String>,
    pub date_range: DateRange,
}
