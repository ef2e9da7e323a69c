mod cache;
mod loader;

pub use cache::DatasetCache;
pub use loader::REQUIRED_COLUMNS;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Record;

/// The loaded vaccination table. Rows keep file order and are never
/// mutated after loading; share it behind an `Arc`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest date in the table.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        }))
    }

    /// Sorted distinct non-null continents.
    pub fn continents(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.continent.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
