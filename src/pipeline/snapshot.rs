use std::collections::BTreeMap;

use serde::Serialize;

use super::FilteredView;
use crate::models::Record;

/// Most recent row per location, ordered by location.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LatestSnapshot {
    records: Vec<Record>,
}

impl LatestSnapshot {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, location: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.location == location)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pick, for each location, the row with the latest date. When several rows
/// share that date the one seen last wins.
pub fn snapshot(view: &FilteredView) -> LatestSnapshot {
    let mut latest: BTreeMap<&str, &Record> = BTreeMap::new();
    for record in view.records() {
        latest
            .entry(record.location.as_str())
            .and_modify(|current| {
                if record.date >= current.date {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    LatestSnapshot {
        records: latest.into_values().cloned().collect(),
    }
}
