use serde::Serialize;

use super::LatestSnapshot;

/// Headline numbers for the current selection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub avg_pct_vaccinated: Option<f64>,
    pub avg_pct_fully_vaccinated: Option<f64>,
    pub total_population_billions: f64,
}

/// Averages skip rows without a value; a field with no values at all is
/// `None`. Returns `None` for an empty snapshot.
pub fn metrics(snapshot: &LatestSnapshot) -> Option<Metrics> {
    if snapshot.is_empty() {
        return None;
    }
    let records = snapshot.records();

    let total_population: f64 = records.iter().filter_map(|r| r.population).sum();

    Some(Metrics {
        avg_pct_vaccinated: mean(records.iter().filter_map(|r| r.pct_vaccinated)),
        avg_pct_fully_vaccinated: mean(records.iter().filter_map(|r| r.pct_fully_vaccinated)),
        total_population_billions: total_population / 1e9,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
