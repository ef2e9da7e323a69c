//! Selection-driven filtering and aggregation over a loaded [`Dataset`].
//!
//! Everything here is a pure function of its inputs so any front end can
//! re-run it after each interaction.

pub mod countries;
pub mod defaults;
pub mod filter;
pub mod metrics;
pub mod snapshot;
pub mod views;

pub use countries::{available_countries, continent_options};
pub use defaults::{default_selection, DEFAULT_PREFERENCES, MAX_DEFAULT_COUNTRIES};
pub use filter::{filter, FilteredView};
pub use metrics::{metrics, Metrics};
pub use snapshot::{snapshot, LatestSnapshot};
pub use views::{
    last_updated, status_breakdown, time_series, world_view, LocationSeries, SeriesPoint,
    StatusBreakdown,
};

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::DashboardResult;
use crate::models::SelectionState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub view: FilteredView,
    pub snapshot: LatestSnapshot,
    pub metrics: Option<Metrics>,
}

/// filter → snapshot → metrics for one selection.
pub fn run(dataset: &Dataset, selection: &SelectionState) -> DashboardResult<PipelineOutput> {
    let view = filter(dataset, &selection.countries, &selection.date_range)?;
    let latest = snapshot(&view);
    let metrics = metrics(&latest);
    Ok(PipelineOutput {
        view,
        snapshot: latest,
        metrics,
    })
}
