pub mod controller;
pub mod state;

pub use controller::DashboardController;
pub use state::{apply_event, SelectionEvent};

use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{DashboardError, DashboardResult};
use crate::{log_error, log_warn};
use crate::models::{ContinentFilter, Record, SelectionState};
use crate::pipeline::{
    self, available_countries, continent_options, last_updated, status_breakdown, time_series,
    world_view, LocationSeries, Metrics, StatusBreakdown,
};
use crate::settings::DashboardSettings;

const ENABLE_LOGS: bool = true;

/// Everything a pipeline run needs besides the selection itself. Built once
/// per loaded dataset and handed to the pipeline by reference.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub dataset: Arc<Dataset>,
    pub preferences: Vec<String>,
    pub default_continent: ContinentFilter,
}

impl DashboardContext {
    pub fn new(dataset: Arc<Dataset>, settings: &DashboardSettings) -> Self {
        Self {
            dataset,
            preferences: settings.preferred_countries.clone(),
            default_continent: settings.continent(),
        }
    }

    pub fn initial_selection(&self) -> SelectionState {
        SelectionState::initial(
            &self.dataset,
            self.default_continent.clone(),
            &self.preferences,
        )
    }

    pub fn apply(&self, previous: &SelectionState, event: SelectionEvent) -> SelectionState {
        apply_event(
            &self.dataset,
            previous,
            event,
            &self.default_continent,
            &self.preferences,
        )
    }

    /// Compute every output the front end renders for `selection`.
    ///
    /// Recoverable selection problems do not fail: the view carries a
    /// `warning` and no selection-dependent data.
    pub fn view(&self, selection: &SelectionState) -> DashboardResult<DashboardView> {
        let dataset = self.dataset.as_ref();
        let available = available_countries(dataset, &selection.continent);

        let mut view = DashboardView {
            selection: selection.clone(),
            continents: continent_options(dataset),
            available_countries: available,
            date_extent: dataset.date_extent(),
            last_updated: last_updated(dataset),
            warning: None,
            metrics: None,
            series: Vec::new(),
            latest: Vec::new(),
            breakdowns: BTreeMap::new(),
            world: world_view(dataset),
        };

        if view.available_countries.is_empty() {
            return recover(view, DashboardError::EmptySelection);
        }

        let output = match pipeline::run(dataset, selection) {
            Ok(output) => output,
            Err(err) => return recover(view, err),
        };

        view.metrics = output.metrics;
        view.series = time_series(&output.view);
        view.breakdowns = output
            .snapshot
            .records()
            .iter()
            .filter_map(|r| {
                status_breakdown(&output.snapshot, &r.location).map(|b| (r.location.clone(), b))
            })
            .collect();
        view.latest = output.snapshot.records().to_vec();
        Ok(view)
    }
}

fn recover(mut view: DashboardView, err: DashboardError) -> DashboardResult<DashboardView> {
    if !err.is_recoverable() {
        log_error!("Pipeline failed: {err}");
        return Err(err);
    }
    log_warn!("Pipeline halted: {err}");
    view.warning = Some(err.to_string());
    Ok(view)
}

/// Rendered-layer boundary: one value per widget or chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub selection: SelectionState,
    pub continents: Vec<ContinentFilter>,
    pub available_countries: Vec<String>,
    pub date_extent: Option<(NaiveDate, NaiveDate)>,
    pub last_updated: Option<NaiveDate>,
    pub warning: Option<String>,
    pub metrics: Option<Metrics>,
    pub series: Vec<LocationSeries>,
    pub latest: Vec<Record>,
    pub breakdowns: BTreeMap<String, StatusBreakdown>,
    pub world: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;
    use crate::models::DateRange;

    fn context() -> DashboardContext {
        DashboardContext {
            dataset: Arc::new(sample()),
            preferences: vec!["A".into(), "B".into()],
            default_continent: ContinentFilter::All,
        }
    }

    #[test]
    fn initial_view_has_metrics_and_series() {
        let ctx = context();
        let view = ctx.view(&ctx.initial_selection()).unwrap();
        assert!(view.warning.is_none());
        assert_eq!(view.selection.countries, vec!["A", "B"]);
        assert_eq!(view.series.len(), 2);
        assert_eq!(view.latest.len(), 2);
        assert_eq!(view.metrics.unwrap().avg_pct_vaccinated, Some(25.0));
        assert_eq!(view.breakdowns["A"].unvaccinated, 80.0);
        assert_eq!(view.world.len(), 1);
    }

    #[test]
    fn empty_selection_becomes_warning() {
        let ctx = context();
        let selection = ctx.apply(
            &ctx.initial_selection(),
            SelectionEvent::CountriesChanged(Vec::new()),
        );
        let view = ctx.view(&selection).unwrap();
        assert_eq!(
            view.warning.as_deref(),
            Some("Please select at least one country")
        );
        assert!(view.metrics.is_none());
        assert!(view.series.is_empty());
        assert_eq!(view.continents.len(), 3);
    }

    #[test]
    fn half_picked_range_becomes_warning() {
        let ctx = context();
        let selection = SelectionState {
            date_range: DateRange {
                start: ctx.initial_selection().date_range.start,
                end: None,
            },
            ..ctx.initial_selection()
        };
        let view = ctx.view(&selection).unwrap();
        assert!(view.warning.is_some());
        assert!(view.latest.is_empty());
    }

    #[test]
    fn reversed_range_gives_empty_view_without_warning() {
        let ctx = context();
        let initial = ctx.initial_selection();
        let selection = SelectionState {
            date_range: DateRange {
                start: initial.date_range.end,
                end: initial.date_range.start,
            },
            ..initial
        };
        let view = ctx.view(&selection).unwrap();
        assert!(view.warning.is_none());
        assert!(view.latest.is_empty());
        assert!(view.series.is_empty());
        assert!(view.breakdowns.is_empty());
        assert!(view.metrics.is_none());
    }

    #[test]
    fn fatal_errors_are_not_turned_into_warnings() {
        let ctx = context();
        let view = ctx.view(&ctx.initial_selection()).unwrap();
        let err = recover(view, DashboardError::load("owid.csv", "truncated")).unwrap_err();
        assert!(matches!(err, DashboardError::Load { .. }));
    }

    #[test]
    fn continent_without_countries_halts() {
        let ctx = context();
        let selection = ctx.apply(
            &ctx.initial_selection(),
            SelectionEvent::ContinentChanged(ContinentFilter::Named("Oceania".into())),
        );
        assert!(selection.countries.is_empty());
        let view = ctx.view(&selection).unwrap();
        assert!(view.available_countries.is_empty());
        assert!(view.warning.is_some());
    }
}
