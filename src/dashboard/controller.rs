use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use super::{DashboardContext, DashboardView, SelectionEvent};
use crate::dataset::DatasetCache;
use crate::error::DashboardResult;
use crate::log_info;
use crate::models::SelectionState;
use crate::settings::DashboardSettings;

const ENABLE_LOGS: bool = true;

/// Owns the current selection for one dashboard session and recomputes the
/// view after every event. Clones share the same session.
#[derive(Clone)]
pub struct DashboardController {
    context: Arc<DashboardContext>,
    selection: Arc<Mutex<SelectionState>>,
}

impl DashboardController {
    pub fn new(context: DashboardContext) -> Self {
        let selection = context.initial_selection();
        Self {
            context: Arc::new(context),
            selection: Arc::new(Mutex::new(selection)),
        }
    }

    /// Load (or reuse) the dataset named in `settings` and start a session.
    /// Loading runs on the blocking pool.
    pub async fn open(cache: &DatasetCache, settings: &DashboardSettings) -> Result<Self> {
        let cache = cache.clone();
        let path = settings.data_path.clone();
        let dataset = tokio::task::spawn_blocking(move || cache.get_or_load(&path))
            .await
            .context("dataset loader task failed")??;

        log_info!(
            "Dashboard session opened on {} rows from {}",
            dataset.len(),
            settings.data_path.display()
        );
        Ok(Self::new(DashboardContext::new(dataset, settings)))
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    pub async fn selection(&self) -> SelectionState {
        self.selection.lock().await.clone()
    }

    pub async fn dispatch(&self, event: SelectionEvent) -> DashboardResult<DashboardView> {
        let mut guard = self.selection.lock().await;
        let next = self.context.apply(&guard, event);
        *guard = next;
        self.context.view(&guard)
    }

    pub async fn view(&self) -> DashboardResult<DashboardView> {
        let guard = self.selection.lock().await;
        self.context.view(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::day;
    use crate::error::DashboardError;
    use crate::models::{ContinentFilter, DateRange};
    use std::io::Write;

    fn settings_for(dir: &tempfile::TempDir) -> DashboardSettings {
        let path = dir.path().join("owid-covid-data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "iso_code,continent,location,date,population,people_vaccinated,people_fully_vaccinated"
        )
        .unwrap();
        writeln!(file, "DEU,Europe,Germany,2021-01-01,1000,100,50").unwrap();
        writeln!(file, "DEU,Europe,Germany,2021-02-01,1000,300,100").unwrap();
        writeln!(file, "CAN,North America,Canada,2021-01-20,2000,1000,").unwrap();
        writeln!(file, "JPN,Asia,Japan,2021-02-01,4000,400,400").unwrap();
        DashboardSettings {
            data_path: path,
            ..DashboardSettings::default()
        }
    }

    #[tokio::test]
    async fn open_loads_once_and_shows_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(&dir);
        let cache = DatasetCache::new();

        let first = DashboardController::open(&cache, &settings).await.unwrap();
        let second = DashboardController::open(&cache, &settings).await.unwrap();
        assert!(Arc::ptr_eq(
            &first.context().dataset,
            &second.context().dataset
        ));

        let view = first.view().await.unwrap();
        assert_eq!(view.selection.countries, vec!["Germany", "Canada"]);
        let metrics = view.metrics.unwrap();
        assert_eq!(metrics.avg_pct_vaccinated, Some(40.0));
        assert_eq!(metrics.avg_pct_fully_vaccinated, Some(10.0));
        assert_eq!(metrics.total_population_billions, 3000.0 / 1e9);
    }

    #[tokio::test]
    async fn dispatch_updates_session_state() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(&dir);
        let controller = DashboardController::open(&DatasetCache::new(), &settings)
            .await
            .unwrap();

        let view = controller
            .dispatch(SelectionEvent::ContinentChanged(ContinentFilter::Named(
                "Asia".into(),
            )))
            .await
            .unwrap();
        assert_eq!(view.selection.countries, vec!["Japan"]);
        assert_eq!(view.available_countries, vec!["Japan"]);

        let view = controller
            .dispatch(SelectionEvent::DateRangeChanged(DateRange::new(
                day(2021, 1, 1),
                day(2021, 1, 31),
            )))
            .await
            .unwrap();
        assert!(view.latest.is_empty());
        assert!(view.metrics.is_none());
        assert!(view.warning.is_none());

        controller
            .dispatch(SelectionEvent::CountriesChanged(Vec::new()))
            .await
            .unwrap();
        assert!(controller.selection().await.countries.is_empty());
        assert!(controller.view().await.unwrap().warning.is_some());
    }

    #[tokio::test]
    async fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DashboardSettings {
            data_path: dir.path().join("missing.csv"),
            ..DashboardSettings::default()
        };
        let err = DashboardController::open(&DatasetCache::new(), &settings)
            .await
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::Load { .. })
        ));
    }
}
