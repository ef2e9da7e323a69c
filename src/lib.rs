pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod settings;
pub mod shell;
pub mod utils;

use std::path::PathBuf;

use anyhow::Context;
use dashboard::DashboardController;
use dataset::DatasetCache;
use settings::{SettingsStore, SETTINGS_PATH_ENV};
use shell::ShellArgs;

pub use dashboard::{DashboardContext, DashboardView, SelectionEvent};
pub use dataset::Dataset;
pub use error::{DashboardError, DashboardResult};
pub use models::{ContinentFilter, DateRange, Record, SelectionState};

const SETTINGS_FILE: &str = "vaxdash.json";

pub fn run() -> anyhow::Result<()> {
    utils::logging::init();

    log::info!("vaxdash starting up...");

    let args = ShellArgs::parse(std::env::args().skip(1))?;

    let settings_path = std::env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SETTINGS_FILE));
    let store = SettingsStore::new(settings_path)?;
    let settings = store.settings();

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let view = runtime.block_on(async {
        let cache = DatasetCache::new();
        let controller = DashboardController::open(&cache, &settings).await?;

        let current = controller.selection().await.date_range;
        let mut view = controller.view().await?;
        for event in args.events(&current) {
            view = controller.dispatch(event).await?;
        }
        Ok::<_, anyhow::Error>(view)
    })?;

    if let Some(warning) = &view.warning {
        log::warn!("{warning}");
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
