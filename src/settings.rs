use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::log_warn;
use crate::models::ContinentFilter;
use crate::pipeline::DEFAULT_PREFERENCES;

const ENABLE_LOGS: bool = true;

pub const DATA_PATH_ENV: &str = "VAXDASH_DATA";
pub const SETTINGS_PATH_ENV: &str = "VAXDASH_SETTINGS";
pub const DEFAULT_DATA_FILE: &str = "owid-covid-data.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSettings {
    pub data_path: PathBuf,
    pub preferred_countries: Vec<String>,
    pub default_continent: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            preferred_countries: DEFAULT_PREFERENCES.iter().map(|c| c.to_string()).collect(),
            default_continent: ContinentFilter::All.to_string(),
        }
    }
}

impl DashboardSettings {
    pub fn continent(&self) -> ContinentFilter {
        ContinentFilter::parse(&self.default_continent)
    }
}

/// Settings read once at startup from a JSON file.
pub struct SettingsStore {
    data: DashboardSettings,
}

impl SettingsStore {
    /// Open the settings file at `path`. A missing file gives defaults; an
    /// unparseable one is logged and replaced by defaults in memory.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring invalid settings in {}: {err}", path.display());
                DashboardSettings::default()
            })
        } else {
            DashboardSettings::default()
        };

        Ok(Self { data })
    }

    /// Current settings with `VAXDASH_DATA` applied on top.
    pub fn settings(&self) -> DashboardSettings {
        let mut settings = self.read().clone();
        if let Ok(path) = std::env::var(DATA_PATH_ENV) {
            if !path.trim().is_empty() {
                settings.data_path = PathBuf::from(path);
            }
        }
        settings
    }

    fn read(&self) -> &DashboardSettings {
        &self.data
    }
}
