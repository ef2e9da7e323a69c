use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use super::Dataset;
use crate::error::DashboardResult;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

type Slot = Arc<Mutex<Option<Arc<Dataset>>>>;

/// Datasets keyed by source identity (canonical path). Entries are never
/// invalidated; a failed load leaves the slot empty so the next call retries.
pub struct DatasetCache {
    slots: Arc<Mutex<HashMap<PathBuf, Slot>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn source_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> DashboardResult<Arc<Dataset>> {
        self.get_or_load_with(path, Dataset::load)
    }

    /// Same as [`get_or_load`](Self::get_or_load) with a custom loader. The
    /// per-source slot stays locked while `load` runs, so concurrent callers
    /// for one source wait for a single load instead of racing.
    pub fn get_or_load_with<F>(&self, path: &Path, load: F) -> DashboardResult<Arc<Dataset>>
    where
        F: FnOnce(&Path) -> DashboardResult<Dataset>,
    {
        let key = source_key(path);
        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        let mut guard = lock(&slot);
        if let Some(dataset) = guard.as_ref() {
            log_debug!("Dataset cache hit for {}", key.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load(path)?);
        log_info!(
            "Cached dataset for {} ({} rows)",
            key.display(),
            dataset.len()
        );
        *guard = Some(Arc::clone(&dataset));
        Ok(dataset)
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DatasetCache {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}
