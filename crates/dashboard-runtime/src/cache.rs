//! Load-once dataset cache.
//!
//! [`DatasetCache`] wraps a [`DatasetSource`] and hands out a shared
//! [`Arc<Dataset>`]. The first successful [`DatasetCache::get`] reads the
//! source; every later call returns the same allocation without touching
//! storage again. A failed load leaves the cache empty so the error surfaces
//! to the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use dashboard_core::error::Result;
use dashboard_core::models::Dataset;
use dashboard_data::reader::load_transactions;
use once_cell::sync::OnceCell;

// ── Sources ───────────────────────────────────────────────────────────────────

/// Something that can produce the full transactions [`Dataset`].
pub trait DatasetSource {
    /// Read the whole dataset. Called at most once per successful cache fill.
    fn load(&self) -> Result<Dataset>;

    /// Human-readable origin, used in log lines and error messages.
    fn describe(&self) -> String;
}

/// Reads the transactions CSV from disk.
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<Dataset> {
        load_transactions(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixture dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Arc<Dataset>,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset::clone(&self.dataset))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.dataset.len())
    }
}

// ── DatasetCache ──────────────────────────────────────────────────────────────

/// Write-once cache in front of a [`DatasetSource`].
///
/// # Example
/// ```no_run
/// use dashboard_runtime::cache::{CsvDatasetSource, DatasetCache};
///
/// let cache = DatasetCache::new(CsvDatasetSource::new("dashboard/all_data.csv"));
/// let dataset = cache.get().expect("load transactions");
/// println!("{} rows", dataset.len());
/// ```
pub struct DatasetCache<S> {
    source: S,
    cell: OnceCell<Arc<Dataset>>,
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Return the cached dataset, loading it on first use.
    pub fn get(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            tracing::debug!("returning cached dataset");
            return Ok(Arc::clone(dataset));
        }

        let dataset = self.cell.get_or_try_init(|| {
            let started = Instant::now();
            tracing::info!(source = %self.source.describe(), "loading dataset");
            let dataset = self.source.load()?;
            tracing::debug!(
                rows = dataset.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "dataset cache populated"
            );
            Ok::<_, dashboard_core::DashboardError>(Arc::new(dataset))
        })?;

        Ok(Arc::clone(dataset))
    }

    /// `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl DatasetCache<InMemorySource> {
    /// A cache that is already populated with `dataset`.
    pub fn preloaded(dataset: Dataset) -> Self {
        let shared = Arc::new(dataset);
        Self {
            source: InMemorySource {
                dataset: Arc::clone(&shared),
            },
            cell: OnceCell::with_value(shared),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
