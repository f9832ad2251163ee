//! TTL-cached meeting table.
//!
//! Wraps [`MeetingTable::load`] with a time-to-live cache and a manual
//! invalidation trigger. A reload builds a wholly new table and swaps the
//! cached reference; tables already handed out stay valid and unchanged.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use meetings_core::error::Result;
use meetings_core::sequencer::MonthFilter;
use meetings_data::query::{query_table, QueryResult};
use meetings_data::table::MeetingTable;

pub use meetings_core::settings::DEFAULT_CACHE_TTL_SECS;

// ── DataManager ───────────────────────────────────────────────────────────────

/// Owner of the loaded table and its load time.
///
/// # Example
/// ```no_run
/// use meetings_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new(600, "data/clinicas.csv");
/// let table = mgr.get_data(false)?;
/// println!("meetings: {}", table.len());
/// # Ok::<(), meetings_core::MeetingError>(())
/// ```
pub struct DataManager {
    /// Maximum age of the cached table before it is reloaded.
    cache_ttl: Duration,
    /// Source file.
    data_path: PathBuf,
    /// Most recently loaded table.
    cache: Option<Arc<MeetingTable>>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Description of the last load failure.
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(cache_ttl_secs: u64, data_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            data_path: data_path.into(),
            cache: None,
            cache_timestamp: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the table, reloading it when expired or when `force_refresh`
    /// is set.
    ///
    /// A failed load is returned as an error; the previous table is kept for
    /// later calls but not returned by this one.
    pub fn get_data(&mut self, force_refresh: bool) -> Result<Arc<MeetingTable>> {
        if !force_refresh {
            if let Some(table) = self.valid_cache() {
                tracing::debug!("returning cached meeting table");
                return Ok(table);
            }
        }

        match MeetingTable::load(&self.data_path) {
            Ok(table) => {
                let table = Arc::new(table);
                tracing::debug!(records = table.len(), "meeting table cache updated");
                self.cache = Some(Arc::clone(&table));
                self.cache_timestamp = Some(Instant::now());
                self.last_error = None;
                Ok(table)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.data_path.display(), "meeting table load failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Load (or reuse) the table and run the query pipeline on it.
    pub fn query(&mut self, filter: &MonthFilter, top_limit: usize) -> Result<QueryResult> {
        let table = self.get_data(false)?;
        Ok(query_table(&table, filter, top_limit))
    }

    /// Discard the cached table, forcing the next [`DataManager::get_data`]
    /// call to reload.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if nothing is loaded.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// The cached table when it is still within its TTL.
    fn valid_cache(&self) -> Option<Arc<MeetingTable>> {
        match (self.cache.as_ref(), self.cache_timestamp) {
            (Some(table), Some(ts)) if ts.elapsed() < self.cache_ttl => Some(Arc::clone(table)),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
