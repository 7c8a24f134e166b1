//! Analysis report caching using Moka.
//!
//! Reports are keyed by the fingerprint of the raw input set, so uploading the
//! same files again returns the stored report instead of recomputing it.

use moka::sync::Cache;
use scostamenti_shared::config::CacheConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::engine::AnalysisEngine;
use super::error::AnalysisError;
use super::fingerprint::InputFingerprint;
use super::report::AnalysisReport;
use crate::dataset::RawDatasets;

/// Default cache capacity (number of reports).
const DEFAULT_CACHE_CAPACITY: u64 = 16;

/// Default time-to-live for cache entries (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

/// A report and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    /// The report.
    pub report: Arc<AnalysisReport>,
    /// True if the report was served from the cache.
    pub cached: bool,
}

/// Cache of analysis reports.
///
/// Thread-safe; runs themselves are not coordinated, so two callers missing on
/// the same input may both compute it.
#[derive(Clone)]
pub struct AnalysisCache {
    engine: AnalysisEngine,
    cache: Cache<InputFingerprint, Arc<AnalysisReport>>,
}

impl AnalysisCache {
    /// Creates a cache with default settings.
    #[must_use]
    pub fn new(engine: AnalysisEngine) -> Self {
        Self::with_config(engine, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(engine: AnalysisEngine, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { engine, cache }
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(engine: AnalysisEngine, config: &CacheConfig) -> Self {
        Self::with_config(engine, config.max_capacity, config.ttl_secs)
    }

    /// Runs the analysis, returning the cached report if the same input set was seen.
    ///
    /// Failed runs are not cached.
    ///
    /// # Errors
    ///
    /// Returns the analysis error of a failed run.
    pub fn run_cached(&self, datasets: &RawDatasets) -> Result<CachedAnalysis, AnalysisError> {
        let key = InputFingerprint::of(datasets)?;

        if let Some(report) = self.cache.get(&key) {
            debug!(fingerprint = %key, "Analysis served from cache");
            return Ok(CachedAnalysis {
                report,
                cached: true,
            });
        }

        let report = Arc::new(self.engine.run_datasets(datasets)?);
        self.cache.insert(key, Arc::clone(&report));

        Ok(CachedAnalysis {
            report,
            cached: false,
        })
    }

    /// Invalidates all cached reports (e.g. on a new upload).
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Invalidates the report of one input set.
    ///
    /// # Errors
    ///
    /// Returns an error if the datasets cannot be fingerprinted.
    pub fn invalidate(&self, datasets: &RawDatasets) -> Result<(), AnalysisError> {
        let key = InputFingerprint::of(datasets)?;
        self.cache.invalidate(&key);
        Ok(())
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka does this lazily; calling it makes `entry_count` exact.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(AnalysisEngine::default())
    }
}
