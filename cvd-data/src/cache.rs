//! Process-wide memoization of the loaded table.
//!
//! [`DatasetCache`] wraps an async once-cell: the first caller fetches and
//! cleans the table, every concurrent caller awaits that same in-flight load,
//! and later callers get the stored `Arc` without touching the source.

use crate::dataset::Dataset;
use crate::source::CsvSource;
use cvd_owid::error::{OwidError, Result};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Single-flight, load-once cache of the cleaned [`Dataset`].
pub struct DatasetCache<S> {
    source: S,
    cell: OnceCell<Arc<Dataset>>,
}

impl<S: CsvSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Return the cleaned table, fetching it on first use.
    ///
    /// A failed load leaves the cache empty, so the next call fetches again.
    pub async fn load(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            debug!("OWID dataset served from cache ({} rows)", dataset.len());
            return Ok(Arc::clone(dataset));
        }
        let dataset = self
            .cell
            .get_or_try_init(|| async {
                info!("Loading OWID dataset from {}", self.source.describe());
                let body = self.source.fetch().await?;
                info!("Fetched {} bytes", body.len());
                let dataset = Dataset::from_csv(&body)?;
                info!("OWID dataset ready: {} rows", dataset.len());
                Ok::<_, OwidError>(Arc::new(dataset))
            })
            .await?;
        Ok(Arc::clone(dataset))
    }

    /// The table if it has already been loaded.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Drop the memoized table; the next [`load`](Self::load) fetches again.
    pub fn clear(&mut self) {
        if self.cell.take().is_some() {
            info!("OWID dataset cache cleared");
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CSV: &str = "\
iso_code,location,date,total_cases,total_deaths,new_deaths,population,people_fully_vaccinated_per_hundred
DEU,Germany,2022-06-30,28129540,140292,98,83369840,76.1
DEU,Germany,2022-07-01,28234567,140380,88,83369840,
";

    struct CountingSource {
        body: Option<&'static str>,
        fetches: Arc<AtomicUsize>,
    }

    impl CountingSource {
        fn new(body: Option<&'static str>) -> (Self, Arc<AtomicUsize>) {
            let fetches = Arc::new(AtomicUsize::new(0));
            let source = CountingSource {
                body,
                fetches: Arc::clone(&fetches),
            };
            (source, fetches)
        }
    }

    impl CsvSource for CountingSource {
        fn describe(&self) -> String {
            "in-memory fixture".to_string()
        }

        async fn fetch(&self) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            // give other callers a chance to pile up behind this load
            tokio::task::yield_now().await;
            match self.body {
                Some(body) => Ok(body.to_string()),
                None => Err(OwidError::Fetch("connection refused".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_load_is_memoized() {
        let (source, fetches) = CountingSource::new(Some(CSV));
        let cache = DatasetCache::new(source);
        assert!(!cache.is_loaded());

        let first = cache.load().await.unwrap();
        let second = cache.load().await.unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(first.len(), 2);
        assert!(cache.is_loaded());
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_share_one_fetch() {
        let (source, fetches) = CountingSource::new(Some(CSV));
        let cache = DatasetCache::new(source);

        let (a, b, c) = tokio::join!(cache.load(), cache.load(), cache.load());
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let (source, fetches) = CountingSource::new(None);
        let cache = DatasetCache::new(source);

        let err = cache.load().await.unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_none());

        assert!(cache.load().await.is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_surfaces() {
        let (source, _) = CountingSource::new(Some("location\nGermany\n"));
        let cache = DatasetCache::new(source);
        let err = cache.load().await.unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let (source, fetches) = CountingSource::new(Some(CSV));
        let mut cache = DatasetCache::new(source);

        let before = cache.load().await.unwrap();
        cache.clear();
        assert!(!cache.is_loaded());
        let after = cache.load().await.unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }
}
