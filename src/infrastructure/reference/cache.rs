//! # Admin Division Cache
//!
//! Process-wide snapshot of the reference index.
//!
//! The index is built on first use and shared as an `Arc` snapshot. Readers
//! never block on a load in progress once a snapshot exists; a refresh
//! swaps the snapshot atomically and in-flight requests keep the one they
//! already hold. Loads are serialized so that concurrent first requests
//! build the index once.

use crate::domain::services::AdminDivisionIndex;
use crate::infrastructure::reference::error::{ReferenceError, ReferenceResult};
use crate::infrastructure::reference::traits::AdminDivisionRepository;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Lazily loaded, refreshable index over an [`AdminDivisionRepository`].
#[derive(Debug)]
pub struct AdminDivisionCache {
    repository: Arc<dyn AdminDivisionRepository>,
    current: RwLock<Option<Arc<AdminDivisionIndex>>>,
    load_lock: Mutex<()>,
}

impl AdminDivisionCache {
    /// Creates an empty cache. Nothing is loaded until first use.
    #[must_use]
    pub fn new(repository: Arc<dyn AdminDivisionRepository>) -> Self {
        Self {
            repository,
            current: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// Returns the current snapshot, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns a `ReferenceError` if the first load fails. A failed load
    /// leaves the cache empty so the next call retries.
    pub async fn index(&self) -> ReferenceResult<Arc<AdminDivisionIndex>> {
        if let Some(index) = self.snapshot() {
            return Ok(index);
        }

        let _guard = self.load_lock.lock().await;
        // Another caller may have loaded while we waited.
        if let Some(index) = self.snapshot() {
            return Ok(index);
        }
        self.load_locked().await
    }

    /// Reloads from the repository and swaps the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `ReferenceError` if the reload fails; the previous
    /// snapshot stays in place.
    pub async fn refresh(&self) -> ReferenceResult<Arc<AdminDivisionIndex>> {
        let _guard = self.load_lock.lock().await;
        self.load_locked().await
    }

    /// Returns the current snapshot without loading.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<AdminDivisionIndex>> {
        self.current.read().clone()
    }

    /// Returns true once a snapshot is loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    async fn load_locked(&self) -> ReferenceResult<Arc<AdminDivisionIndex>> {
        let started = Instant::now();
        let entries = self.repository.load_all().await.map_err(|e| {
            tracing::error!(
                source = %self.repository.source_name(),
                error = %e,
                "failed to load admin divisions"
            );
            e
        })?;

        if entries.is_empty() {
            tracing::error!(source = %self.repository.source_name(), "admin division source is empty");
            return Err(ReferenceError::Empty);
        }

        let index = Arc::new(AdminDivisionIndex::new(entries)?);
        *self.current.write() = Some(Arc::clone(&index));

        tracing::info!(
            source = %self.repository.source_name(),
            entries = index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "admin division index loaded"
        );
        Ok(index)
    }
}
