//! # In-Memory Reference Repository
//!
//! Holds entries in process memory. Starts from the built-in seed table
//! or from any list supplied by the caller.

use crate::domain::entities::AdminDivisionEntry;
use crate::infrastructure::reference::error::ReferenceResult;
use crate::infrastructure::reference::seed::seed_entries;
use crate::infrastructure::reference::traits::AdminDivisionRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory admin division repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdminDivisionRepository {
    entries: Arc<RwLock<Vec<AdminDivisionEntry>>>,
}

impl InMemoryAdminDivisionRepository {
    /// Creates a repository over `entries`.
    #[must_use]
    pub fn new(entries: Vec<AdminDivisionEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Creates a repository over the built-in seed table.
    #[must_use]
    pub fn with_seed() -> Self {
        Self::new(seed_entries())
    }

    /// Replaces the stored entries. Takes effect on the next load.
    pub async fn replace(&self, entries: Vec<AdminDivisionEntry>) {
        *self.entries.write().await = entries;
    }

    /// Returns the number of stored entries.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl AdminDivisionRepository for InMemoryAdminDivisionRepository {
    async fn load_all(&self) -> ReferenceResult<Vec<AdminDivisionEntry>> {
        Ok(self.entries.read().await.clone())
    }

    fn source_name(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_contains_capital() {
        let repo = InMemoryAdminDivisionRepository::with_seed();
        let entries = repo.load_all().await.unwrap();
        assert!(
            entries
                .iter()
                .any(|e| e.canonical_code().as_str() == "11001")
        );
    }

    #[tokio::test]
    async fn replace_is_visible_on_next_load() {
        let repo = InMemoryAdminDivisionRepository::default();
        assert_eq!(repo.count().await, 0);

        repo.replace(vec![AdminDivisionEntry::new("05001", "Medellín", "Antioquia")])
            .await;
        assert_eq!(repo.load_all().await.unwrap().len(), 1);
    }
}
