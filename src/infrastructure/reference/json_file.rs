//! # JSON File Reference Repository
//!
//! Reads the reference table from a JSON array on disk. Each element is an
//! object with a code, municipality and department; Spanish keys are
//! accepted as aliases.
//!
//! ```json
//! [{"dane_code": "05001", "municipio": "Medellín", "departamento": "Antioquia"}]
//! ```

use crate::domain::entities::AdminDivisionEntry;
use crate::infrastructure::reference::error::{ReferenceError, ReferenceResult};
use crate::infrastructure::reference::traits::AdminDivisionRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Repository backed by a JSON file. The file is re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileAdminDivisionRepository {
    path: PathBuf,
}

impl JsonFileAdminDivisionRepository {
    /// Creates a repository reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AdminDivisionRepository for JsonFileAdminDivisionRepository {
    async fn load_all(&self) -> ReferenceResult<Vec<AdminDivisionEntry>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ReferenceError::io(&self.path, e.to_string()))?;

        serde_json::from_str(&raw).map_err(|e| {
            ReferenceError::parse(format!("{}: {}", self.path.display(), e))
        })
    }

    fn source_name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_entries_with_aliases() {
        let file = write_file(
            r#"[
                {"dane_code": "05001", "municipio": "Medellín", "departamento": "Antioquia"},
                {"canonical_code": "76001", "municipality_name": "Cali", "department_name": "Valle del Cauca"}
            ]"#,
        );

        let repo = JsonFileAdminDivisionRepository::new(file.path());
        let entries = repo.load_all().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].municipality_name(), "Medellín");
        assert_eq!(entries[1].department_name(), "Valle del Cauca");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let repo = JsonFileAdminDivisionRepository::new("/nonexistent/divisions.json");
        let err = repo.load_all().await.unwrap_err();
        assert!(matches!(err, ReferenceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let file = write_file(r#"{"not": "a list"}"#);
        let repo = JsonFileAdminDivisionRepository::new(file.path());
        let err = repo.load_all().await.unwrap_err();
        assert!(matches!(err, ReferenceError::Parse(_)));
    }
}
