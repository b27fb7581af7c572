//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::f1::{CellValue, TableSpec};
use crate::domain::{DomainError, FeatureCollection, Table};
use std::path::{Path, PathBuf};

/// GeoJSON files. Read whole collections; write them atomically.
#[async_trait::async_trait]
pub trait GeoJsonPort: Send + Sync {
    async fn read_collection(&self, path: &Path) -> Result<FeatureCollection, DomainError>;

    async fn write_collection(
        &self,
        path: &Path,
        collection: &FeatureCollection,
    ) -> Result<(), DomainError>;
}

/// Delimited text tables with a header row.
#[async_trait::async_trait]
pub trait TablePort: Send + Sync {
    async fn read_table(&self, path: &Path) -> Result<Table, DomainError>;

    async fn write_table(&self, path: &Path, table: &Table) -> Result<(), DomainError>;
}

/// Plain HTTP GET.
#[async_trait::async_trait]
pub trait HttpPort: Send + Sync {
    /// Fetch a page body as text. Non-2xx statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String, DomainError>;

    /// Stream a response body to `dest`. Returns the number of bytes written.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DomainError>;
}

/// Archive extraction.
#[async_trait::async_trait]
pub trait ArchivePort: Send + Sync {
    /// Extract every file of `archive` under `dest`. Returns the extracted file paths.
    async fn extract_all(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, DomainError>;
}

/// Bulk row store for the results dump.
#[async_trait::async_trait]
pub trait RecordStorePort: Send + Sync {
    /// Insert rows into `spec`'s table, creating it if needed. Rows whose key
    /// already exists are ignored. Returns the number of rows inserted.
    ///
    /// `columns` are the store-side column names, one per cell of every row.
    async fn insert_rows(
        &self,
        spec: &TableSpec,
        columns: &[String],
        rows: Vec<Vec<CellValue>>,
    ) -> Result<u64, DomainError>;

    async fn count_rows(&self, table: &str) -> Result<u64, DomainError>;
}
