//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Geo label (after alias expansion) matching no boundary at either granularity.
    #[error("No sovereignty or map unit found for: {0}")]
    UnresolvedLabel(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Column not found in table: {0}")]
    MissingColumn(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),
}
