//! Implements TablePort with the `csv` crate.
//!
//! Tables are read whole (header + string rows) so every column survives a
//! read-modify-write cycle unchanged.

use crate::domain::{DomainError, Table};
use crate::ports::TablePort;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Comma-delimited CSV file tables.
#[derive(Debug, Default)]
pub struct CsvTable;

impl CsvTable {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV text into a [`Table`]. Rows may be shorter or longer than the header.
    pub fn parse(&self, text: &str) -> Result<Table, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = rdr.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(Table { headers, rows })
    }

    /// Render a [`Table`] as CSV text with a header row.
    pub fn render(&self, table: &Table) -> Result<String, csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        into_string(wtr)
    }
}

/// Serialize records (header taken from the field names) to CSV text.
pub fn records_to_csv<T: Serialize>(records: &[T]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    into_string(wtr)
}

fn into_string(wtr: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[async_trait::async_trait]
impl TablePort for CsvTable {
    async fn read_table(&self, path: &Path) -> Result<Table, DomainError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Io(format!("read {}: {}", path.display(), e)))?;
        let table = self
            .parse(&text)
            .map_err(|e| DomainError::Csv(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), rows = table.rows.len(), "loaded table");
        Ok(table)
    }

    async fn write_table(&self, path: &Path, table: &Table) -> Result<(), DomainError> {
        let text = self
            .render(table)
            .map_err(|e| DomainError::Csv(e.to_string()))?;
        fs::write(path, text)
            .await
            .map_err(|e| DomainError::Io(format!("write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), rows = table.rows.len(), "wrote table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DebutRecord, MatchOutcome};

    #[test]
    fn test_parse_and_render_keep_columns() {
        let csv = CsvTable::new();
        let table = csv
            .parse("team,geo_id,founded\nScotland,Scotland,1873\n\"Serbia, FA\",Serbia,1919\n")
            .unwrap();
        assert_eq!(table.headers, vec!["team", "geo_id", "founded"]);
        assert_eq!(table.rows[1][0], "Serbia, FA");

        let out = csv.render(&table).unwrap();
        assert!(out.starts_with("team,geo_id,founded\n"));
        assert!(out.contains("\"Serbia, FA\",Serbia,1919"));
    }

    #[test]
    fn test_records_to_csv_uses_field_names() {
        let recs = vec![DebutRecord {
            team_name: "Scotland".to_string(),
            oppname: "England".to_string(),
            outcome: MatchOutcome::Draw,
            score: "0 - 0".to_string(),
            venue: "Hamilton Crescent, Partick".to_string(),
            ko_year: 1872,
            ko_date: "30 November 1872".to_string(),
            match_type: "Friendly".to_string(),
        }];
        let out = records_to_csv(&recs).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("team_name,oppname,outcome,score,venue,ko_year,ko_date,match_type")
        );
        assert_eq!(
            lines.next(),
            Some("Scotland,England,D,0 - 0,\"Hamilton Crescent, Partick\",1872,30 November 1872,Friendly")
        );
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvTable::new()
            .read_table(&dir.path().join("nope.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
