//! F1 results load: download zip -> extract -> load every catalogue table into the store.
//!
//! - Work directory is a temp dir unless the caller asks to keep the files
//! - Tables load in catalogue order (referenced tables first)
//! - Column names become snake_case; `\N` cells become NULL

use crate::adapters::ui::progress::table_bar;
use crate::domain::f1::{CellValue, F1_TABLES, TableSpec, camel_to_snake};
use crate::domain::{DomainError, Table};
use crate::ports::{ArchivePort, HttpPort, RecordStorePort, TablePort};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const ARCHIVE_NAME: &str = "f1db_csv.zip";

/// Outcome of loading one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub table: &'static str,
    pub rows_read: usize,
    pub inserted: u64,
}

pub struct F1Service {
    http: Arc<dyn HttpPort>,
    archive: Arc<dyn ArchivePort>,
    tables: Arc<dyn TablePort>,
    store: Arc<dyn RecordStorePort>,
}

impl F1Service {
    pub fn new(
        http: Arc<dyn HttpPort>,
        archive: Arc<dyn ArchivePort>,
        tables: Arc<dyn TablePort>,
        store: Arc<dyn RecordStorePort>,
    ) -> Self {
        Self {
            http,
            archive,
            tables,
            store,
        }
    }

    /// Download the dump from `url` and load it. With `keep_dir`, the archive
    /// and extracted CSVs stay there; otherwise a temp dir is used and removed.
    pub async fn load(&self, url: &str, keep_dir: Option<&Path>) -> Result<Vec<TableLoad>, DomainError> {
        // Removed from disk when dropped at the end of the load.
        let tmp = match keep_dir {
            Some(_) => None,
            None => Some(
                tempfile::tempdir().map_err(|e| DomainError::Io(format!("temp dir: {}", e)))?,
            ),
        };
        let work_dir: PathBuf = match (keep_dir, &tmp) {
            (Some(dir), _) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|e| DomainError::Io(format!("create {}: {}", dir.display(), e)))?;
                dir.to_path_buf()
            }
            (None, Some(tmp)) => tmp.path().to_path_buf(),
            (None, None) => return Err(DomainError::Io("no work directory".to_string())),
        };

        let archive_path = work_dir.join(ARCHIVE_NAME);
        info!(url, path = %archive_path.display(), "downloading results dump");
        let bytes = self.http.download(url, &archive_path).await?;
        info!(bytes, "download complete");

        let extracted = self.archive.extract_all(&archive_path, &work_dir).await?;
        debug!(files = extracted.len(), "archive extracted");

        self.load_dir(&extracted).await
    }

    /// Load every catalogue table from the extracted files. A missing table file is an error.
    pub async fn load_dir(&self, extracted: &[PathBuf]) -> Result<Vec<TableLoad>, DomainError> {
        let bar = table_bar(F1_TABLES.len() as u64);
        let mut loads = Vec::with_capacity(F1_TABLES.len());
        for spec in F1_TABLES {
            bar.set_message(spec.name);
            let path = find_table_file(extracted, spec)?;
            let table = self.tables.read_table(path).await?;
            let (columns, rows) = typed_rows(&table);
            let rows_read = rows.len();
            let inserted = self.store.insert_rows(spec, &columns, rows).await?;
            loads.push(TableLoad {
                table: spec.name,
                rows_read,
                inserted,
            });
            bar.inc(1);
        }
        bar.finish_with_message("done");

        let total: u64 = loads.iter().map(|l| l.inserted).sum();
        info!(tables = loads.len(), inserted = total, "results dump loaded");
        Ok(loads)
    }
}

fn find_table_file<'p>(extracted: &'p [PathBuf], spec: &TableSpec) -> Result<&'p Path, DomainError> {
    let wanted = spec.csv_file_name();
    extracted
        .iter()
        .find(|p| p.file_name().is_some_and(|n| n == wanted.as_str()))
        .map(PathBuf::as_path)
        .ok_or_else(|| DomainError::Archive(format!("{} not found in archive", wanted)))
}

/// snake_case column names and typed cells. Short rows are padded with NULL.
fn typed_rows(table: &Table) -> (Vec<String>, Vec<Vec<CellValue>>) {
    let columns: Vec<String> = table.headers.iter().map(|h| camel_to_snake(h)).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| row.get(i).map_or(CellValue::Null, |raw| CellValue::parse(raw)))
                .collect()
        })
        .collect();
    (columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tables::CsvTable;
    use std::sync::Mutex;

    struct MockHttp;

    #[async_trait::async_trait]
    impl HttpPort for MockHttp {
        async fn get_text(&self, url: &str) -> Result<String, DomainError> {
            Err(DomainError::Http(format!("unexpected get of {}", url)))
        }

        async fn download(&self, _url: &str, dest: &Path) -> Result<u64, DomainError> {
            tokio::fs::write(dest, b"PK").await.unwrap();
            Ok(2)
        }
    }

    /// Writes one small CSV per catalogue table, except the skipped ones.
    struct MockArchive {
        skip: Vec<&'static str>,
    }

    fn fixture_csv(spec: &TableSpec) -> String {
        let row = |v: &str| vec![v; spec.key_columns.len()].join(",");
        format!(
            "{},fastestLapTime\n{},1:27.452\n{},\\N\n",
            spec.key_columns.join(","),
            row("1"),
            row("2")
        )
    }

    #[async_trait::async_trait]
    impl ArchivePort for MockArchive {
        async fn extract_all(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, DomainError> {
            assert!(archive.exists());
            let mut out = Vec::new();
            for spec in F1_TABLES.iter().filter(|s| !self.skip.contains(&s.name)) {
                let path = dest.join(spec.csv_file_name());
                tokio::fs::write(&path, fixture_csv(spec)).await.unwrap();
                out.push(path);
            }
            Ok(out)
        }
    }

    #[derive(Default)]
    struct MockStore {
        inserts: Mutex<Vec<(String, Vec<String>, Vec<Vec<CellValue>>)>>,
    }

    #[async_trait::async_trait]
    impl RecordStorePort for MockStore {
        async fn insert_rows(
            &self,
            spec: &TableSpec,
            columns: &[String],
            rows: Vec<Vec<CellValue>>,
        ) -> Result<u64, DomainError> {
            let n = rows.len() as u64;
            self.inserts
                .lock()
                .unwrap()
                .push((spec.name.to_string(), columns.to_vec(), rows));
            Ok(n)
        }

        async fn count_rows(&self, table: &str) -> Result<u64, DomainError> {
            Ok(self
                .inserts
                .lock()
                .unwrap()
                .iter()
                .filter(|(t, _, _)| t == table)
                .map(|(_, _, r)| r.len() as u64)
                .sum())
        }
    }

    fn service(skip: Vec<&'static str>) -> (F1Service, Arc<MockStore>) {
        let store = Arc::new(MockStore::default());
        let svc = F1Service::new(
            Arc::new(MockHttp),
            Arc::new(MockArchive { skip }),
            Arc::new(CsvTable::new()),
            Arc::clone(&store) as Arc<dyn RecordStorePort>,
        );
        (svc, store)
    }

    #[tokio::test]
    async fn test_load_all_tables_in_order() {
        let (svc, store) = service(Vec::new());
        let loads = svc.load("http://dump.test/f1.zip", None).await.unwrap();
        assert_eq!(loads.len(), F1_TABLES.len());
        assert!(loads.iter().all(|l| l.rows_read == 2 && l.inserted == 2));

        let inserts = store.inserts.lock().unwrap();
        let order: Vec<&str> = inserts.iter().map(|(t, _, _)| t.as_str()).collect();
        let expected: Vec<&str> = F1_TABLES.iter().map(|s| s.name).collect();
        assert_eq!(order, expected);

        let (_, columns, rows) = inserts.iter().find(|(t, _, _)| t == "lap_times").unwrap();
        assert_eq!(columns, &vec!["race_id", "driver_id", "lap", "fastest_lap_time"]);
        assert_eq!(
            rows[0],
            vec![
                CellValue::Integer(1),
                CellValue::Integer(1),
                CellValue::Integer(1),
                CellValue::Text("1:27.452".to_string()),
            ]
        );
        assert_eq!(rows[1][3], CellValue::Null);
    }

    #[tokio::test]
    async fn test_missing_table_is_error() {
        let (svc, store) = service(vec!["pit_stops"]);
        let err = svc.load("http://dump.test/f1.zip", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Archive(ref m) if m.contains("pit_stops.csv")));
        // Tables before the missing one were loaded
        assert_eq!(store.count_rows("lap_times").await.unwrap(), 2);
        assert_eq!(store.count_rows("qualifying").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_keep_dir_retains_files() {
        let dir = tempfile::tempdir().unwrap();
        let keep = dir.path().join("dump");
        let (svc, _) = service(Vec::new());
        svc.load("http://dump.test/f1.zip", Some(&keep)).await.unwrap();
        assert!(keep.join(ARCHIVE_NAME).exists());
        assert!(keep.join("results.csv").exists());
    }

    #[test]
    fn test_typed_rows_pads_short_rows() {
        let table = Table {
            headers: vec!["raceId".to_string(), "positionText".to_string()],
            rows: vec![vec!["7".to_string()]],
        };
        let (columns, rows) = typed_rows(&table);
        assert_eq!(columns, vec!["race_id", "position_text"]);
        assert_eq!(rows, vec![vec![CellValue::Integer(7), CellValue::Null]]);
    }
}
