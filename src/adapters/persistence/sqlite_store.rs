//! SQLite-backed record store via libsql. Implements RecordStorePort for the results dump.
//!
//! One database file holds every table. Tables are created on first insert with
//! the catalogue's key columns as primary key; inserts use ON CONFLICT DO NOTHING,
//! so loading the same dump twice is a no-op.

use crate::domain::DomainError;
use crate::domain::f1::{CellValue, TableSpec, camel_to_snake};
use crate::ports::RecordStorePort;
use libsql::{Database, Value};
use libsql::params::Params;
use std::path::{Path, PathBuf};
use tracing::info;

/// SQLite record store. One database file at the given path.
pub struct SqliteStore {
    db: Database,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database file. Sets WAL mode and synchronous=NORMAL.
    pub async fn connect(db_path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DomainError::Store(e.to_string()))?;
        }
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        // PRAGMA returns a row (new value); use query and consume rows (execute fails when rows are returned).
        for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
            let mut rows = conn
                .query(pragma, ())
                .await
                .map_err(|e| DomainError::Store(format!("{} failed: {}", pragma, e)))?;
            while rows
                .next()
                .await
                .map_err(|e| DomainError::Store(e.to_string()))?
                .is_some()
            {}
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");
        Ok(Self { db, db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn create_table_sql(spec: &TableSpec, columns: &[String]) -> String {
        let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
        let keys: Vec<String> = spec
            .key_columns
            .iter()
            .map(|k| quote_ident(&camel_to_snake(k)))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({}, PRIMARY KEY ({}))",
            quote_ident(spec.name),
            cols.join(", "),
            keys.join(", ")
        )
    }

    fn insert_sql(spec: &TableSpec, columns: &[String]) -> String {
        let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO NOTHING",
            quote_ident(spec.name),
            cols.join(", "),
            placeholders.join(", ")
        )
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_sql_value(cell: CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Integer(i) => Value::Integer(i),
        CellValue::Real(f) => Value::Real(f),
        CellValue::Text(s) => Value::Text(s),
    }
}

#[async_trait::async_trait]
impl RecordStorePort for SqliteStore {
    async fn insert_rows(
        &self,
        spec: &TableSpec,
        columns: &[String],
        rows: Vec<Vec<CellValue>>,
    ) -> Result<u64, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(&Self::create_table_sql(spec, columns), ())
            .await
            .map_err(|e| DomainError::Store(format!("create {}: {}", spec.name, e)))?;

        let sql = Self::insert_sql(spec, columns);
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut inserted = 0u64;
        for row in rows {
            let values: Vec<Value> = row.into_iter().map(to_sql_value).collect();
            inserted += tx
                .execute(&sql, Params::Positional(values))
                .await
                .map_err(|e| DomainError::Store(format!("insert into {}: {}", spec.name, e)))?;
        }
        tx.commit()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        info!(table = spec.name, inserted, "loaded rows");
        Ok(inserted)
    }

    async fn count_rows(&self, table: &str) -> Result<u64, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut rows = conn
            .query(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)), ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let count = match rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            Some(row) => row
                .get::<i64>(0)
                .map_err(|e| DomainError::Store(e.to_string()))?,
            None => 0,
        };
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::f1::F1_TABLES;

    #[test]
    fn test_sql_generation() {
        let spec = F1_TABLES[9];
        let cols = vec!["race_id".to_string(), "driver_id".to_string(), "lap".to_string()];
        assert_eq!(
            SqliteStore::create_table_sql(&spec, &cols),
            "CREATE TABLE IF NOT EXISTS \"lap_times\" (\"race_id\", \"driver_id\", \"lap\", PRIMARY KEY (\"race_id\", \"driver_id\", \"lap\"))"
        );
        assert_eq!(
            SqliteStore::insert_sql(&spec, &cols),
            "INSERT INTO \"lap_times\" (\"race_id\", \"driver_id\", \"lap\") VALUES (?1, ?2, ?3) ON CONFLICT DO NOTHING"
        );
    }

    #[tokio::test]
    async fn test_insert_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::connect(dir.path().join("f1.db")).await.unwrap();
        let spec = F1_TABLES[0];
        let cols = vec!["status_id".to_string(), "status".to_string()];
        let rows = || {
            vec![
                vec![CellValue::Integer(1), CellValue::Text("Finished".to_string())],
                vec![CellValue::Integer(2), CellValue::Null],
            ]
        };

        assert_eq!(store.insert_rows(&spec, &cols, rows()).await.unwrap(), 2);
        assert_eq!(store.insert_rows(&spec, &cols, rows()).await.unwrap(), 0);
        assert_eq!(store.count_rows("status").await.unwrap(), 2);
    }
}
