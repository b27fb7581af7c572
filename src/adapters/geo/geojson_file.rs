//! Implements GeoJsonPort using files on disk.
//!
//! Reads a whole FeatureCollection with serde_json; writes through a temp file.

use crate::domain::{DomainError, FeatureCollection};
use crate::ports::GeoJsonPort;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File-based GeoJSON storage.
#[derive(Debug, Default)]
pub struct GeoJsonFile;

impl GeoJsonFile {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl GeoJsonPort for GeoJsonFile {
    async fn read_collection(&self, path: &Path) -> Result<FeatureCollection, DomainError> {
        let s = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Io(format!("read {}: {}", path.display(), e)))?;
        let collection: FeatureCollection = serde_json::from_str(&s)
            .map_err(|e| DomainError::GeoJson(format!("{}: {}", path.display(), e)))?;
        info!(
            path = %path.display(),
            features = collection.features.len(),
            "loaded GeoJSON"
        );
        Ok(collection)
    }

    /// Write-replace: temp file, sync_all, rename. A crash mid-write leaves
    /// the previous file intact.
    async fn write_collection(
        &self,
        path: &Path,
        collection: &FeatureCollection,
    ) -> Result<(), DomainError> {
        let json =
            serde_json::to_string(collection).map_err(|e| DomainError::GeoJson(e.to_string()))?;

        let temp_path = path.with_extension("geojson.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Io(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Io(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Io(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, path)
            .await
            .map_err(|e| DomainError::Io(format!("atomic rename failed: {}", e)))?;

        info!(
            path = %path.display(),
            features = collection.features.len(),
            "wrote GeoJSON"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_preserves_unknown_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","name":"ne_10m","features":[
                {"type":"Feature","properties":{"SOVEREIGNT":"France","GU_A3":"FRA"},"bbox":[0,0,1,1],"geometry":{"type":"Point","coordinates":[2.3,48.8]}},
                {"type":"Feature","properties":null,"geometry":null}
            ]}"#,
        )
        .unwrap();

        let store = GeoJsonFile::new();
        let fc = store.read_collection(&path).await.unwrap();
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].property("GU_A3"), Some("FRA"));
        assert!(fc.features[1].property("GU_A3").is_none());

        let out = dir.path().join("out.geojson");
        store.write_collection(&out, &fc).await.unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["name"], "ne_10m");
        assert_eq!(written["features"][0]["bbox"][2], 1);
        assert!(!dir.path().join("out.geojson.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_invalid_json_is_geojson_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.geojson");
        std::fs::write(&path, "{ not json").unwrap();
        let err = GeoJsonFile::new().read_collection(&path).await.unwrap_err();
        assert!(matches!(err, DomainError::GeoJson(_)));
    }
}
