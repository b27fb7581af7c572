//! Implements ArchivePort for zip files.
//!
//! Extraction is blocking I/O and runs on the blocking pool.

use crate::domain::DomainError;
use crate::ports::ArchivePort;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let file = File::open(archive)
            .map_err(|e| DomainError::Io(format!("open {}: {}", archive.display(), e)))?;
        let mut zip = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| DomainError::Archive(e.to_string()))?;
        std::fs::create_dir_all(dest).map_err(|e| DomainError::Io(e.to_string()))?;

        let mut extracted = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let mut entry = zip
                .by_index(i)
                .map_err(|e| DomainError::Archive(e.to_string()))?;
            // enclosed_name rejects absolute paths and `..` traversal
            let Some(rel) = entry.enclosed_name() else {
                warn!(name = entry.name(), "unsafe path in archive; skipped");
                continue;
            };
            let out_path = dest.join(rel);
            if entry.is_dir() {
                std::fs::create_dir_all(&out_path).map_err(|e| DomainError::Io(e.to_string()))?;
                continue;
            }
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| DomainError::Io(e.to_string()))?;
            }
            let mut out = File::create(&out_path)
                .map_err(|e| DomainError::Io(format!("create {}: {}", out_path.display(), e)))?;
            std::io::copy(&mut entry, &mut out)
                .map_err(|e| DomainError::Archive(format!("{}: {}", out_path.display(), e)))?;
            extracted.push(out_path);
        }
        Ok(extracted)
    }
}

#[async_trait::async_trait]
impl ArchivePort for ZipExtractor {
    async fn extract_all(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, DomainError> {
        info!(path = %archive.display(), "extracting all files");
        let archive = archive.to_path_buf();
        let dest = dest.to_path_buf();
        let files = tokio::task::spawn_blocking(move || Self::extract_blocking(&archive, &dest))
            .await
            .map_err(|e| DomainError::Archive(format!("extract task failed: {}", e)))??;
        info!(files = files.len(), "extraction complete");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut zw = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            zw.start_file(*name, SimpleFileOptions::default()).unwrap();
            zw.write_all(body.as_bytes()).unwrap();
        }
        zw.finish().unwrap();
    }

    #[tokio::test]
    async fn test_extract_all() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("f1db.zip");
        write_zip(
            &archive,
            &[
                ("status.csv", "statusId,status\n1,Finished\n"),
                ("nested/seasons.csv", "year,url\n1950,x\n"),
            ],
        );

        let out = dir.path().join("out");
        let files = ZipExtractor::new().extract_all(&archive, &out).await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(
            std::fs::read_to_string(out.join("status.csv")).unwrap(),
            "statusId,status\n1,Finished\n"
        );
        assert!(out.join("nested").join("seasons.csv").exists());
    }

    #[tokio::test]
    async fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("junk.zip");
        std::fs::write(&archive, "plain text").unwrap();
        let err = ZipExtractor::new()
            .extract_all(&archive, dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Archive(_)));
    }
}
