//! Implements HttpPort with reqwest.

use crate::domain::DomainError;
use crate::ports::HttpPort;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// HTTP client adapter. One pooled reqwest client for the whole run.
pub struct ReqwestHttp {
    client: Client,
}

impl ReqwestHttp {
    /// Create a new HTTP adapter.
    ///
    /// # Arguments
    /// * `user_agent` - Sent with every request (wiki pages reject empty agents)
    /// * `timeout` - Whole-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Http(format!("client build failed: {}", e)))?;
        Ok(Self { client })
    }

    async fn get_ok(&self, url: &str) -> Result<reqwest::Response, DomainError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Http(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            return Err(DomainError::Http(format!("GET {} returned {}", url, status)));
        }
        Ok(res)
    }
}

#[async_trait::async_trait]
impl HttpPort for ReqwestHttp {
    async fn get_text(&self, url: &str) -> Result<String, DomainError> {
        debug!(url, "fetching page");
        let res = self.get_ok(url).await?;
        res.text()
            .await
            .map_err(|e| DomainError::Http(format!("read body of {}: {}", url, e)))
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DomainError> {
        info!(url, "downloading file");
        let mut res = self.get_ok(url).await?;
        let mut f = fs::File::create(dest)
            .await
            .map_err(|e| DomainError::Io(format!("create {}: {}", dest.display(), e)))?;
        let mut written = 0u64;
        while let Some(chunk) = res
            .chunk()
            .await
            .map_err(|e| DomainError::Http(format!("read body of {}: {}", url, e)))?
        {
            f.write_all(&chunk)
                .await
                .map_err(|e| DomainError::Io(format!("write {}: {}", dest.display(), e)))?;
            written += chunk.len() as u64;
        }
        f.flush()
            .await
            .map_err(|e| DomainError::Io(e.to_string()))?;
        info!(path = %dest.display(), bytes = written, "download complete");
        Ok(written)
    }
}
