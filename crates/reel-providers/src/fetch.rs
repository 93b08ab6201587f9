//! Footage download with bounded retry.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::error::{ProviderError, ProviderResult};

/// Downloads a footage URL to a local file. The destination is expected to
/// be ledger-registered by the caller before the fetch, so a partial file
/// from a failed attempt is still cleaned up with the job.
#[async_trait]
pub trait FootageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> ProviderResult<()>;
}

/// `FootageFetcher` backed by reqwest, with bounded exponential backoff for
/// transient network errors.
pub struct HttpFetcher {
    http: Client,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpFetcher {
    pub fn new() -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            http,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    async fn fetch_once(&self, url: &str, dest: &Path) -> ProviderResult<()> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::download_failed(format!(
                "Footage server returned {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response;
        while let Some(chunk) = stream.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        let size = tokio::fs::metadata(dest).await?.len();
        if size == 0 {
            return Err(ProviderError::download_failed("Downloaded file is empty"));
        }

        info!(
            dest = %dest.display(),
            size_mb = size as f64 / (1024.0 * 1024.0),
            "Downloaded footage"
        );
        Ok(())
    }
}

#[async_trait]
impl FootageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> ProviderResult<()> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once(url, dest).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.base_delay.saturating_mul(2u32.pow(attempt));
                    warn!(
                        url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Footage download failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
