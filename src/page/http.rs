//! HTTP navigator using wreq for TLS fingerprint emulation.
//!
//! Fetched pages are served as [`StaticPage`]s: server-rendered markup is
//! fully available, but option clicks cannot trigger client-side re-renders.

use super::{Navigator, Page, StaticPage};
use crate::config::Config;
use crate::error::ScrapeError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Opens product pages over plain HTTP with browser impersonation.
pub struct HttpNavigator {
    client: Client,
    timeout: Duration,
}

impl HttpNavigator {
    /// Creates a navigator honouring the configured proxy and page timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config.page_timeout();
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            if status.as_u16() == 403 || status.as_u16() == 429 {
                warn!("{} answered {}. Consider using a proxy or increasing delay.", url, status);
            }
            return Err(ScrapeError::UnexpectedStatus { status: status.as_u16(), url: url.to_string() });
        }

        response.text().await.map_err(|e| self.request_error(url, e))
    }

    fn request_error(&self, url: &str, err: wreq::Error) -> ScrapeError {
        if err.is_timeout() {
            ScrapeError::Timeout { elapsed_ms: self.timeout.as_millis() as u64 }
        } else {
            ScrapeError::Navigation { url: url.to_string(), reason: err.to_string() }
        }
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn open(&self, url: &str) -> Result<Box<dyn Page>, ScrapeError> {
        let body = self.fetch(url).await?;
        Ok(Box::new(StaticPage::new(body)))
    }
}
