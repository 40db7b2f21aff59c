//! HTTP image fetcher

use farm_dashboard_common::{Error, ImageFetcher, Result};
use std::future::Future;

/// Fetches image bytes with a shared reqwest client; non-2xx is a failure
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let request = self.client.get(url);
        async move {
            let response = request
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| Error::Fetch(e.to_string()))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::Fetch(e.to_string()))?;
            Ok(bytes.to_vec())
        }
    }
}
