//! HTTP implementation of the status fetcher

use super::{SearchStatus, StatusFetcher};
use anyhow::Result;
use async_trait::async_trait;

/// Fetches search status from the backend REST API
pub struct HttpStatusFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStatusFetcher {
    /// Create a fetcher rooted at the API base URL (e.g. `http://host/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn status_url(&self, search_id: &str) -> String {
        format!("{}/search/{}/status", self.base_url, search_id)
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch_status(&self, search_id: &str) -> Result<SearchStatus> {
        let response = self
            .client
            .get(self.status_url(search_id))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_url_shape() {
        let fetcher = HttpStatusFetcher::new("http://localhost:5000/api/");
        assert_eq!(
            fetcher.status_url("abc-123"),
            "http://localhost:5000/api/search/abc-123/status"
        );
    }
}
