use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::error::FinderError;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FinderError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeFinderBot/1.0)")
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page body, treating non-2xx answers as errors
    pub async fn fetch(&self, url: &str) -> Result<String, FinderError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}
