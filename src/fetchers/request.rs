use crate::config::SourceConfig;
use crate::error::ScrapeError;
use crate::extractors::Page;
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking HTTP client used for every page of a run
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, ScrapeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, ScrapeError> {
        Self::new(Some(Duration::from_secs(config.timeout)), &config.user_agent)
    }

    /// Fetches the raw markup of `url`
    pub fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let html = response.text()?;
        debug!("Fetched {} ({} bytes)", url, html.len());
        Ok(html)
    }

    /// Fetches `url` and parses it into a [`Page`]
    pub fn fetch_page(&self, url: &str) -> Result<Page, ScrapeError> {
        let html = self.fetch(url)?;
        Ok(Page::parse(url, &html))
    }
}
