// src/services/fetcher.rs

//! Report fetcher.
//!
//! Downloads the report page with a single GET and pulls the report text out
//! of its `<pre>` block.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::SourceConfig;
use crate::utils::http::create_async_client;

const REPORT_SELECTOR: &str = "pre";

/// Service for fetching the raw report text.
pub struct ReportFetcher {
    client: Client,
}

impl ReportFetcher {
    /// Create a fetcher with a client built from the source settings.
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }

    /// Fetch `url` and return the text of its preformatted block verbatim.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        extract_preformatted(&body)
    }
}

/// Extract the text content of the first `<pre>` element in an HTML document.
pub fn extract_preformatted(html: &str) -> Result<String, FetchError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(REPORT_SELECTOR)
        .map_err(|e| FetchError::selector(REPORT_SELECTOR, e))?;

    let mut blocks = document.select(&selector);
    let first = blocks.next().ok_or(FetchError::MissingBlock)?;

    let extra = blocks.count();
    if extra > 0 {
        warn!("Page has {} extra <pre> blocks; using the first", extra);
    }

    Ok(first.text().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_preformatted_returns_text() {
        let html = "<html><body><h1>Daily</h1><pre>line one\nABE , PA , x , 1 , 2 , 0.00</pre></body></html>";
        let text = extract_preformatted(html).unwrap();
        assert_eq!(text, "line one\nABE , PA , x , 1 , 2 , 0.00");
    }

    #[test]
    fn test_extract_preformatted_joins_nested_markup() {
        let html = "<pre><b>24hr Accumulated</b> Precipitation</pre>";
        assert_eq!(
            extract_preformatted(html).unwrap(),
            "24hr Accumulated Precipitation"
        );
    }

    #[test]
    fn test_extract_preformatted_uses_first_block() {
        let html = "<pre>first</pre><pre>second</pre>";
        assert_eq!(extract_preformatted(html).unwrap(), "first");
    }

    #[test]
    fn test_extract_preformatted_missing_block() {
        let html = "<html><body><p>Service unavailable</p></body></html>";
        assert!(matches!(
            extract_preformatted(html),
            Err(FetchError::MissingBlock)
        ));
    }
}
