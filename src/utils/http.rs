// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::FetchError;
use crate::models::SourceConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &SourceConfig) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
