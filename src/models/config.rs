//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ReferenceLocation;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where the daily report is fetched from
    #[serde(default)]
    pub source: SourceConfig,

    /// Point the nearest station is measured against
    #[serde(default)]
    pub reference: ReferenceLocation,

    /// Notification email settings
    #[serde(default)]
    pub mail: MailConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.source.url).map_err(|e| {
            AppError::validation(format!("source.url '{}' is invalid: {e}", self.source.url))
        })?;
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if !(-90.0..=90.0).contains(&self.reference.lat) {
            return Err(AppError::validation(format!(
                "reference.lat {} is outside [-90, 90]",
                self.reference.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.reference.lng) {
            return Err(AppError::validation(format!(
                "reference.lng {} is outside [-180, 180]",
                self.reference.lng
            )));
        }
        validate_address("mail.recipient", &self.mail.recipient)?;
        validate_address("mail.sender", &self.mail.sender)?;
        if self.mail.region.trim().is_empty() {
            return Err(AppError::validation("mail.region is empty"));
        }
        Ok(())
    }
}

fn validate_address(field: &str, address: &str) -> Result<()> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::validation(format!("{field} is empty")));
    }
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::validation(format!(
            "{field} '{address}' is not an email address"
        ))),
    }
}

/// Report source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// URL of the page carrying the report in a `<pre>` block
    #[serde(default = "defaults::source_url")]
    pub url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::source_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Notification email settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MailConfig {
    /// The single recipient of every notification
    #[serde(default = "defaults::recipient")]
    pub recipient: String,

    /// Verified sender address
    #[serde(default = "defaults::sender")]
    pub sender: String,

    /// AWS region of the SES endpoint
    #[serde(default = "defaults::region")]
    pub region: String,

    /// Keep emails in an in-memory outbox instead of sending them
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            recipient: defaults::recipient(),
            sender: defaults::sender(),
            region: defaults::region(),
            dry_run: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn source_url() -> String {
        "https://www.weather.gov/marfc/DailyPrecipData".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; precip-mailer/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Mail defaults
    pub fn recipient() -> String {
        "precip-alerts@example.com".into()
    }
    pub fn sender() -> String {
        "precip-alerts@example.com".into()
    }
    pub fn region() -> String {
        "us-east-1".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
