// src/error.rs

//! Error types for the precipitation mailer.
//!
//! Each pipeline stage has its own error enum so the pipeline can tag a
//! failure with the stage that produced it. `AppError` covers everything
//! outside the data stages (configuration, client setup, email dispatch).

use std::fmt;

use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetching the report page failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The page has no `<pre>` block to read the report from
    #[error("no preformatted text block found in page")]
    MissingBlock,

    /// CSS selector parsing failed
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

impl FetchError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }
}

/// Turning the report text into a date and station table failed.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    /// No `YYYY-MM-DD` shaped substring anywhere in the text
    #[error("no YYYY-MM-DD date found in report text")]
    NoDate,

    /// The first date-shaped substring is not a calendar date
    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),

    /// No line looks like a six-field data row
    #[error("no data lines found in report text")]
    NoDataLines,

    /// A data row could not be decoded into a station record
    #[error("line {line}: {message}")]
    Row { line: usize, message: String },
}

impl ParseError {
    /// Create a row decoding error for a 1-based source line.
    pub fn row(line: usize, message: impl fmt::Display) -> Self {
        Self::Row {
            line,
            message: message.to_string(),
        }
    }
}

/// Selecting the nearest station failed.
#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    #[error("no stations available to compare")]
    NoStations,
}

/// Dispatching the notification email failed.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The email could not be assembled for the provider
    #[error("failed to build email: {0}")]
    Build(String),

    /// The provider rejected the send call or could not be reached
    #[error("failed to send email: {0}")]
    Send(String),
}

impl NotifyError {
    /// Create a send error from any provider error.
    pub fn send(err: impl fmt::Display) -> Self {
        Self::Send(err.to_string())
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP client could not be set up
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Email dispatch failed
    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_message() {
        let err = ParseError::row(4, "invalid float literal");
        assert_eq!(err.to_string(), "line 4: invalid float literal");
    }

    #[test]
    fn test_notify_error_wraps_into_app_error() {
        let err: AppError = NotifyError::send("throttled").into();
        assert_eq!(err.to_string(), "Notify error: failed to send email: throttled");
    }
}
