// src/config.rs

//! Configuration loading utilities.
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! TOML file named by `PRECIP_CONFIG_PATH`, then individual environment
//! variables.
//!
//! ## Environment Variables
//!
//! - `PRECIP_CONFIG_PATH`: TOML file with any subset of the settings
//! - `SOURCE_URL`: Report page URL
//! - `HTTP_TIMEOUT_SECS`: HTTP request timeout
//! - `REFERENCE_LAT` / `REFERENCE_LNG`: Reference location in decimal degrees
//! - `MAIL_RECIPIENT` / `MAIL_SENDER`: Email addresses
//! - `SES_REGION`: AWS region for SES
//! - `MAIL_DRY_RUN`: `true` keeps emails in memory instead of sending
//! - `LOG_LEVEL`: Default log filter when `RUST_LOG` is unset

use std::str::FromStr;

use tracing::info;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Variable naming the optional TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "PRECIP_CONFIG_PATH";

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<Config> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` to read variables.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = match lookup(CONFIG_PATH_VAR) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &lookup)?;
    config.validate()?;
    Ok(config)
}

/// Override individual settings from variables that are set.
pub fn apply_overrides(
    config: &mut Config,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(url) = lookup("SOURCE_URL") {
        config.source.url = url;
    }
    if let Some(secs) = parsed(lookup, "HTTP_TIMEOUT_SECS")? {
        config.source.timeout_secs = secs;
    }
    if let Some(lat) = parsed(lookup, "REFERENCE_LAT")? {
        config.reference.lat = lat;
    }
    if let Some(lng) = parsed(lookup, "REFERENCE_LNG")? {
        config.reference.lng = lng;
    }
    if let Some(recipient) = lookup("MAIL_RECIPIENT") {
        config.mail.recipient = recipient;
    }
    if let Some(sender) = lookup("MAIL_SENDER") {
        config.mail.sender = sender;
    }
    if let Some(region) = lookup("SES_REGION") {
        config.mail.region = region;
    }
    if let Some(dry_run) = parsed(lookup, "MAIL_DRY_RUN")? {
        config.mail.dry_run = dry_run;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.logging.level = level;
    }
    Ok(())
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::config(format!("{key}='{raw}' is invalid: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::ReferenceLocation;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_environment_overrides() {
        let config = load_with(lookup_from(&[
            ("SOURCE_URL", "http://127.0.0.1:8080/precip"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("REFERENCE_LAT", "40.0"),
            ("REFERENCE_LNG", "-75.5"),
            ("MAIL_RECIPIENT", "reader@example.com"),
            ("MAIL_DRY_RUN", "true"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.source.url, "http://127.0.0.1:8080/precip");
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.reference, ReferenceLocation::new(40.0, -75.5));
        assert_eq!(config.mail.recipient, "reader@example.com");
        assert!(config.mail.dry_run);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparsable_override_is_an_error() {
        let result = load_with(lookup_from(&[("REFERENCE_LAT", "north")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let result = load_with(lookup_from(&[("MAIL_SENDER", "nobody")]));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [source]
            timeout_secs = 12

            [mail]
            recipient = "file@example.com"
            sender = "file@example.com"
            region = "us-west-2"
            "#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = load_with(lookup_from(&[
            (CONFIG_PATH_VAR, path.as_str()),
            ("MAIL_RECIPIENT", "env@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.source.timeout_secs, 12);
        assert_eq!(config.mail.region, "us-west-2");
        assert_eq!(config.mail.sender, "file@example.com");
        assert_eq!(config.mail.recipient, "env@example.com");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_with(lookup_from(&[(CONFIG_PATH_VAR, "/nonexistent/precip.toml")]));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
