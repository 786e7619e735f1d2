// src/utils/log.rs

//! Log filter setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Filter directive: `RUST_LOG` when set and non-empty, else the configured level.
pub fn filter_directive(rust_log: Option<String>, level: &str) -> String {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| level.to_string())
}

/// Build the subscriber filter from `RUST_LOG` with `level` as fallback.
pub fn env_filter(level: &str) -> EnvFilter {
    let directive = filter_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok(), level);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level))
}
