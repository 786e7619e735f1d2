// src/models/mod.rs

//! Domain models for the precipitation mailer.

mod config;
mod envelope;
mod station;

// Re-export all public types
pub use config::{Config, LoggingConfig, MailConfig, SourceConfig};
pub use envelope::{ResultEnvelope, Stage};
pub use station::{ReferenceLocation, ReportDate, StationRecord};
