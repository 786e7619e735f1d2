//! Service layer for the precipitation mailer.
//!
//! One module per pipeline stage:
//! - Report fetching (`ReportFetcher`)
//! - Date and table parsing (`ReportParser`)
//! - Nearest station lookup (`resolve`)
//! - Email notification (`Notifier`)

pub mod fetcher;
pub mod notifier;
pub mod parser;
pub mod resolver;

pub use fetcher::ReportFetcher;
pub use notifier::Notifier;
pub use parser::ReportParser;
pub use resolver::{haversine_km, resolve};
