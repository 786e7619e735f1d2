// src/pipeline/pipeline.rs

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::mail::{Mailer, NotifyReceipt};
use crate::models::{Config, ResultEnvelope, Stage};
use crate::services::{Notifier, ReportFetcher, ReportParser, resolve};

/// One-shot precipitation report pipeline.
///
/// The first failing data stage ends data processing, but the notifier
/// always runs exactly once per `run`.
pub struct Pipeline {
    config: Config,
    fetcher: ReportFetcher,
    parser: ReportParser,
    notifier: Notifier,
}

impl Pipeline {
    /// Build a pipeline from validated configuration and a mail backend.
    pub fn new(config: Config, mailer: Arc<dyn Mailer>) -> Result<Self> {
        config.validate()?;

        let fetcher = ReportFetcher::new(&config.source)?;
        let parser = ReportParser::new()
            .map_err(|e| AppError::config(format!("invalid report pattern: {e}")))?;
        let notifier = Notifier::new(mailer, &config.mail);

        Ok(Self {
            config,
            fetcher,
            parser,
            notifier,
        })
    }

    /// Run every stage and send the outcome; only a failed send is an error.
    pub async fn run(&self) -> Result<NotifyReceipt> {
        let envelope = self.collect().await;
        Ok(self.notifier.notify(&envelope).await?)
    }

    /// Run the data stages and fold the outcome into a single envelope.
    pub async fn collect(&self) -> ResultEnvelope {
        let url = &self.config.source.url;

        let text = match self.fetcher.fetch(url).await {
            Ok(text) => text,
            Err(e) => return failed(Stage::Scrape, e),
        };
        info!("Scraping succeeded: {} characters from {}", text.len(), url);

        let date = match self.parser.extract_date(&text) {
            Ok(date) => date,
            Err(e) => return failed(Stage::DateExtraction, e),
        };
        info!("Report date: {}", date);

        let stations = match self.parser.parse_table(&text) {
            Ok(stations) => stations,
            Err(e) => return failed(Stage::Parse, e),
        };
        info!("Parsed {} stations", stations.len());

        let (station, distance_km) = match resolve(self.config.reference, &stations) {
            Ok((station, distance_km)) => (station.clone(), distance_km),
            Err(e) => return failed(Stage::Resolve, e),
        };
        info!(
            "Nearest station: {} ({}) at {:.2} km",
            station.station_id, station.location, distance_km
        );

        ResultEnvelope::Success {
            date,
            station,
            distance_km,
        }
    }
}

fn failed(stage: Stage, cause: impl std::fmt::Display) -> ResultEnvelope {
    warn!("Stage {} failed: {}", stage, cause);
    ResultEnvelope::failure(stage, cause)
}
