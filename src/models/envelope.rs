//! Outcome of one pipeline run.

use std::fmt;

use serde::Serialize;

use crate::models::{ReportDate, StationRecord};

/// Pipeline stage that can fail before notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scrape,
    DateExtraction,
    Parse,
    Resolve,
}

impl Stage {
    /// Short human description used in failure messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Stage::Scrape => "scraping failed",
            Stage::DateExtraction => "extracting date failed",
            Stage::Parse => "converting scraped data to a table failed",
            Stage::Resolve => "finding the closest observation station failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scrape => "scrape",
            Stage::DateExtraction => "date_extraction",
            Stage::Parse => "parse",
            Stage::Resolve => "resolve",
        };
        f.write_str(name)
    }
}

/// The single success-or-failure result handed to the notifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResultEnvelope {
    Success {
        date: ReportDate,
        station: StationRecord,
        distance_km: f64,
    },
    Failure {
        stage: Stage,
        message: String,
    },
}

impl ResultEnvelope {
    /// Record a failure at `stage`, prefixing the cause with the stage description.
    pub fn failure(stage: Stage, cause: impl fmt::Display) -> Self {
        Self::Failure {
            stage,
            message: format!("{}: {}", stage.describe(), cause),
        }
    }

    /// Stage that failed, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { stage, .. } => Some(*stage),
        }
    }
}
