// src/services/notifier.rs

//! Turns a run's envelope into an email and dispatches it.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::NotifyError;
use crate::mail::{Mailer, NotifyReceipt, OutgoingEmail};
use crate::models::{MailConfig, ResultEnvelope};

/// Subject line used for every failure report.
pub const FAILURE_SUBJECT: &str = "Precipitation data lambda function FAILURE";

/// Sends the run outcome to the configured recipient.
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    recipient: String,
    sender: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, config: &MailConfig) -> Self {
        Self {
            mailer,
            recipient: config.recipient.trim().to_string(),
            sender: config.sender.trim().to_string(),
        }
    }

    /// Build the email for an envelope without sending it.
    pub fn compose(&self, envelope: &ResultEnvelope) -> OutgoingEmail {
        let (subject, body) = format_message(envelope);
        OutgoingEmail {
            to: self.recipient.clone(),
            from: self.sender.clone(),
            subject,
            body,
        }
    }

    /// Send exactly one email describing `envelope`.
    pub async fn notify(&self, envelope: &ResultEnvelope) -> Result<NotifyReceipt, NotifyError> {
        let email = self.compose(envelope);
        match self.mailer.send(&email).await {
            Ok(receipt) => {
                info!(
                    "Sent '{}' to {} (message {})",
                    email.subject, email.to, receipt.message_id
                );
                Ok(receipt)
            }
            Err(e) => {
                error!("Sending '{}' to {} failed: {}", email.subject, email.to, e);
                Err(e)
            }
        }
    }
}

/// Subject and body text for an envelope.
pub fn format_message(envelope: &ResultEnvelope) -> (String, String) {
    match envelope {
        ResultEnvelope::Success {
            date,
            station,
            distance_km,
        } => (
            format!("Precipitation data for {date}"),
            format!(
                "The precipitation for {date} at {} ({}, {distance_km:.2} km away) was {:.2} inches.",
                station.location.trim(),
                station.station_id.trim(),
                station.precip_inches
            ),
        ),
        ResultEnvelope::Failure { message, .. } => (
            FAILURE_SUBJECT.to_string(),
            format!("Scraping precipitation data failed because: {message}."),
        ),
    }
}
