//! In-memory mailer.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::error::NotifyError;
use crate::mail::{Mailer, NotifyReceipt, OutgoingEmail};

/// Mailer that records emails instead of sending them.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Mutex<Vec<OutgoingEmail>>,
    reject_with: Option<String>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outbox whose every send fails with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::default(),
            reject_with: Some(reason.into()),
        }
    }

    /// Emails accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl Mailer for Outbox {
    async fn send(&self, email: &OutgoingEmail) -> Result<NotifyReceipt, NotifyError> {
        if let Some(reason) = &self.reject_with {
            return Err(NotifyError::send(reason));
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| NotifyError::send("outbox lock poisoned"))?;
        sent.push(email.clone());
        let message_id = format!("outbox-{}", sent.len());

        info!(
            "Outbox {}: to={} subject={:?}\n{}",
            message_id, email.to, email.subject, email.body
        );
        Ok(NotifyReceipt { message_id })
    }
}
