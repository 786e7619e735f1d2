//! Outbound email abstractions.
//!
//! The notifier only knows the `Mailer` trait. Two backends exist:
//! - `SesMailer`: Amazon SES v2 `SendEmail` (feature `ses`)
//! - `Outbox`: keeps messages in memory, for dry runs and tests

pub mod outbox;
#[cfg(feature = "ses")]
pub mod ses;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NotifyError;
use crate::models::MailConfig;

// Re-export for convenience
pub use outbox::Outbox;
#[cfg(feature = "ses")]
pub use ses::SesMailer;

/// A plain-text email ready for dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// Provider-assigned identifier of a dispatched email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyReceipt {
    pub message_id: String,
}

/// Trait for email delivery backends.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one email; no retries.
    async fn send(&self, email: &OutgoingEmail) -> Result<NotifyReceipt, NotifyError>;
}

/// Build the mailer selected by the mail settings.
pub async fn from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    if config.dry_run {
        info!("Mail dry run enabled; emails stay in the outbox");
        return Arc::new(Outbox::new());
    }

    #[cfg(feature = "ses")]
    let mailer: Arc<dyn Mailer> = Arc::new(SesMailer::from_region(&config.region).await);

    #[cfg(not(feature = "ses"))]
    let mailer: Arc<dyn Mailer> = {
        tracing::warn!("Built without the 'ses' feature; emails stay in the outbox");
        Arc::new(Outbox::new())
    };

    mailer
}
