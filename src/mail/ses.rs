//! Amazon SES v2 mailer.

use async_trait::async_trait;
use aws_sdk_sesv2::Client;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use tracing::info;

use crate::error::NotifyError;
use crate::mail::{Mailer, NotifyReceipt, OutgoingEmail};

const CHARSET: &str = "UTF-8";

/// Sends plain-text email through SES `SendEmail`.
pub struct SesMailer {
    client: Client,
}

impl SesMailer {
    /// Create a mailer around an existing SES client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a mailer from the default AWS credential chain, pinned to `region`.
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&config))
    }
}

fn content(data: &str) -> Result<Content, NotifyError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| NotifyError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<NotifyReceipt, NotifyError> {
        let message = Message::builder()
            .subject(content(&email.subject)?)
            .body(Body::builder().text(content(&email.body)?).build())
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| NotifyError::send(e.into_service_error()))?;

        let message_id = output.message_id().unwrap_or_default().to_string();
        info!("SES accepted message {} for {}", message_id, email.to);
        Ok(NotifyReceipt { message_id })
    }
}
