// src/lambda/mod.rs

//! AWS Lambda handler for the precipitation mailer.
//!
//! Each invocation:
//! 1. Loads configuration from the environment
//! 2. Fetches and parses the daily report
//! 3. Finds the station nearest the reference location
//! 4. Emails the reading (or the failure reason)
//!
//! The event payload is ignored; any scheduled trigger works.

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config;
use crate::error::Result;
use crate::mail::{self, NotifyReceipt};
use crate::pipeline::Pipeline;

/// Main Lambda handler function.
///
/// Data stage failures are reported by email and still return a receipt;
/// only configuration or email dispatch failures fail the invocation.
#[instrument(skip(event), fields(request_id = %event.context.request_id))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<NotifyReceipt, LambdaError> {
    let start = std::time::Instant::now();

    match run_once().await {
        Ok(receipt) => {
            info!(
                "Notification {} sent in {}ms",
                receipt.message_id,
                start.elapsed().as_millis()
            );
            Ok(receipt)
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Internal pipeline logic for the Lambda environment.
async fn run_once() -> Result<NotifyReceipt> {
    let config = config::load_from_env()?;
    let mailer = mail::from_config(&config.mail).await;
    Pipeline::new(config, mailer)?.run().await
}
