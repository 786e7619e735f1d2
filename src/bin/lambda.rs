//! AWS Lambda entry point for the precipitation mailer.
//!
//! Deploy with `cargo lambda build --release --features lambda`
//! and attach a daily schedule rule as the trigger.

use lambda_runtime::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use precip_mailer::lambda::handler;
use precip_mailer::models::LoggingConfig;
use precip_mailer::{config, utils::log};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    // Configuration errors surface again from the handler on each invocation
    let level = config::load_from_env()
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| LoggingConfig::default().level);

    tracing_subscriber::registry()
        .with(log::env_filter(&level))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Precipitation mailer Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}
