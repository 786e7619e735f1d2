//! Precipitation mailer, local one-shot runner.
//!
//! Takes no arguments; settings come from `PRECIP_CONFIG_PATH` and the
//! environment (see `precip_mailer::config`). Set `MAIL_DRY_RUN=true` to
//! print the email instead of sending it.

use tracing::info;

use precip_mailer::{config, error::Result, mail, pipeline::Pipeline, utils::log};

/// Initialize logging, preferring `RUST_LOG` over the configured level.
fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(log::env_filter(level))
        .init();
}

/// Main entry point for the local runner.
#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_from_env()?;
    init_logging(&config.logging.level);

    info!("Precipitation mailer starting...");
    info!(
        "Source {} | reference ({}, {}) | recipient {}",
        config.source.url, config.reference.lat, config.reference.lng, config.mail.recipient
    );

    let mailer = mail::from_config(&config.mail).await;
    let receipt = Pipeline::new(config, mailer)?.run().await?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    info!("Done!");

    Ok(())
}
