//! Mail transports used by the dispatcher.
//!
//! Two backends are available: plain SMTP (the raw wire payload of
//! [`OutboundMessage::to_wire`]) and the Resend HTTP API. The config decides
//! which one a process uses.

mod resend;
mod smtp;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use birthday_common::config::AppConfig;

use crate::message::OutboundMessage;

pub use resend::ResendTransport;
pub use smtp::SmtpTransport;

/// Why a single delivery attempt failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Delivery timed out after {0:?}")]
    TimedOut(Duration),
}

/// Something that can deliver one message to one recipient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}

/// Build the transport selected by `config`.
///
/// Resend wins when an API key is configured; otherwise SMTP host and
/// password must both be present.
pub fn build_transport(config: &AppConfig) -> anyhow::Result<Arc<dyn MailTransport>> {
    if let Some(api_key) = &config.resend_api_key {
        tracing::info!(base_url = %config.resend_base_url, "Using Resend mail transport");
        let transport = ResendTransport::new(
            config.resend_base_url.clone(),
            config.email_from.clone(),
            api_key.clone(),
            Duration::from_secs(config.notifier_send_timeout_secs),
        )?;
        return Ok(Arc::new(transport));
    }

    let host = config.smtp_host.as_deref().ok_or_else(|| {
        anyhow::anyhow!("SMTP_HOST is required when RESEND_API_KEY is not set")
    })?;
    let password = config.smtp_password.clone().ok_or_else(|| {
        anyhow::anyhow!("SMTP_PASSWORD is required when RESEND_API_KEY is not set")
    })?;

    tracing::info!(host, port = config.smtp_port, "Using SMTP mail transport");
    let transport = SmtpTransport::new(host, config.smtp_port, &config.email_from, password)?;
    Ok(Arc::new(transport))
}
