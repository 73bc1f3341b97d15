use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::message::OutboundMessage;

use super::{MailTransport, TransportError};

/// Delivery through the Resend HTTP API (`POST /emails`).
pub struct ResendTransport {
    http_client: Client,
    base_url: String,
    from: String,
    api_key: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

impl ResendTransport {
    pub fn new(
        base_url: String,
        from: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            from,
            api_key,
        })
    }
}

#[async_trait]
impl MailTransport for ResendTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));
        let body = SendEmailRequest {
            from: &self.from,
            to: [message.recipient.as_str()],
            subject: &message.subject,
            text: &message.body,
        };

        self.http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
