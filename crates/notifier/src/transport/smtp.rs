use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::message::OutboundMessage;

use super::{MailTransport, TransportError};

/// Port on which the relay expects implicit TLS instead of STARTTLS.
const SMTPS_PORT: u16 = 465;

/// SMTP relay authenticated with PLAIN/LOGIN credentials.
///
/// Messages go out as the raw payload from [`OutboundMessage::to_wire`].
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Address,
}

impl SmtpTransport {
    pub fn new(
        host: &str,
        port: u16,
        from: &str,
        password: String,
    ) -> Result<Self, TransportError> {
        let from: Address = from
            .parse()
            .map_err(|e| TransportError::InvalidAddress(format!("{}: {}", from, e)))?;

        let builder = if port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };

        let mailer = builder
            .port(port)
            .credentials(Credentials::new(from.to_string(), password))
            .build();

        Ok(Self { mailer, from })
    }

    fn envelope_for(&self, recipient: &str) -> Result<Envelope, TransportError> {
        let to: Address = recipient
            .parse()
            .map_err(|e| TransportError::InvalidAddress(format!("{}: {}", recipient, e)))?;
        Envelope::new(Some(self.from.clone()), vec![to])
            .map_err(|e| TransportError::InvalidAddress(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
        let envelope = self.envelope_for(&message.recipient)?;
        self.mailer
            .send_raw(&envelope, message.to_wire().as_bytes())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_sender_rejected() {
        let result = SmtpTransport::new("smtp.example.com", 587, "not an address", "pw".into());
        assert!(matches!(result, Err(TransportError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_envelope_rejects_bad_recipient() {
        let transport =
            SmtpTransport::new("smtp.example.com", 587, "noreply@example.com", "pw".into())
                .unwrap();
        assert!(transport.envelope_for("s1@example.com").is_ok());
        assert!(matches!(
            transport.envelope_for("nope"),
            Err(TransportError::InvalidAddress(_))
        ));
    }
}
