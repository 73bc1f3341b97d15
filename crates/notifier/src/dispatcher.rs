//! Delivery dispatcher — concurrent fan-out with per-recipient isolation.
//!
//! Every message gets its own task. A failing or hanging send only affects
//! its own recipient; the dispatcher waits for every task before returning.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::task::JoinSet;

use crate::message::OutboundMessage;
use crate::transport::{MailTransport, TransportError};

/// A delivery that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelivery {
    pub recipient: String,
    pub error: String,
}

/// Outcome of delivering one batch of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: Vec<String>,
    pub failed: Vec<FailedDelivery>,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.sent.len() + self.failed.len()
    }
}

/// Sends a batch of messages over a shared transport.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn MailTransport>,
    send_timeout: Duration,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, send_timeout: Duration) -> Self {
        Self {
            transport,
            send_timeout,
        }
    }

    /// Attempt delivery of every message concurrently and wait for all of them.
    ///
    /// Failures are logged per recipient and collected in the report; they
    /// never stop the remaining deliveries.
    pub async fn dispatch(&self, messages: Vec<OutboundMessage>) -> DispatchReport {
        tracing::info!(amount = messages.len(), "Start sending emails");

        let mut tasks = JoinSet::new();
        let mut recipients = HashMap::new();
        for message in messages {
            let transport = Arc::clone(&self.transport);
            let send_timeout = self.send_timeout;
            let recipient = message.recipient.clone();
            let handle = tasks.spawn(async move {
                match tokio::time::timeout(send_timeout, transport.send(&message)).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::TimedOut(send_timeout)),
                }
            });
            recipients.insert(handle.id(), recipient);
        }

        let mut report = DispatchReport::default();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result.map_err(|e| e.to_string())),
                Err(e) => (e.id(), Err(format!("delivery task failed: {}", e))),
            };
            let recipient = recipients.remove(&id).unwrap_or_default();

            match result {
                Ok(()) => {
                    tracing::info!(recipient = %recipient, "Email sent");
                    report.sent.push(recipient);
                }
                Err(error) => {
                    tracing::error!(recipient = %recipient, error = %error, "Failed to send email");
                    report.failed.push(FailedDelivery { recipient, error });
                }
            }
        }

        tracing::info!(
            date = %Local::now().date_naive(),
            sent = report.sent.len(),
            failed = report.failed.len(),
            "All delivery attempts finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockMailTransport;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn message(recipient: &str) -> OutboundMessage {
        OutboundMessage {
            recipient: recipient.to_string(),
            subject: "Colleague birthdays 18-10-2026".to_string(),
            body: "1) a@x".to_string(),
        }
    }

    fn dispatcher(transport: impl MailTransport + 'static) -> Dispatcher {
        Dispatcher::new(Arc::new(transport), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_all_messages_sent() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().times(3).returning(|_| Ok(()));

        let report = dispatcher(transport)
            .dispatch(vec![message("s1"), message("s2"), message("s3")])
            .await;

        let sent: BTreeSet<_> = report.sent.iter().map(String::as_str).collect();
        assert_eq!(sent, BTreeSet::from(["s1", "s2", "s3"]));
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_others() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().times(3).returning(|m| {
            if m.recipient == "s2" {
                Err(TransportError::InvalidAddress("s2".to_string()))
            } else {
                Ok(())
            }
        });

        let report = dispatcher(transport)
            .dispatch(vec![message("s1"), message("s2"), message("s3")])
            .await;

        let sent: BTreeSet<_> = report.sent.iter().map(String::as_str).collect();
        assert_eq!(sent, BTreeSet::from(["s1", "s3"]));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].recipient, "s2");
        assert!(report.failed[0].error.contains("Invalid address"));
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let mut transport = MockMailTransport::new();
        transport.expect_send().never();

        let report = dispatcher(transport).dispatch(Vec::new()).await;
        assert_eq!(report, DispatchReport::default());
    }

    /// Transport whose sends to "slow" never complete.
    struct HangingTransport {
        completed: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl MailTransport for HangingTransport {
        async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
            if message.recipient == "slow" {
                std::future::pending::<()>().await;
            }
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_send_times_out_without_blocking_others() {
        let transport = Arc::new(HangingTransport {
            completed: AtomicUsize::new(0),
        });
        let dispatcher = Dispatcher::new(transport.clone(), Duration::from_secs(30));

        let report = dispatcher
            .dispatch(vec![message("s1"), message("slow"), message("s2")])
            .await;

        assert_eq!(transport.completed.load(Ordering::SeqCst), 2);
        assert_eq!(report.sent.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].recipient, "slow");
        assert!(report.failed[0].error.contains("timed out"));
    }

    /// Transport that panics for one recipient.
    struct PanickingTransport;

    #[async_trait::async_trait]
    impl MailTransport for PanickingTransport {
        async fn send(&self, message: &OutboundMessage) -> Result<(), TransportError> {
            if message.recipient == "boom" {
                panic!("transport bug");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_panicking_send_is_contained() {
        let report = dispatcher(PanickingTransport)
            .dispatch(vec![message("s1"), message("boom")])
            .await;

        assert_eq!(report.sent, vec!["s1".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].recipient, "boom");
        assert!(report.failed[0].error.contains("panicked"));
    }
}
