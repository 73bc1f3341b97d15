//! Notification run orchestrator.
//!
//! One run: query celebrants for the day → aggregate → dispatch → log a
//! summary. Runs keep no state between invocations and never return an
//! error; every outcome ends up in the log.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::aggregator::aggregate;
use crate::dispatcher::{DispatchReport, Dispatcher};
use crate::store::CelebrantSource;

/// How a single run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The celebrant query failed; nothing was sent.
    QueryFailed(String),
    /// Nobody has a birthday today.
    NoCelebrants,
    /// Messages were built and every delivery attempt finished.
    Completed(DispatchReport),
}

/// Runs the birthday notification pipeline.
#[derive(Clone)]
pub struct Notifier {
    source: Arc<dyn CelebrantSource>,
    dispatcher: Dispatcher,
}

impl Notifier {
    pub fn new(source: Arc<dyn CelebrantSource>, dispatcher: Dispatcher) -> Self {
        Self { source, dispatcher }
    }

    /// Run the pipeline for the current local date.
    pub async fn run_today(&self) -> RunOutcome {
        self.run_once(Local::now().date_naive()).await
    }

    /// Run the pipeline for `today`.
    pub async fn run_once(&self, today: NaiveDate) -> RunOutcome {
        let celebrants = match self.source.find_celebrants(today.day(), today.month()).await {
            Ok(celebrants) => celebrants,
            Err(e) => {
                tracing::error!(date = %today, error = %e, "Failed to get birthday people");
                return RunOutcome::QueryFailed(e.to_string());
            }
        };

        if celebrants.is_empty() {
            tracing::info!(date = %today, "No celebrants today");
            return RunOutcome::NoCelebrants;
        }

        let messages = aggregate(&celebrants, today);
        tracing::info!(
            celebrants = celebrants.len(),
            amount = messages.len(),
            "Email texts generated"
        );

        let report = self.dispatcher.dispatch(messages).await;

        let failed: Vec<&str> = report
            .failed
            .iter()
            .map(|f| f.recipient.as_str())
            .collect();
        tracing::info!(
            date = %today,
            attempted = report.attempted(),
            sent = report.sent.len(),
            failed = failed.len(),
            failed_recipients = ?failed,
            "Notification run finished"
        );

        RunOutcome::Completed(report)
    }
}
