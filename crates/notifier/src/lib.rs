//! Birthday notification pipeline.
//!
//! A run queries today's celebrants, folds them into one message per
//! subscriber and delivers those messages concurrently:
//!
//! ```text
//! CelebrantSource ──▶ aggregator ──▶ Dispatcher ──▶ MailTransport (× N tasks)
//! ```
//!
//! [`run::Notifier`] sequences the steps, [`scheduler`] triggers it at
//! startup and at every local midnight.

pub mod aggregator;
pub mod dispatcher;
pub mod message;
pub mod run;
pub mod scheduler;
pub mod store;
pub mod transport;
