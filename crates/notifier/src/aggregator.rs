//! Message aggregation: today's celebrants → one message per subscriber.
//!
//! A subscriber following three celebrants gets a single notice listing all
//! three. Recipients are emitted in the order their address is first seen
//! while scanning celebrants; each body lists celebrants in input order.

use std::collections::HashSet;

use chrono::NaiveDate;

use birthday_common::types::Celebrant;

use crate::message::OutboundMessage;

const CLOSING_LINE: &str = "Don't forget to congratulate your colleagues!";

/// Build the deduplicated set of outbound messages for `today`.
pub fn aggregate(celebrants: &[Celebrant], today: NaiveDate) -> Vec<OutboundMessage> {
    let celebrants = distinct_celebrants(celebrants);

    let mut seen = HashSet::new();
    let mut recipients = Vec::new();
    for celebrant in &celebrants {
        for subscriber in &celebrant.subscribers {
            if seen.insert(subscriber.as_str()) {
                recipients.push(subscriber.as_str());
            }
        }
    }

    recipients
        .into_iter()
        .map(|recipient| {
            let followed: Vec<&Celebrant> = celebrants
                .iter()
                .copied()
                .filter(|c| c.subscribers.iter().any(|s| s == recipient))
                .collect();
            build_message(recipient, &followed, today)
        })
        .collect()
}

/// Drop repeated rows for the same celebrant, keeping the first.
fn distinct_celebrants(celebrants: &[Celebrant]) -> Vec<&Celebrant> {
    let mut ids = HashSet::new();
    celebrants.iter().filter(|c| ids.insert(c.id)).collect()
}

fn build_message(recipient: &str, celebrants: &[&Celebrant], today: NaiveDate) -> OutboundMessage {
    let mut body = format!(
        "Today, {}, birthdays are celebrated by:\n",
        today.format("%d-%m")
    );
    for (i, celebrant) in celebrants.iter().enumerate() {
        body.push_str(&format!("{}) {}\n", i + 1, celebrant.email));
    }
    body.push_str("\n\n");
    body.push_str(CLOSING_LINE);

    OutboundMessage {
        recipient: recipient.to_string(),
        subject: format!("Colleague birthdays {}", today.format("%d-%m-%Y")),
        body,
    }
}
