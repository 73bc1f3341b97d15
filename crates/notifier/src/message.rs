/// A single notice addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    /// Render the message as a flat RFC 5322 payload: headers, blank line, body.
    pub fn to_wire(&self) -> String {
        format!(
            "To: {}\r\nSubject: {}\r\n\r\n{}",
            self.recipient, self.subject, self.body
        )
    }
}
