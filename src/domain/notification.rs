use serde::Serialize;
use std::fmt;

/// The channel a notifier delivers through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierChannel {
    Email,
    Sms,
    LogOnly,
}

impl fmt::Display for NotifierChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotifierChannel::Email => "email",
            NotifierChannel::Sms => "sms",
            NotifierChannel::LogOnly => "log_only",
        };
        f.write_str(name)
    }
}

/// A customer-facing message handed to a delivery sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub channel: NotifierChannel,
    /// Sender address or gateway label, depending on the channel.
    pub from: String,
    pub to: String,
    pub subject: Option<String>,
    pub body: String,
}
