use crate::domain::customer::{ContactInfo, CustomerData};
use crate::domain::notification::{NotifierChannel, OutboundMessage};
use crate::domain::ports::{MessageSink, MessageSinkRef, Notifier, NotifierBox};
use crate::error::{PaymentError, Result};
use std::sync::Arc;

pub const EMAIL_SENDER: &str = "no-reply@example.com";
pub const DEFAULT_SMS_GATEWAY: &str = "Twilio";

const CONFIRMATION_BODY: &str = "Thank you for your payment.";

impl NotifierChannel {
    /// Picks the channel for a customer: phone first, then email, then log only.
    pub fn select(contact: Option<&ContactInfo>) -> Self {
        match contact {
            Some(c) if c.phone().is_some() => NotifierChannel::Sms,
            Some(c) if c.email().is_some() => NotifierChannel::Email,
            _ => NotifierChannel::LogOnly,
        }
    }

    /// Builds the notifier for this channel, delivering through `sink`.
    pub fn into_notifier(self, sink: MessageSinkRef) -> NotifierBox {
        match self {
            NotifierChannel::Sms => Box::new(SmsNotifier::new(sink, DEFAULT_SMS_GATEWAY)),
            NotifierChannel::Email => Box::new(EmailNotifier::new(sink)),
            NotifierChannel::LogOnly => Box::new(LogOnlyNotifier),
        }
    }
}

/// Selects and builds the notifier matching the customer's contact details.
pub fn notifier_for(customer: &CustomerData, sink: MessageSinkRef) -> NotifierBox {
    let channel = NotifierChannel::select(customer.contact_info());
    tracing::debug!(customer = %customer.name(), %channel, "Notifier selected");
    channel.into_notifier(sink)
}

/// Prints every message to stderr, keeping stdout free for command output.
#[derive(Debug, Default, Clone)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn deliver(&self, message: &OutboundMessage) {
        match &message.subject {
            Some(subject) => eprintln!(
                "[{}] {} -> {}: {} | {}",
                message.channel, message.from, message.to, subject, message.body
            ),
            None => eprintln!(
                "[{}] {} -> {}: {}",
                message.channel, message.from, message.to, message.body
            ),
        }
    }
}

pub struct EmailNotifier {
    sink: MessageSinkRef,
}

impl EmailNotifier {
    pub fn new(sink: MessageSinkRef) -> Self {
        Self { sink }
    }

    fn send(&self, customer: &CustomerData, subject: &str, body: &str) -> Result<()> {
        let to = customer.email().ok_or_else(|| {
            PaymentError::ConfigurationError(
                "email address is required to send an email".to_string(),
            )
        })?;

        self.sink.deliver(&OutboundMessage {
            channel: NotifierChannel::Email,
            from: EMAIL_SENDER.to_string(),
            to: to.to_string(),
            subject: Some(subject.to_string()),
            body: body.to_string(),
        });
        tracing::info!(to, subject, "Email sent");
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    fn channel(&self) -> NotifierChannel {
        NotifierChannel::Email
    }

    fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        self.send(customer, "Payment Confirmation", CONFIRMATION_BODY)
    }

    fn send_failure_notification(&self, customer: &CustomerData, message: &str) -> Result<()> {
        let body = format!("Your payment could not be completed: {message}");
        self.send(customer, "Payment Failed", &body)
    }
}

/// Sends texts through a named SMS gateway. A customer without a phone number
/// is skipped with a warning.
pub struct SmsNotifier {
    sink: MessageSinkRef,
    gateway: String,
}

impl SmsNotifier {
    pub fn new(sink: MessageSinkRef, gateway: impl Into<String>) -> Self {
        Self {
            sink,
            gateway: gateway.into(),
        }
    }

    fn send(&self, customer: &CustomerData, body: &str) -> Result<()> {
        let Some(phone) = customer.phone() else {
            tracing::warn!(customer = %customer.name(), "No phone number provided, SMS skipped");
            return Ok(());
        };

        self.sink.deliver(&OutboundMessage {
            channel: NotifierChannel::Sms,
            from: self.gateway.clone(),
            to: phone.to_string(),
            subject: None,
            body: body.to_string(),
        });
        tracing::info!(to = phone, gateway = %self.gateway, "SMS sent");
        Ok(())
    }
}

impl Notifier for SmsNotifier {
    fn channel(&self) -> NotifierChannel {
        NotifierChannel::Sms
    }

    fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        self.send(customer, CONFIRMATION_BODY)
    }

    fn send_failure_notification(&self, customer: &CustomerData, message: &str) -> Result<()> {
        self.send(customer, &format!("Payment failed: {message}"))
    }
}

/// Fallback when a customer has no contact channel: records the intent only.
#[derive(Debug, Default, Clone)]
pub struct LogOnlyNotifier;

impl Notifier for LogOnlyNotifier {
    fn channel(&self) -> NotifierChannel {
        NotifierChannel::LogOnly
    }

    fn send_confirmation(&self, customer: &CustomerData) -> Result<()> {
        tracing::info!(customer = %customer.name(), "Payment confirmation logged, no contact info available");
        Ok(())
    }

    fn send_failure_notification(&self, customer: &CustomerData, message: &str) -> Result<()> {
        tracing::info!(customer = %customer.name(), reason = message, "Payment failure logged, no contact info available");
        Ok(())
    }
}

/// Sink that keeps every delivered message; handy in tests.
#[derive(Debug, Default, Clone)]
pub struct CapturingSink {
    messages: Arc<std::sync::Mutex<Vec<OutboundMessage>>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for CapturingSink {
    fn deliver(&self, message: &OutboundMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.clone());
        }
    }
}
