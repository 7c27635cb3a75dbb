use super::customer::CustomerData;
use super::event::PaymentEvent;
use super::gateway::{
    Charge, ChargeRequest, GatewayCustomer, Refund, Subscription, SubscriptionRequest,
};
use super::notification::{NotifierChannel, OutboundMessage};
use super::payment::{PaymentData, PaymentResponse};
use crate::error::{GatewayError, PaymentError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote payment provider. Every call may fail with a provider refusal or a
/// transport failure.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn create_charge(&self, request: ChargeRequest) -> std::result::Result<Charge, GatewayError>;
    async fn create_refund(&self, charge_id: &str) -> std::result::Result<Refund, GatewayError>;
    async fn create_customer(
        &self,
        name: &str,
        email: &str,
    ) -> std::result::Result<GatewayCustomer, GatewayError>;
    async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> std::result::Result<Subscription, GatewayError>;
}

/// Executes payment operations.
///
/// Only `process_transaction` is mandatory. Refunds and recurring payments are
/// optional capabilities: callers ask `supports_refund`/`supports_recurring`
/// first, and the default implementations refuse with `UnsupportedOperation`.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;

    fn supports_refund(&self) -> bool {
        false
    }

    fn supports_recurring(&self) -> bool {
        false
    }

    async fn refund_payment(&self, _transaction_id: &str) -> Result<PaymentResponse> {
        Err(PaymentError::UnsupportedOperation(format!(
            "refunds are not supported by the {} processor",
            self.name()
        )))
    }

    async fn setup_recurring_payment(
        &self,
        _customer: &CustomerData,
        _payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        Err(PaymentError::UnsupportedOperation(format!(
            "recurring payments are not supported by the {} processor",
            self.name()
        )))
    }
}

/// Delivers customer-facing outcome messages.
pub trait Notifier: Send + Sync {
    fn channel(&self) -> NotifierChannel;
    fn send_confirmation(&self, customer: &CustomerData) -> Result<()>;
    fn send_failure_notification(&self, customer: &CustomerData, message: &str) -> Result<()>;
}

/// Where notifiers hand their messages off (console, SMTP relay, SMS API...).
pub trait MessageSink: Send + Sync {
    fn deliver(&self, message: &OutboundMessage);
}

/// Append-only record of processed operations.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn log(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> Result<()>;

    async fn log_refund(&self, transaction_id: &str, response: &PaymentResponse) -> Result<()>;
}

/// Observer of transaction outcomes.
pub trait Listener: Send + Sync {
    fn notify(&self, event: &PaymentEvent);
}

pub type GatewayClientRef = Arc<dyn GatewayClient>;
pub type PaymentProcessorRef = Arc<dyn PaymentProcessor>;
pub type NotifierBox = Box<dyn Notifier>;
pub type MessageSinkRef = Arc<dyn MessageSink>;
pub type TransactionLogRef = Arc<dyn TransactionLog>;
pub type ListenerRef = Arc<dyn Listener>;
