use crate::config::GatewayConfig;
use crate::domain::customer::CustomerData;
use crate::domain::gateway::{ChargeRequest, SubscriptionRequest};
use crate::domain::payment::{PaymentData, PaymentResponse, PaymentStatus};
use crate::domain::ports::{GatewayClientRef, PaymentProcessor};
use crate::error::{GatewayError, PaymentError, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// Processor backed by a hosted gateway.
///
/// Provider refusals come back as `PaymentStatus::Failed` responses carrying
/// the provider message. Transport failures are returned as
/// `PaymentError::GatewayError`.
pub struct GatewayProcessor {
    client: GatewayClientRef,
    config: GatewayConfig,
}

impl GatewayProcessor {
    pub fn new(client: GatewayClientRef, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// Returns the gateway customer id, creating the customer when the record
    /// carries no reference yet.
    async fn resolve_customer(&self, customer: &CustomerData) -> Result<String> {
        if let Some(id) = customer.customer_id() {
            tracing::debug!(customer_id = id, "Reusing gateway customer");
            return Ok(id.to_string());
        }

        let email = customer.email().ok_or_else(|| {
            PaymentError::ConfigurationError("email required for subscriptions".to_string())
        })?;
        let created = self.client.create_customer(customer.name(), email).await?;
        tracing::info!(customer_id = %created.id, "Gateway customer created");
        Ok(created.id)
    }
}

/// Turns a provider refusal into a `Failed` response and lets transport
/// failures through.
fn declined(error: GatewayError, amount: i64) -> Result<PaymentResponse> {
    match error {
        GatewayError::Provider(message) => {
            tracing::warn!(reason = %message, "Gateway declined the operation");
            Ok(PaymentResponse::failed(amount, message))
        }
        transport @ GatewayError::Transport(_) => Err(transport.into()),
    }
}

/// A gateway status other than `succeeded` carries no message, so the status
/// itself becomes the failure reason.
fn outcome_message(status: &PaymentStatus, success: &str) -> Option<String> {
    (*status == PaymentStatus::Succeeded).then(|| success.to_string())
}

#[async_trait]
impl PaymentProcessor for GatewayProcessor {
    fn name(&self) -> &'static str {
        "gateway"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let request = ChargeRequest {
            amount: payment.amount(),
            currency: payment.currency().to_lowercase(),
            source: payment.source().to_string(),
            description: format!("Charge for {}", customer.name()),
        };

        match self.client.create_charge(request).await {
            Ok(charge) => {
                tracing::info!(charge_id = %charge.id, status = %charge.status, "Charge created");
                let status = PaymentStatus::from(charge.status.as_str());
                let message = outcome_message(&status, "Payment successful");
                Ok(PaymentResponse::new(
                    status,
                    charge.amount,
                    Some(charge.id),
                    message,
                ))
            }
            Err(e) => declined(e, payment.amount()),
        }
    }

    fn supports_refund(&self) -> bool {
        true
    }

    fn supports_recurring(&self) -> bool {
        true
    }

    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        match self.client.create_refund(transaction_id).await {
            Ok(refund) => {
                tracing::info!(refund_id = %refund.id, charge_id = transaction_id, status = %refund.status, "Refund created");
                let status = PaymentStatus::from(refund.status.as_str());
                let message = outcome_message(&status, "Refund successful");
                Ok(PaymentResponse::new(
                    status,
                    refund.amount,
                    Some(refund.id),
                    message,
                ))
            }
            Err(e) => declined(e, 0),
        }
    }

    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let customer_id = match self.resolve_customer(customer).await {
            Ok(id) => id,
            Err(PaymentError::GatewayError(e)) => return declined(e, 0),
            Err(e) => return Err(e),
        };

        let request = SubscriptionRequest {
            customer_id,
            price_id: self.config.price_id.clone(),
            payment_method: payment.source().to_string(),
        };

        match self.client.create_subscription(request).await {
            Ok(subscription) => {
                tracing::info!(subscription_id = %subscription.id, "Recurring payment setup successful");
                Ok(PaymentResponse::new(
                    PaymentStatus::from(subscription.status.as_str()),
                    subscription.amount,
                    Some(subscription.id),
                    Some("Recurring payment setup successful".to_string()),
                ))
            }
            Err(e) => declined(e, 0),
        }
    }
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_uppercase()
}

/// Processor that settles everything locally. Used for currencies the hosted
/// gateway is not set up for, and in tests.
#[derive(Debug, Default, Clone)]
pub struct LocalProcessor;

impl LocalProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProcessor for LocalProcessor {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!(customer = %customer.name(), amount = payment.amount(), "Processing local payment");
        Ok(PaymentResponse::new(
            PaymentStatus::Succeeded,
            payment.amount(),
            Some(format!("LOCAL-{}", short_id())),
            Some("Local payment processed successfully".to_string()),
        ))
    }

    fn supports_refund(&self) -> bool {
        true
    }

    fn supports_recurring(&self) -> bool {
        true
    }

    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        tracing::info!(transaction_id, "Processing local refund");
        // Charged amounts are not tracked locally.
        Ok(PaymentResponse::new(
            PaymentStatus::Refunded,
            0,
            Some(format!("LOCAL-REFUND-{}", short_id())),
            Some("Refund processed successfully".to_string()),
        ))
    }

    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!(customer = %customer.name(), "Setting up local recurring payment");
        Ok(PaymentResponse::new(
            PaymentStatus::Active,
            payment.amount(),
            Some(format!("LOCAL-SUB-{}", short_id())),
            Some("Recurring payment setup successfully".to_string()),
        ))
    }
}

/// Processor for payments settled outside the system (cash, bank deposit).
#[derive(Debug, Default, Clone)]
pub struct OfflineProcessor;

impl OfflineProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProcessor for OfflineProcessor {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!(customer = %customer.name(), "Processing offline payment");
        Ok(PaymentResponse::new(
            PaymentStatus::OfflinePending,
            payment.amount(),
            Some(format!("OFFLINE-{}", Uuid::new_v4())),
            Some("Payment will be processed offline".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::ContactInfo;
    use crate::domain::event::PaymentEvent;
    use crate::domain::gateway::{Charge, GatewayCustomer, Refund, Subscription};
    use crate::domain::ports::GatewayClient;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use std::sync::Arc;

    fn alice() -> CustomerData {
        CustomerData::new("Alice", ContactInfo::with_email("a@b.com"))
    }

    fn gateway_processor(gateway: InMemoryGateway) -> GatewayProcessor {
        GatewayProcessor::new(Arc::new(gateway), GatewayConfig::default())
    }

    /// Gateway that accepts every charge and refund but leaves it pending.
    struct PendingGateway;

    #[async_trait]
    impl GatewayClient for PendingGateway {
        async fn create_charge(
            &self,
            request: ChargeRequest,
        ) -> std::result::Result<Charge, GatewayError> {
            Ok(Charge {
                id: "ch_pending".to_string(),
                status: "pending".to_string(),
                amount: request.amount,
            })
        }

        async fn create_refund(&self, charge_id: &str) -> std::result::Result<Refund, GatewayError> {
            Ok(Refund {
                id: "re_pending".to_string(),
                charge: charge_id.to_string(),
                status: "pending".to_string(),
                amount: 0,
            })
        }

        async fn create_customer(
            &self,
            _name: &str,
            _email: &str,
        ) -> std::result::Result<GatewayCustomer, GatewayError> {
            Err(GatewayError::Provider("customers are not supported".to_string()))
        }

        async fn create_subscription(
            &self,
            _request: SubscriptionRequest,
        ) -> std::result::Result<Subscription, GatewayError> {
            Err(GatewayError::Provider("subscriptions are not supported".to_string()))
        }
    }

    #[tokio::test]
    async fn test_gateway_charge_succeeds() {
        let processor = gateway_processor(InMemoryGateway::new());
        let response = processor
            .process_transaction(&alice(), &PaymentData::online(5000, "tok_visa"))
            .await
            .unwrap();

        assert_eq!(response.status(), &PaymentStatus::Succeeded);
        assert_eq!(response.amount(), 5000);
        assert!(response.transaction_id().unwrap().starts_with("ch_"));
    }

    #[tokio::test]
    async fn test_gateway_decline_is_a_failed_response() {
        let processor = gateway_processor(InMemoryGateway::new());
        let response = processor
            .process_transaction(&alice(), &PaymentData::online(5000, "tok_chargeDeclined"))
            .await
            .unwrap();

        assert_eq!(response.status(), &PaymentStatus::Failed);
        assert_eq!(response.transaction_id(), None);
        assert_eq!(response.message(), Some("Your card was declined."));
    }

    #[tokio::test]
    async fn test_pending_charge_has_no_success_message() {
        let processor = GatewayProcessor::new(Arc::new(PendingGateway), GatewayConfig::default());
        let response = processor
            .process_transaction(&alice(), &PaymentData::online(5000, "tok_visa"))
            .await
            .unwrap();

        assert_eq!(response.status(), &PaymentStatus::Other("pending".to_string()));
        assert_eq!(response.transaction_id(), Some("ch_pending"));
        assert_eq!(response.message(), None);
        assert_eq!(
            PaymentEvent::from_response(&response),
            PaymentEvent::Failure {
                reason: "pending".to_string()
            }
        );

        let refund = processor.refund_payment("ch_pending").await.unwrap();
        assert_eq!(refund.message(), None);
    }

    #[tokio::test]
    async fn test_gateway_transport_error_propagates() {
        let processor = gateway_processor(InMemoryGateway::unreachable());
        let result = processor
            .process_transaction(&alice(), &PaymentData::online(5000, "tok_visa"))
            .await;

        assert!(matches!(
            result,
            Err(PaymentError::GatewayError(GatewayError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_gateway_refund_of_unknown_charge_fails() {
        let processor = gateway_processor(InMemoryGateway::new());
        let response = processor.refund_payment("ch_missing").await.unwrap();
        assert_eq!(response.status(), &PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn test_gateway_refund_after_charge() {
        let processor = gateway_processor(InMemoryGateway::new());
        let charge = processor
            .process_transaction(&alice(), &PaymentData::online(700, "tok_visa"))
            .await
            .unwrap();

        let refund = processor
            .refund_payment(charge.transaction_id().unwrap())
            .await
            .unwrap();
        assert_eq!(refund.status(), &PaymentStatus::Succeeded);
        assert_eq!(refund.amount(), 700);
        assert!(refund.transaction_id().unwrap().starts_with("re_"));
    }

    #[tokio::test]
    async fn test_gateway_recurring_creates_customer() {
        let gateway = InMemoryGateway::new().with_price("price_monthly", 9900);
        let processor = gateway_processor(gateway);

        let response = processor
            .setup_recurring_payment(&alice(), &PaymentData::online(9900, "pm_card_visa"))
            .await
            .unwrap();
        assert_eq!(response.status(), &PaymentStatus::Active);
        assert_eq!(response.amount(), 9900);
    }

    #[tokio::test]
    async fn test_gateway_recurring_requires_email_without_customer_id() {
        let processor = gateway_processor(InMemoryGateway::new());
        let customer = CustomerData::new("Carlos", ContactInfo::with_phone("5551234567"));

        let result = processor
            .setup_recurring_payment(&customer, &PaymentData::online(9900, "pm_card_visa"))
            .await;
        assert!(matches!(result, Err(PaymentError::ConfigurationError(_))));
    }

    #[tokio::test]
    async fn test_local_processor_capabilities() {
        let processor = LocalProcessor::new();
        assert!(processor.supports_refund());
        assert!(processor.supports_recurring());

        let response = processor
            .process_transaction(&alice(), &PaymentData::online(100, "tok_visa").with_currency("USD"))
            .await
            .unwrap();
        let id = response.transaction_id().unwrap();
        assert!(id.starts_with("LOCAL-"));
        assert_eq!(id.len(), "LOCAL-".len() + 12);

        let refund = processor.refund_payment(id).await.unwrap();
        assert_eq!(refund.status(), &PaymentStatus::Refunded);
        assert_eq!(refund.amount(), 0);
    }

    #[tokio::test]
    async fn test_offline_processor_has_no_optional_capabilities() {
        let processor = OfflineProcessor::new();
        assert!(!processor.supports_refund());
        assert!(!processor.supports_recurring());

        let response = processor
            .process_transaction(&alice(), &PaymentData::offline(8000))
            .await
            .unwrap();
        assert_eq!(response.status(), &PaymentStatus::OfflinePending);
        assert!(response.transaction_id().unwrap().starts_with("OFFLINE-"));

        assert!(matches!(
            processor.refund_payment("X").await,
            Err(PaymentError::UnsupportedOperation(_))
        ));
    }
}
