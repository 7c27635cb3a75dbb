use crate::config::GatewayConfig;
use crate::domain::payment::{PaymentData, PaymentType};
use crate::domain::ports::{GatewayClientRef, PaymentProcessorRef};
use crate::infrastructure::processors::{GatewayProcessor, LocalProcessor, OfflineProcessor};
use std::sync::Arc;

/// The only currency the hosted gateway is set up to charge.
pub const GATEWAY_CURRENCY: &str = "MXN";

/// Picks a processor for a payment.
///
/// Offline payments go to the offline processor. Online payments in the
/// gateway currency go to the hosted gateway; any other currency is settled
/// locally.
pub struct ProcessorFactory {
    gateway: GatewayClientRef,
    config: GatewayConfig,
}

impl ProcessorFactory {
    pub fn new(gateway: GatewayClientRef, config: GatewayConfig) -> Self {
        Self { gateway, config }
    }

    pub fn create(&self, payment: &PaymentData) -> PaymentProcessorRef {
        let processor: PaymentProcessorRef = match payment.payment_type() {
            PaymentType::Offline => Arc::new(OfflineProcessor::new()),
            PaymentType::Online if payment.currency() == GATEWAY_CURRENCY => Arc::new(
                GatewayProcessor::new(self.gateway.clone(), self.config.clone()),
            ),
            PaymentType::Online => Arc::new(LocalProcessor::new()),
        };
        tracing::debug!(
            processor = processor.name(),
            currency = %payment.currency(),
            "Processor selected"
        );
        processor
    }
}
