use crate::application::service::PaymentServiceApi;
use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, PaymentResponse};
use crate::error::Result;
use async_trait::async_trait;

/// Wraps a payment service and traces the start and end of every call.
pub struct LoggingPaymentService<S> {
    inner: S,
}

impl<S: PaymentServiceApi> LoggingPaymentService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

fn finished(operation: &str, result: &Result<PaymentResponse>) {
    match result {
        Ok(response) => tracing::info!(operation, status = %response.status(), "Finished"),
        Err(e) => tracing::warn!(operation, error = %e, "Failed"),
    }
}

#[async_trait]
impl<S: PaymentServiceApi> PaymentServiceApi for LoggingPaymentService<S> {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!(customer = %customer.name(), amount = payment.amount(), "Starting to process transaction");
        let result = self.inner.process_transaction(customer, payment).await;
        finished("process_transaction", &result);
        result
    }

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse> {
        tracing::info!(transaction_id, "Starting to process refund");
        let result = self.inner.process_refund(transaction_id).await;
        finished("process_refund", &result);
        result
    }

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!(customer = %customer.name(), "Starting to set up recurring payment");
        let result = self.inner.setup_recurring(customer, payment).await;
        finished("setup_recurring", &result);
        result
    }
}
