use crate::application::listeners::ListenerManager;
use crate::application::validation::ChainHandler;
use crate::domain::customer::CustomerData;
use crate::domain::event::PaymentEvent;
use crate::domain::payment::{PaymentData, PaymentResponse, PaymentStatus, Request};
use crate::domain::ports::{NotifierBox, PaymentProcessorRef, TransactionLogRef};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;

/// The three use cases every payment service exposes.
#[async_trait]
pub trait PaymentServiceApi: Send + Sync {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse>;

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;
}

/// Orchestrates validation, processing, notification and logging.
///
/// Errors come through two channels. A returned `Err` means the call did not
/// reach a verdict: invalid input, a missing capability or an unreachable
/// gateway. A gateway that answered and refused shows up as an `Ok` response
/// whose status is `Failed`.
///
/// Once a processor has answered, the response is always returned. Notifier
/// and transaction log failures after that point are traced, not raised.
pub struct PaymentService {
    processor: PaymentProcessorRef,
    notifier: NotifierBox,
    validator: Box<dyn ChainHandler>,
    logger: TransactionLogRef,
    listeners: ListenerManager,
    recurring_processor: Option<PaymentProcessorRef>,
    refund_processor: Option<PaymentProcessorRef>,
}

impl PaymentService {
    /// Creates a service from its collaborators.
    ///
    /// # Arguments
    ///
    /// * `processor` - Executes one-off transactions.
    /// * `notifier` - Tells the customer about the outcome.
    /// * `validator` - Head of the validation chain.
    /// * `logger` - Receives one entry per processed operation.
    /// * `listeners` - Observers of transaction outcomes.
    /// * `recurring_processor` - Handles `setup_recurring`, if supported.
    /// * `refund_processor` - Handles `process_refund`, if supported.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        processor: PaymentProcessorRef,
        notifier: NotifierBox,
        validator: Box<dyn ChainHandler>,
        logger: TransactionLogRef,
        listeners: ListenerManager,
        recurring_processor: Option<PaymentProcessorRef>,
        refund_processor: Option<PaymentProcessorRef>,
    ) -> Self {
        Self {
            processor,
            notifier,
            validator,
            logger,
            listeners,
            recurring_processor,
            refund_processor,
        }
    }

    pub fn set_notifier(&mut self, notifier: NotifierBox) {
        tracing::info!(channel = %notifier.channel(), "Changing notifier");
        self.notifier = notifier;
    }

    pub fn notifier(&self) -> &NotifierBox {
        &self.notifier
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerManager {
        &mut self.listeners
    }

    pub fn supports_refund(&self) -> bool {
        self.refund_processor.is_some()
    }

    pub fn supports_recurring(&self) -> bool {
        self.recurring_processor.is_some()
    }

    fn validate(&self, customer: &CustomerData, payment: &PaymentData) -> Result<()> {
        self.validator.handle(&Request::new(customer, payment))
    }

    /// Tells listeners and the customer how an operation ended.
    fn report(&self, customer: &CustomerData, response: &PaymentResponse, success: bool) {
        let event = if success {
            PaymentEvent::Success {
                response: response.clone(),
            }
        } else {
            PaymentEvent::from_response(response)
        };
        self.listeners.notify(&event);

        let sent = match event {
            PaymentEvent::Success { .. } => self.notifier.send_confirmation(customer),
            PaymentEvent::Failure { reason } => {
                self.notifier.send_failure_notification(customer, &reason)
            }
        };
        if let Err(e) = sent {
            tracing::error!(
                customer = %customer.name(),
                channel = %self.notifier.channel(),
                transaction_id = ?response.transaction_id(),
                error = %e,
                "Failed to notify customer"
            );
        }
    }

    async fn record(&self, customer: &CustomerData, payment: &PaymentData, response: &PaymentResponse) {
        if let Err(e) = self.logger.log(customer, payment, response).await {
            tracing::error!(
                customer = %customer.name(),
                transaction_id = ?response.transaction_id(),
                error = %e,
                "Failed to write transaction log"
            );
        }
    }
}

#[async_trait]
impl PaymentServiceApi for PaymentService {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        self.validate(customer, payment)?;

        let response = self.processor.process_transaction(customer, payment).await?;
        tracing::info!(
            processor = self.processor.name(),
            status = %response.status(),
            transaction_id = ?response.transaction_id(),
            "Transaction processed"
        );

        self.report(customer, &response, response.is_success());
        self.record(customer, payment, &response).await;
        Ok(response)
    }

    async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse> {
        let processor = self.refund_processor.as_ref().ok_or_else(|| {
            PaymentError::UnsupportedOperation(
                "refunds are not supported by this processor".to_string(),
            )
        })?;

        let response = processor.refund_payment(transaction_id).await?;
        tracing::info!(transaction_id, status = %response.status(), "Refund processed");
        if let Err(e) = self.logger.log_refund(transaction_id, &response).await {
            tracing::error!(transaction_id, error = %e, "Failed to write refund to transaction log");
        }
        Ok(response)
    }

    async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let processor = self.recurring_processor.as_ref().ok_or_else(|| {
            PaymentError::UnsupportedOperation(
                "recurring payments are not supported by this processor".to_string(),
            )
        })?;

        self.validate(customer, payment)?;

        let response = processor.setup_recurring_payment(customer, payment).await?;
        tracing::info!(status = %response.status(), "Recurring payment configured");

        // Any status other than an explicit failure means the plan is in place.
        let success = *response.status() != PaymentStatus::Failed;
        self.report(customer, &response, success);
        self.record(customer, payment, &response).await;
        Ok(response)
    }
}
