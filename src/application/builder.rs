use crate::application::factory::ProcessorFactory;
use crate::application::listeners::ListenerManager;
use crate::application::service::PaymentService;
use crate::application::validation::{ChainHandler, CustomerHandler, PaymentHandler, link};
use crate::domain::customer::CustomerData;
use crate::domain::payment::PaymentData;
use crate::domain::ports::{MessageSinkRef, NotifierBox, PaymentProcessorRef, TransactionLogRef};
use crate::error::{PaymentError, Result};
use crate::infrastructure::notifiers::notifier_for;

/// Step-by-step assembly of a [`PaymentService`].
///
/// Processor, notifier, logger and both validators are required; `build`
/// reports every one that is missing. Refund and recurring support are taken
/// from the processor when it advertises them.
#[derive(Default)]
pub struct PaymentServiceBuilder {
    processor: Option<PaymentProcessorRef>,
    notifier: Option<NotifierBox>,
    logger: Option<TransactionLogRef>,
    customer_validator: Option<CustomerHandler>,
    payment_validator: Option<PaymentHandler>,
    listeners: Option<ListenerManager>,
    recurring_processor: Option<PaymentProcessorRef>,
    refund_processor: Option<PaymentProcessorRef>,
}

impl PaymentServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_validator(mut self) -> Self {
        self.customer_validator = Some(CustomerHandler::new());
        self
    }

    pub fn set_payment_validator(mut self) -> Self {
        self.payment_validator = Some(PaymentHandler::new());
        self
    }

    /// Lets `factory` pick the processor for `payment`.
    pub fn set_payment_processor(mut self, factory: &ProcessorFactory, payment: &PaymentData) -> Self {
        self.processor = Some(factory.create(payment));
        self
    }

    /// Uses an already built processor.
    pub fn with_processor(mut self, processor: PaymentProcessorRef) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Picks the notifier from the customer's contact details.
    pub fn set_notifier(mut self, customer: &CustomerData, sink: MessageSinkRef) -> Self {
        self.notifier = Some(notifier_for(customer, sink));
        self
    }

    pub fn set_logger(mut self, logger: TransactionLogRef) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn set_listener_manager(mut self, listeners: ListenerManager) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Reuses the processor for recurring payments when it supports them.
    /// Must come after a processor has been set.
    pub fn set_recurring_processor(mut self) -> Self {
        let Some(processor) = self.processor.as_ref() else {
            tracing::warn!("set_recurring_processor called before a payment processor was set");
            return self;
        };
        let supported = processor.supports_recurring();
        tracing::debug!(processor = processor.name(), supported, "Recurring payments");
        self.recurring_processor = supported.then(|| processor.clone());
        self
    }

    /// Reuses the processor for refunds when it supports them.
    /// Must come after a processor has been set.
    pub fn set_refund_processor(mut self) -> Self {
        let Some(processor) = self.processor.as_ref() else {
            tracing::warn!("set_refund_processor called before a payment processor was set");
            return self;
        };
        let supported = processor.supports_refund();
        tracing::debug!(processor = processor.name(), supported, "Refunds");
        self.refund_processor = supported.then(|| processor.clone());
        self
    }

    pub fn build(self) -> Result<PaymentService> {
        let missing: Vec<&str> = [
            ("payment_processor", self.processor.is_none()),
            ("notifier", self.notifier.is_none()),
            ("logger", self.logger.is_none()),
            ("customer_validator", self.customer_validator.is_none()),
            ("payment_validator", self.payment_validator.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (
            Some(processor),
            Some(notifier),
            Some(logger),
            Some(customer_validator),
            Some(payment_validator),
        ) = (
            self.processor,
            self.notifier,
            self.logger,
            self.customer_validator,
            self.payment_validator,
        )
        else {
            return Err(PaymentError::ConfigurationError(format!(
                "missing builder components: {}",
                missing.join(", ")
            )));
        };

        let handlers: Vec<Box<dyn ChainHandler>> =
            vec![Box::new(customer_validator), Box::new(payment_validator)];
        let validator = link(handlers).ok_or_else(|| {
            PaymentError::ConfigurationError("empty validation chain".to_string())
        })?;

        Ok(PaymentService::new(
            processor,
            notifier,
            validator,
            logger,
            self.listeners.unwrap_or_default(),
            self.recurring_processor,
            self.refund_processor,
        ))
    }
}
