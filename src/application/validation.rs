//! Request validation as a chain of responsibility.
//!
//! Each handler checks one concern and forwards to the next link. The first
//! failure aborts the chain with `PaymentError::ValidationError`.

use crate::domain::customer::CustomerData;
use crate::domain::payment::{PaymentData, Request};
use crate::error::{PaymentError, Result};

/// Checks a customer record. Contact details are only required when
/// `require_contact` is set.
pub fn validate_customer(customer: &CustomerData, require_contact: bool) -> Result<()> {
    if customer.name().is_empty() {
        return Err(invalid("Invalid customer data: missing name"));
    }

    let Some(contact) = customer.contact_info() else {
        return Err(invalid("Invalid customer data: missing contact info"));
    };

    if require_contact && !contact.is_reachable() {
        return Err(invalid("Invalid customer data: missing email and phone"));
    }

    Ok(())
}

/// Checks a payment record. The source token is only required online.
pub fn validate_payment(payment: &PaymentData) -> Result<()> {
    if payment.amount() <= 0 {
        return Err(invalid("Invalid payment data: amount must be positive"));
    }
    if payment.is_online() && payment.source().is_empty() {
        return Err(invalid("Invalid payment data: missing source"));
    }
    Ok(())
}

fn invalid(reason: &str) -> PaymentError {
    PaymentError::ValidationError(reason.to_string())
}

pub trait ChainHandler: Send + Sync {
    /// Attaches the link that runs after this one, replacing any previous one.
    fn set_next(&mut self, next: Box<dyn ChainHandler>);

    fn handle(&self, request: &Request<'_>) -> Result<()>;
}

/// Links `handlers` in order and returns the head of the chain.
pub fn link(handlers: Vec<Box<dyn ChainHandler>>) -> Option<Box<dyn ChainHandler>> {
    handlers.into_iter().rev().fold(None, |next, mut handler| {
        if let Some(next) = next {
            handler.set_next(next);
        }
        Some(handler)
    })
}

fn forward(next: &Option<Box<dyn ChainHandler>>, request: &Request<'_>) -> Result<()> {
    match next {
        Some(handler) => handler.handle(request),
        None => Ok(()),
    }
}

#[derive(Default)]
pub struct CustomerHandler {
    next: Option<Box<dyn ChainHandler>>,
}

impl CustomerHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChainHandler for CustomerHandler {
    fn set_next(&mut self, next: Box<dyn ChainHandler>) {
        self.next = Some(next);
    }

    fn handle(&self, request: &Request<'_>) -> Result<()> {
        // Offline payments never reach the customer through a gateway.
        let require_contact = request.payment.is_online();
        if let Err(e) = validate_customer(request.customer, require_contact) {
            tracing::warn!(handler = "customer", error = %e, "Validation failed");
            return Err(e);
        }
        forward(&self.next, request)
    }
}

#[derive(Default)]
pub struct PaymentHandler {
    next: Option<Box<dyn ChainHandler>>,
}

impl PaymentHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChainHandler for PaymentHandler {
    fn set_next(&mut self, next: Box<dyn ChainHandler>) {
        self.next = Some(next);
    }

    fn handle(&self, request: &Request<'_>) -> Result<()> {
        if let Err(e) = validate_payment(request.payment) {
            tracing::warn!(handler = "payment", error = %e, "Validation failed");
            return Err(e);
        }
        forward(&self.next, request)
    }
}
