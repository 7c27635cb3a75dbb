//! Application layer containing the payment orchestration.
//!
//! `PaymentService` ties a validation chain, a processor, a notifier, a
//! transaction log and a listener registry together. `PaymentServiceBuilder`
//! assembles one from raw customer and payment data, using
//! `ProcessorFactory` and the notifier strategy to pick collaborators.

pub mod builder;
pub mod decorator;
pub mod factory;
pub mod listeners;
pub mod service;
pub mod validation;
