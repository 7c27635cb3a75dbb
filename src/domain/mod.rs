//! Domain layer: value records, events and the ports the orchestrator talks to.

pub mod customer;
pub mod event;
pub mod gateway;
pub mod notification;
pub mod payment;
pub mod ports;
