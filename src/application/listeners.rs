use crate::domain::event::PaymentEvent;
use crate::domain::ports::{Listener, ListenerRef};
use std::sync::Arc;

/// In-memory registry of transaction listeners.
///
/// Events are delivered synchronously, in subscription order.
#[derive(Default, Clone)]
pub struct ListenerManager {
    listeners: Vec<ListenerRef>,
}

impl ListenerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: ListenerRef) {
        self.listeners.push(listener);
    }

    /// Removes the first registration of this exact listener instance.
    /// Returns `false` when it was not subscribed.
    pub fn unsubscribe(&mut self, listener: &ListenerRef) -> bool {
        match self
            .listeners
            .iter()
            .position(|registered| Arc::ptr_eq(registered, listener))
        {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn notify(&self, event: &PaymentEvent) {
        for listener in &self.listeners {
            listener.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Writes every event to the audit log target as JSON.
#[derive(Debug, Default, Clone)]
pub struct AccountabilityListener;

impl Listener for AccountabilityListener {
    fn notify(&self, event: &PaymentEvent) {
        match serde_json::to_string(event) {
            Ok(json) => tracing::info!(target: "payflow::audit", event = %json, "Event received"),
            Err(e) => tracing::error!(target: "payflow::audit", error = %e, "Unserializable event"),
        }
    }
}

/// Keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: std::sync::Mutex<Vec<PaymentEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PaymentEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Listener for RecordingListener {
    fn notify(&self, event: &PaymentEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
