use crate::domain::gateway::{
    Charge, ChargeRequest, GatewayCustomer, Refund, Subscription, SubscriptionRequest,
};
use crate::domain::ports::GatewayClient;
use crate::error::GatewayError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Source token the simulated gateway always declines.
pub const DECLINED_TOKEN: &str = "tok_chargeDeclined";

#[derive(Default)]
struct GatewayState {
    charges: HashMap<String, Charge>,
    refunds: HashMap<String, Refund>,
    customers: HashMap<String, GatewayCustomer>,
    subscriptions: HashMap<String, Subscription>,
}

/// A thread-safe simulated payment gateway.
///
/// Keeps every record it creates in memory so refunds and subscriptions can be
/// checked against earlier calls. Ideal for testing or for running the flow
/// without provider credentials.
#[derive(Clone)]
pub struct InMemoryGateway {
    state: Arc<RwLock<GatewayState>>,
    prices: HashMap<String, i64>,
    reachable: bool,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    /// Creates an empty gateway that accepts calls.
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
            prices: HashMap::new(),
            reachable: true,
        }
    }

    /// Creates a gateway whose every call fails with a transport error.
    pub fn unreachable() -> Self {
        Self {
            state: Arc::default(),
            prices: HashMap::new(),
            reachable: false,
        }
    }

    /// Registers a price that subscriptions can refer to.
    pub fn with_price(mut self, price_id: impl Into<String>, unit_amount: i64) -> Self {
        self.prices.insert(price_id.into(), unit_amount);
        self
    }

    pub async fn charge(&self, id: &str) -> Option<Charge> {
        self.state.read().await.charges.get(id).cloned()
    }

    pub async fn subscription(&self, id: &str) -> Option<Subscription> {
        self.state.read().await.subscriptions.get(id).cloned()
    }

    fn check_reachable(&self) -> Result<(), GatewayError> {
        if self.reachable {
            Ok(())
        } else {
            Err(GatewayError::Transport(
                "connection refused by payment gateway".to_string(),
            ))
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[async_trait]
impl GatewayClient for InMemoryGateway {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, GatewayError> {
        self.check_reachable()?;
        if request.source == DECLINED_TOKEN {
            return Err(GatewayError::Provider("Your card was declined.".to_string()));
        }
        if request.source.is_empty() {
            return Err(GatewayError::Provider(
                "Must provide source or customer.".to_string(),
            ));
        }

        let charge = Charge {
            id: new_id("ch"),
            status: "succeeded".to_string(),
            amount: request.amount,
        };
        let mut state = self.state.write().await;
        state.charges.insert(charge.id.clone(), charge.clone());
        Ok(charge)
    }

    async fn create_refund(&self, charge_id: &str) -> Result<Refund, GatewayError> {
        self.check_reachable()?;
        let mut state = self.state.write().await;
        let amount = state
            .charges
            .get(charge_id)
            .map(|charge| charge.amount)
            .ok_or_else(|| GatewayError::Provider(format!("No such charge: '{charge_id}'")))?;

        if state.refunds.values().any(|refund| refund.charge == charge_id) {
            return Err(GatewayError::Provider(format!(
                "Charge {charge_id} has already been refunded."
            )));
        }

        let refund = Refund {
            id: new_id("re"),
            charge: charge_id.to_string(),
            status: "succeeded".to_string(),
            amount,
        };
        state.refunds.insert(refund.id.clone(), refund.clone());
        Ok(refund)
    }

    async fn create_customer(&self, name: &str, email: &str) -> Result<GatewayCustomer, GatewayError> {
        self.check_reachable()?;
        let customer = GatewayCustomer {
            id: new_id("cus"),
            name: name.to_string(),
            email: email.to_string(),
        };
        let mut state = self.state.write().await;
        state.customers.insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> Result<Subscription, GatewayError> {
        self.check_reachable()?;
        let mut state = self.state.write().await;
        if !state.customers.contains_key(&request.customer_id) {
            return Err(GatewayError::Provider(format!(
                "No such customer: '{}'",
                request.customer_id
            )));
        }
        let amount = *self.prices.get(&request.price_id).ok_or_else(|| {
            GatewayError::Provider(format!("No such price: '{}'", request.price_id))
        })?;
        if request.payment_method.is_empty() {
            return Err(GatewayError::Provider(
                "This customer has no attached payment source or default payment method."
                    .to_string(),
            ));
        }

        let subscription = Subscription {
            id: new_id("sub"),
            customer_id: request.customer_id,
            status: "active".to_string(),
            amount,
        };
        state
            .subscriptions
            .insert(subscription.id.clone(), subscription.clone());
        Ok(subscription)
    }
}
