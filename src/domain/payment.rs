use super::customer::CustomerData;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_CURRENCY: &str = "MXN";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Online,
    Offline,
}

/// The payment half of a request.
///
/// `amount` is expressed in the minor unit of `currency` (cents for MXN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    amount: i64,
    source: String,
    currency: String,
    payment_type: PaymentType,
}

impl PaymentData {
    pub fn new(
        amount: i64,
        source: impl Into<String>,
        currency: impl Into<String>,
        payment_type: PaymentType,
    ) -> Self {
        Self {
            amount,
            source: source.into(),
            currency: currency.into(),
            payment_type,
        }
    }

    /// An online payment in the default currency.
    pub fn online(amount: i64, source: impl Into<String>) -> Self {
        Self {
            amount,
            source: source.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            payment_type: PaymentType::Online,
        }
    }

    /// An offline payment in the default currency; no source token is needed.
    pub fn offline(amount: i64) -> Self {
        Self {
            amount,
            source: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            payment_type: PaymentType::Offline,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Card or payment-method token. Empty for offline payments.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn is_online(&self) -> bool {
        self.payment_type == PaymentType::Online
    }

    /// The amount in major units with two decimal places.
    pub fn major_units(&self) -> Decimal {
        major_units(self.amount)
    }
}

pub fn major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Outcome reported by a processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Succeeded,
    Failed,
    OfflinePending,
    Active,
    Refunded,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::OfflinePending => "offline_pending",
            PaymentStatus::Active => "active",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "succeeded" => PaymentStatus::Succeeded,
            "failed" => PaymentStatus::Failed,
            "offline_pending" => PaymentStatus::OfflinePending,
            "active" => PaymentStatus::Active,
            "refunded" => PaymentStatus::Refunded,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The standardised answer of every processor.
///
/// Fields are private; a response is built once by a processor and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResponse {
    status: PaymentStatus,
    amount: i64,
    transaction_id: Option<String>,
    message: Option<String>,
}

impl PaymentResponse {
    pub fn new(
        status: PaymentStatus,
        amount: i64,
        transaction_id: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            amount,
            transaction_id,
            message,
        }
    }

    /// A provider-reported failure: no transaction id, the provider's message.
    pub fn failed(amount: i64, message: impl Into<String>) -> Self {
        Self::new(PaymentStatus::Failed, amount, None, Some(message.into()))
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}

/// A customer and a payment travelling together through the validation chain.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub customer: &'a CustomerData,
    pub payment: &'a PaymentData,
}

impl<'a> Request<'a> {
    pub fn new(customer: &'a CustomerData, payment: &'a PaymentData) -> Self {
        Self { customer, payment }
    }
}
