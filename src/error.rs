use thiserror::Error;

/// Errors reported by a payment gateway client.
///
/// `Provider` means the gateway answered and refused the operation (declined
/// card, unknown charge). `Transport` means the gateway could not be reached or
/// answered with something unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
