use super::payment::PaymentResponse;
use serde::Serialize;

/// Outcome broadcast to listeners after a processor has answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaymentEvent {
    Success { response: PaymentResponse },
    Failure { reason: String },
}

impl PaymentEvent {
    /// Maps a processor answer to the matching event.
    pub fn from_response(response: &PaymentResponse) -> Self {
        if response.is_success() {
            PaymentEvent::Success {
                response: response.clone(),
            }
        } else {
            PaymentEvent::Failure {
                reason: response
                    .message()
                    .unwrap_or(response.status().as_str())
                    .to_string(),
            }
        }
    }
}
