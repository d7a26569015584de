use serde::{Deserialize, Serialize};

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub recipient: String,
    pub body: String,
}

/// Trait describing outbound SMS hooks; provider adapters implement it
/// outside this crate, tests record messages in memory.
pub trait SmsGateway: Send + Sync {
    fn send(&self, message: SmsMessage) -> Result<(), SmsError>;
}

/// Delivery dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("sms transport unavailable: {0}")]
    Transport(String),
}
