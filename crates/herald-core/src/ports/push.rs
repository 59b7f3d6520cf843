//! PushSender port - the push-delivery service.

use std::fmt;

use async_trait::async_trait;

use crate::domain::PushMessage;
use crate::error::HeraldError;

/// Provider-assigned identifier for one accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt(String);

impl DeliveryReceipt {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sender port (interface).
///
/// One message, one blocking call to the external service. Retry/backoff is
/// the provider's concern; a failed send surfaces as an error and the record
/// stays unsent for the next scheduled run.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<DeliveryReceipt, HeraldError>;
}
