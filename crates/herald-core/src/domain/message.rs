//! Push message: the ephemeral payload built per record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::NotificationRecord;

/// Title/body substituted when the record omits them.
pub const DEFAULT_TITLE: &str = "🛎 New Order!";
pub const DEFAULT_BODY: &str = "New order placed.";

/// The visible part of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// One push message, addressed to a single device token.
///
/// Constructed per record and never persisted. `data` is the opaque
/// string-to-string block the client app consumes (`orderId`, `type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub token: String,
    pub notification: Notification,
    pub data: BTreeMap<String, String>,
}

impl PushMessage {
    /// Map a record into a message, substituting the documented defaults for
    /// absent optional fields.
    pub fn from_record(token: impl Into<String>, record: &NotificationRecord) -> Self {
        let notification = Notification {
            title: record.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: record.body.clone().unwrap_or_else(|| DEFAULT_BODY.to_string()),
        };

        let mut data = BTreeMap::new();
        data.insert(
            "orderId".to_string(),
            record.order_id.clone().unwrap_or_default(),
        );
        data.insert("type".to_string(), record.kind.clone().unwrap_or_default());

        Self {
            token: token.into(),
            notification,
            data,
        }
    }
}
