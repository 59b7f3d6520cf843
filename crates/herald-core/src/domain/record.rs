//! Notification record: the store-owned document this job reads and flags.

use serde::{Deserialize, Serialize};

use super::ids::RecordId;

/// One order-notification document, as stored under the notifications
/// collection.
///
/// The store owns this shape; the job only reads it and flips `sent`. Every
/// field except `sent` may be absent in older documents, so all of them are
/// optional here and defaults are substituted at payload-mapping time
/// ([`crate::domain::message::PushMessage::from_record`]).
///
/// Invariant: `sent` transitions `false -> true` at most once. The job never
/// reverts the flag and never deletes a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Idempotency marker. Absent means "not yet sent".
    #[serde(default)]
    pub sent: bool,

    /// Push-delivery target address. Records without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A record paired with its store-assigned id, as returned by the unsent
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub id: RecordId,
    pub record: NotificationRecord,
}

impl PendingNotification {
    pub fn new(id: impl Into<RecordId>, record: NotificationRecord) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}
