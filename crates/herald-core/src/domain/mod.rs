//! Domain model (record ids, notification records, push messages).

pub mod ids;
pub mod message;
pub mod record;

pub use ids::RecordId;
pub use message::{Notification, PushMessage};
pub use record::{NotificationRecord, PendingNotification};
