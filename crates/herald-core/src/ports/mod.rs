//! Ports: the seams between the dispatcher and the external services.
//!
//! - [`NotificationStore`]: the document store holding notification records.
//! - [`PushSender`]: the push-delivery service.
//!
//! Production implementations live in [`crate::firebase`]; an in-memory
//! store for tests and local development lives in [`crate::impls`].

pub mod push;
pub mod store;

pub use push::{DeliveryReceipt, PushSender};
pub use store::{MarkOutcome, NotificationStore};
