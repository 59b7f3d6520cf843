//! NotificationStore port - the document store is the source of truth.

use async_trait::async_trait;

use crate::domain::{PendingNotification, RecordId};
use crate::error::HeraldError;

/// Result of a conditional `sent` update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// This call transitioned the record from unsent to sent.
    Marked,

    /// The record was already sent (a concurrent run won the race). The flag
    /// is left untouched.
    AlreadySent,
}

/// Store port (interface).
///
/// The store owns record lifecycle; this job only queries the unsent set and
/// flips the idempotency flag. `mark_sent` must be a compare-and-set: it
/// updates `sent` to `true` only if it is currently `false`, so overlapping
/// invocations cannot flip the flag back or double-mark silently.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Fetch all records with `sent == false`, in the store's default
    /// iteration order. An empty result is normal, not an error.
    async fn fetch_unsent(&self) -> Result<Vec<PendingNotification>, HeraldError>;

    /// Conditionally flip `sent` to `true` for one record.
    async fn mark_sent(&self, id: &RecordId) -> Result<MarkOutcome, HeraldError>;
}
