//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{NotificationRecord, PendingNotification, RecordId};
use crate::error::HeraldError;
use crate::ports::{MarkOutcome, NotificationStore};

/// In-memory notification store.
///
/// Mirrors the semantics the Realtime Database implementation provides:
/// - `fetch_unsent` filters on the `sent` flag server-side,
/// - `mark_sent` is a compare-and-set on the flag.
///
/// A `BTreeMap` keys the records so iteration order is deterministic, the
/// same stable-by-key order the real store uses.
#[derive(Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<BTreeMap<String, NotificationRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a record under the given id.
    pub async fn insert(&self, id: impl Into<String>, record: NotificationRecord) {
        let mut records = self.records.lock().await;
        records.insert(id.into(), record);
    }

    /// Fetch one record by id.
    pub async fn get(&self, id: &str) -> Option<NotificationRecord> {
        let records = self.records.lock().await;
        records.get(id).cloned()
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn fetch_unsent(&self) -> Result<Vec<PendingNotification>, HeraldError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|(_, record)| !record.sent)
            .map(|(id, record)| PendingNotification::new(id.as_str(), record.clone()))
            .collect())
    }

    async fn mark_sent(&self, id: &RecordId) -> Result<MarkOutcome, HeraldError> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(id.as_str())
            .ok_or_else(|| HeraldError::Store(format!("no record with id {id}")))?;

        if record.sent {
            return Ok(MarkOutcome::AlreadySent);
        }
        record.sent = true;
        Ok(MarkOutcome::Marked)
    }
}
