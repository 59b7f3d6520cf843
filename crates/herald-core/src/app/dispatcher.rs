//! The dispatch loop: fetch unsent records, send, flip the flag.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{PendingNotification, PushMessage};
use crate::error::HeraldError;
use crate::ports::{MarkOutcome, NotificationStore, PushSender};

use super::summary::DispatchSummary;

/// What happened to one record.
enum RecordOutcome {
    Sent,
    SkippedNoToken,
    AlreadyMarked,
}

/// Dispatches pending order notifications, one record at a time.
///
/// Both clients are injected at construction; the dispatcher holds no other
/// state, so one instance maps to one scheduled run.
///
/// Design intent:
/// - The store query excludes sent records, so a clean second run is a no-op.
/// - Failures are isolated per record: a send error is logged and counted,
///   and the loop continues with the next record. Only the initial query can
///   fail the whole run.
/// - No internal retry. A record that fails stays unsent and is picked up by
///   the next scheduled invocation.
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    sender: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn NotificationStore>, sender: Arc<dyn PushSender>) -> Self {
        Self { store, sender }
    }

    /// Run one dispatch pass over the unsent set.
    pub async fn run(&self) -> Result<DispatchSummary, HeraldError> {
        let pending = self.store.fetch_unsent().await?;

        if pending.is_empty() {
            info!("no notifications to send");
            return Ok(DispatchSummary::default());
        }

        let mut summary = DispatchSummary {
            fetched: pending.len(),
            ..DispatchSummary::default()
        };

        // Strictly sequential, in the order the store returned them.
        for notification in &pending {
            match self.dispatch_one(notification).await {
                Ok(RecordOutcome::Sent) => summary.sent += 1,
                Ok(RecordOutcome::SkippedNoToken) => summary.skipped_no_token += 1,
                Ok(RecordOutcome::AlreadyMarked) => summary.already_marked += 1,
                Err(err) => {
                    warn!(record_id = %notification.id, error = %err, "record failed, continuing");
                    summary.failed += 1;
                }
            }
        }

        info!(
            fetched = summary.fetched,
            sent = summary.sent,
            skipped_no_token = summary.skipped_no_token,
            already_marked = summary.already_marked,
            failed = summary.failed,
            "dispatch pass finished"
        );

        Ok(summary)
    }

    async fn dispatch_one(
        &self,
        notification: &PendingNotification,
    ) -> Result<RecordOutcome, HeraldError> {
        let Some(token) = notification.record.fcm_token.as_deref() else {
            info!(record_id = %notification.id, "skipping notification: no fcm token");
            return Ok(RecordOutcome::SkippedNoToken);
        };

        let message = PushMessage::from_record(token, &notification.record);
        let receipt = self.sender.send(&message).await?;

        info!(record_id = %notification.id, receipt = %receipt, "notification sent");

        match self.store.mark_sent(&notification.id).await? {
            MarkOutcome::Marked => Ok(RecordOutcome::Sent),
            MarkOutcome::AlreadySent => {
                // Another invocation marked it between our query and our
                // send; the device may have received the message twice.
                warn!(record_id = %notification.id, "record already marked sent; possible duplicate delivery");
                Ok(RecordOutcome::AlreadyMarked)
            }
        }
    }
}
