//! Realtime Database store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{NotificationRecord, PendingNotification, RecordId};
use crate::error::HeraldError;
use crate::ports::{MarkOutcome, NotificationStore};

use super::token::AccessTokenProvider;

/// [`NotificationStore`] over the Realtime Database REST API.
///
/// - The unsent query is a server-side equality filter on `sent` (the
///   database rules need an `".indexOn": "sent"` entry on the collection).
/// - `mark_sent` is an ETag read followed by a conditional `PUT`, so the
///   flag flips `false -> true` exactly once even under overlapping runs.
pub struct RtdbStore {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    tokens: Arc<AccessTokenProvider>,
}

impl RtdbStore {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        collection: impl Into<String>,
        tokens: Arc<AccessTokenProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            collection: collection.into(),
            tokens,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.collection)
    }

    fn flag_url(&self, id: &RecordId) -> String {
        format!("{}/{}/{}/sent.json", self.base_url, self.collection, id)
    }
}

async fn success_or_store_error(
    response: reqwest::Response,
) -> Result<reqwest::Response, HeraldError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(HeraldError::Store(format!("{status}: {body}")))
}

#[async_trait]
impl NotificationStore for RtdbStore {
    async fn fetch_unsent(&self) -> Result<Vec<PendingNotification>, HeraldError> {
        let token = self.tokens.token().await?;

        let response = self
            .http
            .get(self.collection_url())
            .query(&[
                ("orderBy", "\"sent\""),
                ("equalTo", "false"),
                ("access_token", token.as_str()),
            ])
            .send()
            .await?;
        let response = success_or_store_error(response).await?;

        // The database answers `null` when nothing matches.
        let body: Option<BTreeMap<String, NotificationRecord>> = response.json().await?;
        Ok(body
            .unwrap_or_default()
            .into_iter()
            .map(|(id, record)| PendingNotification::new(id.as_str(), record))
            .collect())
    }

    async fn mark_sent(&self, id: &RecordId) -> Result<MarkOutcome, HeraldError> {
        let token = self.tokens.token().await?;
        let url = self.flag_url(id);

        let read = self
            .http
            .get(&url)
            .query(&[("access_token", token.as_str())])
            .header("X-Firebase-ETag", "true")
            .send()
            .await?;
        let read = success_or_store_error(read).await?;

        let etag = read
            .headers()
            .get("ETag")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| HeraldError::Store(format!("no ETag reading {url}")))?;

        let current: Option<bool> = read.json().await?;
        if current == Some(true) {
            return Ok(MarkOutcome::AlreadySent);
        }

        let write = self
            .http
            .put(&url)
            .query(&[("access_token", token.as_str())])
            .header("if-match", etag)
            .json(&true)
            .send()
            .await?;

        // 412 means another writer got there first since our ETag read.
        if write.status() == StatusCode::PRECONDITION_FAILED {
            return Ok(MarkOutcome::AlreadySent);
        }
        success_or_store_error(write).await?;
        Ok(MarkOutcome::Marked)
    }
}
