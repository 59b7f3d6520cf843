//! FCM HTTP v1 sender implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::PushMessage;
use crate::error::HeraldError;
use crate::ports::{DeliveryReceipt, PushSender};

use super::token::AccessTokenProvider;

/// Wire shape of one send call: the message nests under a `message` key.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    /// `projects/{project}/messages/{message_id}`.
    name: String,
}

/// [`PushSender`] over the FCM HTTP v1 API.
pub struct FcmSender {
    http: reqwest::Client,
    endpoint: String,
    tokens: Arc<AccessTokenProvider>,
}

impl FcmSender {
    pub fn new(
        http: reqwest::Client,
        project_id: &str,
        tokens: Arc<AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            endpoint: format!("https://fcm.googleapis.com/v1/projects/{project_id}/messages:send"),
            tokens,
        }
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send(&self, message: &PushMessage) -> Result<DeliveryReceipt, HeraldError> {
        let token = self.tokens.token().await?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&SendRequest { message })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HeraldError::Push(format!("{status}: {body}")));
        }

        let receipt: SendResponse = response.json().await?;
        Ok(DeliveryReceipt::new(receipt.name))
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use crate::domain::NotificationRecord;
    use crate::firebase::testutil;

    use super::*;

    fn mock_sender(server: &Server) -> FcmSender {
        let http = reqwest::Client::new();
        let tokens = testutil::token_provider(http.clone(), &format!("{}/token", server.url()));
        FcmSender::new(http, "demo", tokens).with_endpoint(format!(
            "{}/v1/projects/demo/messages:send",
            server.url()
        ))
    }

    #[tokio::test]
    async fn send_returns_the_provider_receipt() {
        let mut server = Server::new_async().await;
        let _token = testutil::mock_token_endpoint(&mut server).await;
        let send = server
            .mock("POST", "/v1/projects/demo/messages:send")
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "message": {"token": "tok-1"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "projects/demo/messages/0:12345"}"#)
            .create_async()
            .await;

        let message = PushMessage::from_record("tok-1", &NotificationRecord::default());
        let receipt = mock_sender(&server).send(&message).await.unwrap();

        assert_eq!(receipt.as_str(), "projects/demo/messages/0:12345");
        send.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_send_is_a_push_error() {
        let mut server = Server::new_async().await;
        let _token = testutil::mock_token_endpoint(&mut server).await;
        let _send = server
            .mock("POST", "/v1/projects/demo/messages:send")
            .with_status(404)
            .with_body(r#"{"error": {"status": "UNREGISTERED"}}"#)
            .create_async()
            .await;

        let message = PushMessage::from_record("tok-gone", &NotificationRecord::default());
        let err = mock_sender(&server).send(&message).await.unwrap_err();

        assert!(matches!(err, HeraldError::Push(_)));
        assert!(err.to_string().contains("UNREGISTERED"));
    }

    #[test]
    fn send_request_nests_the_message() {
        let record = NotificationRecord {
            order_id: Some("ord-42".to_string()),
            ..NotificationRecord::default()
        };
        let message = PushMessage::from_record("tok-1", &record);

        let body = serde_json::to_value(SendRequest { message: &message }).unwrap();

        assert_eq!(body["message"]["token"], "tok-1");
        assert_eq!(body["message"]["notification"]["title"], "🛎 New Order!");
        assert_eq!(body["message"]["notification"]["body"], "New order placed.");
        assert_eq!(body["message"]["data"]["orderId"], "ord-42");
        assert_eq!(body["message"]["data"]["type"], "");
    }

    #[test]
    fn endpoint_targets_the_project() {
        let http = reqwest::Client::new();
        let tokens = testutil::token_provider(http.clone(), "https://example.com/token");

        let sender = FcmSender::new(http, "demo", tokens);
        assert_eq!(
            sender.endpoint,
            "https://fcm.googleapis.com/v1/projects/demo/messages:send"
        );
    }
}
