//! OAuth2 access tokens for the Firebase REST APIs.
//!
//! Service-account flow: sign a short-lived RS256 JWT assertion with the
//! account's private key, exchange it at the token endpoint, cache the
//! access token until shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::HeraldError;

use super::credentials::ServiceAccount;

/// Messaging for FCM, database for RTDB, email because the database REST
/// API requires it for OAuth callers.
const SCOPES: &str = "https://www.googleapis.com/auth/firebase.messaging \
                      https://www.googleapis.com/auth/firebase.database \
                      https://www.googleapis.com/auth/userinfo.email";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime requested from the token endpoint.
const ASSERTION_LIFETIME_MINS: i64 = 60;

/// Refresh this long before the cached token actually expires.
const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_LEEWAY_SECS) < self.expires_at
    }
}

/// Issues and caches access tokens for one service account.
///
/// Shared by the store and the sender; the `Mutex` serializes refreshes so
/// the token endpoint is hit at most once per expiry window.
pub struct AccessTokenProvider {
    account: ServiceAccount,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl AccessTokenProvider {
    pub fn new(account: ServiceAccount, http: reqwest::Client) -> Self {
        Self {
            account,
            http,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, exchanging a fresh assertion if the
    /// cached one is stale or absent.
    pub async fn token(&self) -> Result<String, HeraldError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.value.clone());
        }

        let assertion = self.signed_assertion(now)?;
        let response = self
            .http
            .post(&self.account.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HeraldError::Token(format!("{status}: {body}")));
        }

        let token: TokenResponse = response.json().await?;
        let entry = CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let value = entry.value.clone();
        *cached = Some(entry);
        Ok(value)
    }

    fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, HeraldError> {
        let claims = Claims {
            iss: &self.account.client_email,
            scope: SCOPES,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ASSERTION_LIFETIME_MINS)).timestamp(),
        };

        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .map_err(|err| HeraldError::Token(format!("invalid private key: {err}")))?;

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|err| HeraldError::Token(format!("failed to sign assertion: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use crate::firebase::testutil;

    use super::*;

    #[tokio::test]
    async fn exchanges_a_signed_assertion_for_an_access_token() {
        let mut server = Server::new_async().await;
        let endpoint = testutil::mock_token_endpoint(&mut server).await;

        let provider = testutil::token_provider(
            reqwest::Client::new(),
            &format!("{}/token", server.url()),
        );

        let token = provider.token().await.unwrap();

        assert_eq!(token, "test-token");
        endpoint.assert_async().await;
    }

    #[tokio::test]
    async fn caches_the_token_across_calls() {
        let mut server = Server::new_async().await;
        // A fresh token is good for an hour; the second call must not
        // touch the endpoint again.
        let endpoint = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "test-token", "expires_in": 3600}"#)
            .expect(1)
            .create_async()
            .await;

        let provider = testutil::token_provider(
            reqwest::Client::new(),
            &format!("{}/token", server.url()),
        );

        provider.token().await.unwrap();
        let again = provider.token().await.unwrap();

        assert_eq!(again, "test-token");
        endpoint.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_from_the_token_endpoint_is_a_token_error() {
        let mut server = Server::new_async().await;
        let _endpoint = server
            .mock("POST", "/token")
            .with_status(500)
            .with_body("backend wobble")
            .create_async()
            .await;

        let provider = testutil::token_provider(
            reqwest::Client::new(),
            &format!("{}/token", server.url()),
        );

        let err = provider.token().await.unwrap_err();

        assert!(matches!(err, crate::error::HeraldError::Token(_)));
        assert!(err.to_string().contains("backend wobble"));
    }

    #[test]
    fn cached_token_is_fresh_inside_the_leeway_window() {
        let now = Utc::now();
        let token = CachedToken {
            value: "t".to_string(),
            expires_at: now + Duration::seconds(3600),
        };
        assert!(token.is_fresh(now));
    }

    #[test]
    fn cached_token_is_stale_close_to_expiry() {
        let now = Utc::now();
        let token = CachedToken {
            value: "t".to_string(),
            expires_at: now + Duration::seconds(EXPIRY_LEEWAY_SECS - 1),
        };
        assert!(!token.is_fresh(now));
    }

    #[test]
    fn claims_serialize_with_oauth_field_names() {
        let claims = Claims {
            iss: "job@demo.iam.gserviceaccount.com",
            scope: SCOPES,
            aud: "https://oauth2.googleapis.com/token",
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["iss"], "job@demo.iam.gserviceaccount.com");
        assert_eq!(value["aud"], "https://oauth2.googleapis.com/token");
        assert_eq!(value["iat"], 1_700_000_000);
        assert_eq!(value["exp"], 1_700_003_600);
        assert!(
            value["scope"]
                .as_str()
                .unwrap()
                .contains("firebase.messaging")
        );
    }
}
