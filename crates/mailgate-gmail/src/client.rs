use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use tracing::{debug, info};

use crate::credentials::{fetch_access_token, ServiceAccountKey};
use crate::error::{GmailError, GmailResult};
use crate::types::{SendMessageRequest, SendResult};

const GMAIL_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

/// Encode a serialized RFC 5322 message for the `{"raw": ...}` envelope.
///
/// URL-safe base64 with padding kept; decoding the result reproduces the
/// exact message bytes.
pub fn encode_raw(message: &[u8]) -> String {
    URL_SAFE.encode(message)
}

/// Client for the Gmail send endpoint, acting as one delegated user
pub struct GmailClient {
    client: reqwest::Client,
    access_token: String,
}

impl GmailClient {
    /// Wrap an already-obtained access token
    pub fn new(access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
        }
    }

    /// Exchange service account credentials for a delegated access token and
    /// build a client around it. Constructed fresh per send; no caching.
    pub async fn for_delegated_user(
        key: &ServiceAccountKey,
        delegated_user: &str,
    ) -> GmailResult<Self> {
        let access_token = fetch_access_token(key, delegated_user).await?;
        Ok(Self::new(access_token))
    }

    /// Submit a serialized message as the authenticated user
    pub async fn send_raw(&self, message: &[u8]) -> GmailResult<SendResult> {
        let url = format!("{}/users/me/messages/send", GMAIL_BASE);
        let request = SendMessageRequest {
            raw: encode_raw(message),
        };
        debug!("Gmail: sending message, {} serialized bytes", message.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GmailError::ApiError { status, body });
        }

        let result: SendResult = response
            .json()
            .await
            .map_err(|e| GmailError::ParseError(e.to_string()))?;

        info!("Gmail: message {} accepted", result.id);
        Ok(result)
    }
}
