use serde::{Deserialize, Serialize};

/// Request body for the Gmail send endpoint
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    /// base64url-encoded RFC 5322 message
    pub raw: String,
}

/// Response from the Gmail send endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SendResult {
    /// Provider-assigned message id
    pub id: String,
    /// Labels applied to the accepted message
    #[serde(rename = "labelIds", default)]
    pub label_ids: Vec<String>,
    /// Conversation thread the message was filed under
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
}

/// Response from the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}
