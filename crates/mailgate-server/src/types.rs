//! Request and response bodies

use serde::{Deserialize, Serialize};

use mailgate_gmail::SendResult;

/// JSON payload for `POST /send`
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    /// Sender address; defaults to the delegated user when omitted
    pub sender: Option<String>,
    /// Recipient addresses
    pub to: Vec<String>,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
}

/// Success body: provider message id plus the labels it was filed under.
/// The mixed snake/camel naming is the published wire contract.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub message_id: String,
    #[serde(rename = "labelIds")]
    pub label_ids: Vec<String>,
}

impl From<SendResult> for SendResponse {
    fn from(result: SendResult) -> Self {
        Self {
            message_id: result.id,
            label_ids: result.label_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_keeps_the_mixed_field_naming() {
        let response = SendResponse {
            message_id: "18c2ab".to_string(),
            label_ids: vec!["SENT".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"message_id":"18c2ab","labelIds":["SENT"]}"#);
    }

    #[test]
    fn request_accepts_minimal_payloads() {
        let request: SendEmailRequest = serde_json::from_str(
            r#"{"to": ["rcpt@example.com"], "subject": "hi", "html_body": "<p>hi</p>"}"#,
        )
        .unwrap();

        assert!(request.sender.is_none());
        assert_eq!(request.to, vec!["rcpt@example.com"]);
        assert!(request.text_body.is_none());
        assert!(request.cc.is_none());
        assert!(request.bcc.is_none());
    }
}
