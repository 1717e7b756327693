//! Request handlers

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use mailgate_gmail::{GmailClient, ServiceAccountKey};
use mailgate_message::{build_message, parse_recipients, OutgoingMessage};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::form::SendForm;
use crate::types::{SendEmailRequest, SendResponse};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `POST /send` - JSON body, no file attachments
pub async fn send_json(
    State(config): State<Arc<ServerConfig>>,
    Json(payload): Json<SendEmailRequest>,
) -> ServerResult<Json<SendResponse>> {
    let (text_body, html_body) = resolve_bodies(payload.text_body, payload.html_body)?;
    let sender = resolve_sender(payload.sender, &config)?;

    let mut message = OutgoingMessage::new(sender, payload.subject, html_body);
    if let Some(text) = text_body {
        message = message.text(text);
    }
    for to in payload.to {
        message = message.to(to);
    }
    for cc in payload.cc.unwrap_or_default() {
        message = message.cc(cc);
    }
    for bcc in payload.bcc.unwrap_or_default() {
        message = message.bcc(bcc);
    }

    relay(&config, message).await
}

/// `POST /send-form` - multipart form with optional file attachments.
/// `to`, `cc`, and `bcc` arrive as free-form strings and go through the
/// recipient parser.
pub async fn send_form(
    State(config): State<Arc<ServerConfig>>,
    multipart: Multipart,
) -> ServerResult<Json<SendResponse>> {
    let mut form = SendForm::collect(multipart).await?;

    let to = form.to.take().ok_or(ServerError::MissingField("to"))?;
    let subject = form
        .subject
        .take()
        .ok_or(ServerError::MissingField("subject"))?;
    let (text_body, html_body) = resolve_bodies(form.text_body.take(), form.html_body.take())?;
    let sender = resolve_sender(form.sender.take(), &config)?;

    let mut message = OutgoingMessage::new(sender, subject, html_body);
    if let Some(text) = text_body {
        message = message.text(text);
    }
    for to in parse_recipients(&to) {
        message = message.to(to);
    }
    for cc in form.cc.as_deref().map(parse_recipients).unwrap_or_default() {
        message = message.cc(cc);
    }
    for bcc in form.bcc.as_deref().map(parse_recipients).unwrap_or_default() {
        message = message.bcc(bcc);
    }
    for attachment in form.attachments {
        message = message.attachment(attachment);
    }

    relay(&config, message).await
}

/// Build, serialize, and hand one message to the provider
async fn relay(
    config: &ServerConfig,
    message: OutgoingMessage,
) -> ServerResult<Json<SendResponse>> {
    let key_path = config
        .service_account_file
        .as_ref()
        .ok_or(ServerError::Config("SERVICE_ACCOUNT_FILE"))?;
    let delegated_user = config
        .delegated_user
        .as_deref()
        .ok_or(ServerError::Config("DELEGATED_USER"))?;

    let key = ServiceAccountKey::from_file(key_path)?;

    debug!(
        "relaying message from {}: {} to, {} cc, {} bcc, {} attachments",
        message.sender,
        message.to.len(),
        message.cc.len(),
        message.bcc.len(),
        message.attachments.len()
    );

    let raw = build_message(&message)?.formatted();

    let client = GmailClient::for_delegated_user(&key, delegated_user).await?;
    let result = client.send_raw(&raw).await?;

    info!("message accepted by provider as {}", result.id);
    Ok(Json(SendResponse::from(result)))
}

fn resolve_sender(sender: Option<String>, config: &ServerConfig) -> ServerResult<String> {
    sender
        .filter(|s| !s.is_empty())
        .or_else(|| config.delegated_user.clone())
        .ok_or(ServerError::Config("DELEGATED_USER"))
}

/// Effective bodies per the wire contract: empty strings count as absent,
/// and the HTML slot falls back to the text body when only text was given
fn resolve_bodies(
    text_body: Option<String>,
    html_body: Option<String>,
) -> ServerResult<(Option<String>, String)> {
    let text = text_body.filter(|t| !t.is_empty());
    let html = html_body.filter(|h| !h.is_empty());

    match (text, html) {
        (None, None) => Err(ServerError::MissingBody),
        (text, Some(html)) => Ok((text, html)),
        (Some(text), None) => Ok((Some(text.clone()), text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_bodies_pass_through() {
        let (text, html) = resolve_bodies(Some("hi".into()), Some("<p>hi</p>".into())).unwrap();
        assert_eq!(text.as_deref(), Some("hi"));
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn text_only_fills_the_html_slot() {
        let (text, html) = resolve_bodies(Some("hi".into()), None).unwrap();
        assert_eq!(text.as_deref(), Some("hi"));
        assert_eq!(html, "hi");
    }

    #[test]
    fn html_only_leaves_text_absent() {
        let (text, html) = resolve_bodies(None, Some("<p>hi</p>".into())).unwrap();
        assert!(text.is_none());
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert!(matches!(
            resolve_bodies(Some(String::new()), Some(String::new())),
            Err(ServerError::MissingBody)
        ));
        assert!(matches!(
            resolve_bodies(None, None),
            Err(ServerError::MissingBody)
        ));
    }

    #[test]
    fn explicit_sender_wins_over_the_delegated_default() {
        let config = ServerConfig {
            service_account_file: None,
            delegated_user: Some("delegate@corp.example".to_string()),
            bind_addr: "127.0.0.1:0".to_string(),
        };

        let sender = resolve_sender(Some("boss@corp.example".into()), &config).unwrap();
        assert_eq!(sender, "boss@corp.example");

        let fallback = resolve_sender(None, &config).unwrap();
        assert_eq!(fallback, "delegate@corp.example");

        let empty = resolve_sender(Some(String::new()), &config).unwrap();
        assert_eq!(empty, "delegate@corp.example");
    }

    #[test]
    fn missing_delegated_user_is_a_config_error() {
        let config = ServerConfig {
            service_account_file: None,
            delegated_user: None,
            bind_addr: "127.0.0.1:0".to_string(),
        };
        assert!(matches!(
            resolve_sender(None, &config),
            Err(ServerError::Config("DELEGATED_USER"))
        ));
    }
}
