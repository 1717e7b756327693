//! Error responses for the HTTP surface

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use mailgate_gmail::GmailError;
use mailgate_message::MailError;

/// Result type for request handlers
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors a request can fail with
#[derive(Debug, Error)]
pub enum ServerError {
    /// Neither body variant was supplied
    #[error("Provide text_body or html_body")]
    MissingBody,

    /// A required form field is absent
    #[error("missing form field: {0}")]
    MissingField(&'static str),

    /// The multipart payload could not be read
    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    /// A required environment value is not configured
    #[error("{0} not set")]
    Config(&'static str),

    /// Message assembly failed
    #[error(transparent)]
    Mail(#[from] MailError),

    /// Credential exchange or the provider send failed
    #[error(transparent)]
    Gmail(#[from] GmailError),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MissingBody
            | ServerError::MissingField(_)
            | ServerError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            ServerError::Config(_) | ServerError::Mail(_) | ServerError::Gmail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed with {}: {}", status, self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
