use thiserror::Error;

#[derive(Debug, Error)]
pub enum GmailError {
    #[error("Failed to read service account key: {0}")]
    KeyFile(String),

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Gmail API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

pub type GmailResult<T> = Result<T, GmailError>;
