//! Error types for message assembly

use thiserror::Error;

/// Result type for message assembly
pub type MailResult<T> = Result<T, MailError>;

/// Errors that can occur while assembling an outgoing message
#[derive(Debug, Error)]
pub enum MailError {
    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Attachment file could not be read
    #[error("Failed to read attachment: {0}")]
    AttachmentRead(String),

    /// Message building error
    #[error("Failed to build message: {0}")]
    MessageBuildError(String),
}
