//! Gmail API send client for Mailgate
//!
//! Exchanges a domain-wide-delegated service account key for a short-lived
//! access token (JWT bearer grant) and submits base64url-encoded RFC 5322
//! messages to the Gmail send endpoint on behalf of the delegated user.

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::{encode_raw, GmailClient};
pub use credentials::{fetch_access_token, ServiceAccountKey, SEND_SCOPE};
pub use error::{GmailError, GmailResult};
pub use types::*;
