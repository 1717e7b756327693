//! Message assembly for Mailgate
//!
//! Normalizes free-form recipient strings and assembles RFC 5322 MIME
//! messages (plain/HTML body alternatives plus typed attachments) ready to
//! hand off to the mail provider. Serialization and delivery are the
//! caller's concern; nothing here performs network I/O.

mod attachment;
mod error;
mod message;
mod recipients;

pub use attachment::{OutgoingAttachment, ResolvedAttachment, OCTET_STREAM};
pub use error::{MailError, MailResult};
pub use message::{build_message, OutgoingMessage};
pub use recipients::parse_recipients;
