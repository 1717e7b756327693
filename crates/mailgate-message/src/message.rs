//! MIME message assembly

use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::{MailError, MailResult, OutgoingAttachment, OCTET_STREAM};

/// Email message to send
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    /// Sender address
    pub sender: String,
    /// To addresses
    pub to: Vec<String>,
    /// CC addresses
    pub cc: Vec<String>,
    /// BCC addresses
    pub bcc: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Plain text body; when present and non-empty the message becomes a
    /// multipart/alternative with the HTML rendering last
    pub text_body: Option<String>,
    /// HTML body; the sole body part when no plain text is given
    pub html_body: String,
    /// File attachments
    pub attachments: Vec<OutgoingAttachment>,
}

impl OutgoingMessage {
    /// Create a new message builder
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            text_body: None,
            html_body: html_body.into(),
            attachments: Vec::new(),
        }
    }

    /// Add a To recipient
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a CC recipient
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a BCC recipient
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the plain text body
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Add an attachment
    pub fn attachment(mut self, attachment: OutgoingAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// The body tree before any attachment wrapping
enum BodyPart {
    Html(SinglePart),
    Alternative(MultiPart),
}

fn body_part(msg: &OutgoingMessage) -> BodyPart {
    match &msg.text_body {
        // Plain text first so clients preferring HTML pick the last
        // acceptable alternative
        Some(text) if !text.is_empty() => BodyPart::Alternative(
            MultiPart::alternative_plain_html(text.clone(), msg.html_body.clone()),
        ),
        _ => BodyPart::Html(SinglePart::html(msg.html_body.clone())),
    }
}

/// Build an RFC 5322 message from an [`OutgoingMessage`].
///
/// Headers: From, To (comma-joined), Cc/Bcc only when recipients were given,
/// Subject verbatim. The builder opts into keeping the Bcc header through
/// serialization; the provider derives delivery recipients from the submitted
/// headers and strips Bcc from delivered copies.
///
/// The caller is responsible for ensuring the message has body content; an
/// empty `html_body` with no text still builds, producing an empty HTML part.
pub fn build_message(msg: &OutgoingMessage) -> MailResult<Message> {
    // lettre drops Bcc after deriving the envelope unless told otherwise; the
    // provider reads delivery recipients from the serialized headers
    let mut builder = Message::builder()
        .keep_bcc()
        .from(parse_mailbox(&msg.sender)?)
        .subject(&msg.subject);

    for to in &msg.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    for cc in &msg.cc {
        builder = builder.cc(parse_mailbox(cc)?);
    }
    for bcc in &msg.bcc {
        builder = builder.bcc(parse_mailbox(bcc)?);
    }

    let message = if msg.attachments.is_empty() {
        match body_part(msg) {
            BodyPart::Html(part) => builder.singlepart(part),
            BodyPart::Alternative(part) => builder.multipart(part),
        }
    } else {
        let mut mixed = match body_part(msg) {
            BodyPart::Html(part) => MultiPart::mixed().singlepart(part),
            BodyPart::Alternative(part) => MultiPart::mixed().multipart(part),
        };

        for att in &msg.attachments {
            let resolved = att.resolve()?;
            // Parse the resolved type or default to application/octet-stream
            let content_type = resolved
                .content_type
                .parse::<ContentType>()
                .unwrap_or(ContentType::parse(OCTET_STREAM).unwrap());

            mixed = mixed
                .singlepart(Attachment::new(resolved.filename).body(resolved.data, content_type));
        }

        builder.multipart(mixed)
    }
    .map_err(|e| MailError::MessageBuildError(e.to_string()))?;

    Ok(message)
}

fn parse_mailbox(address: &str) -> MailResult<Mailbox> {
    address
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", address, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(msg: &OutgoingMessage) -> String {
        let built = build_message(msg).unwrap();
        String::from_utf8(built.formatted()).unwrap()
    }

    #[test]
    fn text_and_html_build_alternative_with_text_first() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .text("hi");
        let raw = formatted(&msg);

        assert!(raw.contains("multipart/alternative"));
        let plain = raw.find("text/plain").unwrap();
        let html = raw.find("text/html").unwrap();
        assert!(plain < html, "plain part must precede the HTML part");
    }

    #[test]
    fn html_only_is_a_single_part() {
        let msg =
            OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>").to("rcpt@example.com");
        let raw = formatted(&msg);

        assert!(!raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("<p>hi</p>"));
    }

    #[test]
    fn empty_text_body_counts_as_absent() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .text("");
        let raw = formatted(&msg);

        assert!(!raw.contains("multipart/alternative"));
    }

    #[test]
    fn recipients_join_into_one_header() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("a@x.com")
            .to("b@y.com");
        let raw = formatted(&msg);

        assert!(raw.contains("To: a@x.com, b@y.com"));
    }

    #[test]
    fn cc_and_bcc_headers_appear_only_when_given() {
        let bare = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com");
        let raw = formatted(&bare);
        assert!(!raw.contains("Cc:"));
        assert!(!raw.contains("Bcc:"));

        let full = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .cc("c1@example.com")
            .cc("c2@example.com")
            .bcc("hidden@example.com");
        let raw = formatted(&full);
        assert!(raw.contains("Cc: c1@example.com, c2@example.com"));
        assert!(raw.contains("Bcc: hidden@example.com"));
    }

    #[test]
    fn subject_is_used_verbatim() {
        let msg = OutgoingMessage::new("sender@example.com", "Quarterly report", "<p>hi</p>")
            .to("rcpt@example.com");
        assert!(formatted(&msg).contains("Subject: Quarterly report"));
    }

    #[test]
    fn attachments_become_mixed_siblings() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .text("hi")
            .attachment(OutgoingAttachment::from_bytes(
                "report.pdf",
                None,
                b"%PDF-1.4".to_vec(),
            ));
        let raw = formatted(&msg);

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("multipart/alternative"));
        let mixed = raw.find("multipart/mixed").unwrap();
        let alternative = raw.find("multipart/alternative").unwrap();
        assert!(mixed < alternative, "body nests inside the mixed wrapper");

        assert!(raw.contains("application/pdf"));
        assert!(raw.contains("Content-Disposition: attachment; filename=\"report.pdf\""));
    }

    #[test]
    fn declared_attachment_type_is_used_directly() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .attachment(OutgoingAttachment::from_bytes(
                "logo.bin",
                Some("image/png".into()),
                vec![0x89, 0x50],
            ));
        let raw = formatted(&msg);

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("image/png"));
    }

    #[test]
    fn unparseable_declared_type_defaults_to_octet_stream() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .attachment(OutgoingAttachment::from_bytes(
                "blob",
                Some("garbage".into()),
                vec![1],
            ));
        let raw = formatted(&msg);

        assert!(raw.contains(OCTET_STREAM));
    }

    #[test]
    fn declared_type_keeps_its_parameters() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>")
            .to("rcpt@example.com")
            .attachment(OutgoingAttachment::from_bytes(
                "notes.txt",
                Some("text/plain; charset=utf-8".into()),
                b"hi".to_vec(),
            ));
        let raw = formatted(&msg);

        assert!(raw.contains("Content-Type: text/plain; charset=utf-8"));
    }

    #[test]
    fn invalid_sender_is_rejected() {
        let msg = OutgoingMessage::new("not-an-address", "hello", "<p>hi</p>").to("rcpt@example.com");
        assert!(matches!(
            build_message(&msg),
            Err(MailError::InvalidAddress(_))
        ));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let msg = OutgoingMessage::new("sender@example.com", "hello", "<p>hi</p>").to("@@");
        assert!(matches!(
            build_message(&msg),
            Err(MailError::InvalidAddress(_))
        ));
    }
}
