//! Multipart form collection for `POST /send-form`

use axum::extract::Multipart;

use mailgate_message::OutgoingAttachment;

use crate::error::{ServerError, ServerResult};

/// Fields of the send form, collected in arrival order
#[derive(Debug, Default)]
pub struct SendForm {
    pub sender: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub attachments: Vec<OutgoingAttachment>,
}

impl SendForm {
    /// Drain an axum multipart stream into a form
    pub async fn collect(mut multipart: Multipart) -> ServerResult<Self> {
        let mut form = SendForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::InvalidForm(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "attachments" {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::InvalidForm(e.to_string()))?;
                form.push_attachment(filename, content_type, data.to_vec());
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ServerError::InvalidForm(e.to_string()))?;
            match name.as_str() {
                "sender" => form.sender = Some(value),
                "to" => form.to = Some(value),
                "subject" => form.subject = Some(value),
                "text_body" => form.text_body = Some(value),
                "html_body" => form.html_body = Some(value),
                "cc" => form.cc = Some(value),
                "bcc" => form.bcc = Some(value),
                // Unknown fields are ignored
                _ => {}
            }
        }

        Ok(form)
    }

    /// Queue an uploaded file. Parts without a filename are dropped; browsers
    /// submit an empty file part when the picker is left blank.
    pub fn push_attachment(
        &mut self,
        filename: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) {
        let Some(filename) = filename.filter(|name| !name.is_empty()) else {
            return;
        };
        self.attachments
            .push(OutgoingAttachment::from_bytes(filename, content_type, data));
    }
}
