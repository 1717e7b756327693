//! Attachment inputs and content-type resolution

use std::path::{Path, PathBuf};

use crate::{MailError, MailResult};

/// Fallback type for payloads whose content type cannot be determined
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extensions that name a compression transform rather than a content type.
/// Platform MIME tables report these as an encoding layered over the inner
/// type; an attachment is one opaque payload, so these go out as generic
/// binary instead.
const ENCODED_EXTENSIONS: &[&str] = &["br", "bz2", "gz", "svgz", "taz", "tgz", "xz", "z", "zst"];

/// Content types by filename extension, matched case-insensitively. The table
/// is the whole mapping: anything outside it resolves to [`OCTET_STREAM`],
/// and no platform MIME registry is ever consulted.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("7z", "application/x-7z-compressed"),
    ("avif", "image/avif"),
    ("bin", OCTET_STREAM),
    ("bmp", "image/bmp"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("eml", "message/rfc822"),
    ("gif", "image/gif"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/vnd.microsoft.icon"),
    ("ics", "text/calendar"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ogg", "audio/ogg"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("rtf", "application/rtf"),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("tsv", "text/tab-separated-values"),
    ("txt", "text/plain"),
    ("vcf", "text/vcard"),
    ("wav", "audio/wav"),
    ("webm", "video/webm"),
    ("webp", "image/webp"),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xml", "text/xml"),
    ("zip", "application/zip"),
];

/// An attachment to include in an outgoing message
#[derive(Debug, Clone)]
pub enum OutgoingAttachment {
    /// A file on the local filesystem; bytes are read at build time and the
    /// filename is the path's final segment
    FileRef { path: PathBuf },
    /// An in-memory payload with an optional declared content type
    InMemory {
        filename: String,
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

/// An attachment with its bytes loaded and its content type decided
#[derive(Debug, Clone)]
pub struct ResolvedAttachment {
    /// Filename to display
    pub filename: String,
    /// Full MIME type (e.g., "application/pdf")
    pub content_type: String,
    /// Raw file data
    pub data: Vec<u8>,
}

impl OutgoingAttachment {
    /// Reference a file on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::FileRef { path: path.into() }
    }

    /// Wrap an in-memory payload, optionally with a declared content type
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::InMemory {
            filename: filename.into(),
            content_type,
            data,
        }
    }

    /// Load the payload bytes and decide the content type.
    ///
    /// A declared content type wins outright; otherwise the type is inferred
    /// from the filename extension, falling back to
    /// `application/octet-stream` when the extension is unknown or names a
    /// compression transform. A file that cannot be read is an error.
    pub fn resolve(&self) -> MailResult<ResolvedAttachment> {
        match self {
            Self::FileRef { path } => {
                let data = std::fs::read(path)
                    .map_err(|e| MailError::AttachmentRead(format!("{}: {}", path.display(), e)))?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let content_type = infer_content_type(&filename);
                Ok(ResolvedAttachment {
                    filename,
                    content_type,
                    data,
                })
            }
            Self::InMemory {
                filename,
                content_type,
                data,
            } => Ok(ResolvedAttachment {
                filename: filename.clone(),
                content_type: resolve_content_type(filename, content_type.as_deref()),
                data: data.clone(),
            }),
        }
    }
}

fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    match declared {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => infer_content_type(filename),
    }
}

fn infer_content_type(filename: &str) -> String {
    let Some(extension) = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
    else {
        return OCTET_STREAM.to_string();
    };

    if ENCODED_EXTENSIONS.contains(&extension.as_str()) {
        return OCTET_STREAM.to_string();
    }

    EXTENSION_TYPES
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, content_type)| (*content_type).to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
