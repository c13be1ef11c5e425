//! Media kinds and the accepted upload whitelist.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Kind of media submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A whitelisted media format: its kind, canonical MIME type and stored extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaFormat {
    pub kind: MediaKind,
    pub mime: &'static str,
    pub extension: &'static str,
}

/// Canonical formats, one per stored extension.
const FORMATS: &[MediaFormat] = &[
    MediaFormat { kind: MediaKind::Image, mime: "image/jpeg", extension: "jpg" },
    MediaFormat { kind: MediaKind::Image, mime: "image/png", extension: "png" },
    MediaFormat { kind: MediaKind::Image, mime: "image/gif", extension: "gif" },
    MediaFormat { kind: MediaKind::Image, mime: "image/webp", extension: "webp" },
    MediaFormat { kind: MediaKind::Video, mime: "video/mp4", extension: "mp4" },
    MediaFormat { kind: MediaKind::Video, mime: "video/webm", extension: "webm" },
    MediaFormat { kind: MediaKind::Video, mime: "video/quicktime", extension: "mov" },
    MediaFormat { kind: MediaKind::Video, mime: "video/x-msvideo", extension: "avi" },
    MediaFormat { kind: MediaKind::Audio, mime: "audio/mpeg", extension: "mp3" },
    MediaFormat { kind: MediaKind::Audio, mime: "audio/wav", extension: "wav" },
    MediaFormat { kind: MediaKind::Audio, mime: "audio/webm", extension: "weba" },
    MediaFormat { kind: MediaKind::Audio, mime: "audio/ogg", extension: "ogg" },
    MediaFormat { kind: MediaKind::Audio, mime: "audio/mp4", extension: "m4a" },
];

/// Accepted MIME types and the extension they are stored under.
const MIME_ALIASES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/pjpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
    ("video/x-msvideo", "avi"),
    ("video/avi", "avi"),
    ("audio/mpeg", "mp3"),
    ("audio/mp3", "mp3"),
    ("audio/wav", "wav"),
    ("audio/x-wav", "wav"),
    ("audio/wave", "wav"),
    ("audio/webm", "weba"),
    ("audio/ogg", "ogg"),
    ("audio/mp4", "m4a"),
    ("audio/x-m4a", "m4a"),
];

impl MediaFormat {
    /// Resolves a client-supplied MIME type against the whitelist.
    ///
    /// Parameters such as `; codecs=opus` are ignored and matching is
    /// case-insensitive.
    pub fn from_mime(mime: &str) -> Result<Self, ValidationError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        MIME_ALIASES
            .iter()
            .find(|(alias, _)| *alias == essence)
            .and_then(|(_, ext)| Self::from_extension(ext))
            .ok_or_else(|| ValidationError::unsupported_media_type(mime.trim()))
    }

    /// Looks up the canonical format for a stored file extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        FORMATS.iter().copied().find(|f| f.extension == extension)
    }

    /// All MIME types accepted for upload.
    pub fn accepted_mime_types() -> impl Iterator<Item = &'static str> {
        MIME_ALIASES.iter().map(|(mime, _)| *mime)
    }
}

/// Checks an upload size against the configured maximum (inclusive).
pub fn validate_upload_size(size_bytes: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if size_bytes == 0 {
        return Err(ValidationError::empty_field("file"));
    }
    if size_bytes > max_bytes {
        return Err(ValidationError::file_too_large(size_bytes, max_bytes));
    }
    Ok(())
}
