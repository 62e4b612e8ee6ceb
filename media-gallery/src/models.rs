use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of asset behind a [`MediaRecord`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    /// Freshly captured item whose kind the capture call did not report
    Unknown,
}

impl MediaKind {
    /// Maps a host type string ("image", "image/jpeg", "video/mp4", ...) to a kind
    pub fn from_host_type(host_type: &str) -> Self {
        let lower = host_type.trim().to_ascii_lowercase();
        if lower.starts_with("image") || lower.starts_with("photo") {
            MediaKind::Photo
        } else if lower.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Unknown
        }
    }

    /// Guesses the kind from a file extension, `None` for files that are not media
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "webp" | "gif" | "heic" | "heif" | "bmp" => {
                Some(MediaKind::Photo)
            }
            "mp4" | "mov" | "m4v" | "webm" | "mkv" | "3gp" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// One item in the gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRecord {
    /// Opaque locator for the underlying asset. Duplicates are distinct items.
    pub uri: String,
    pub kind: MediaKind,
    /// Used for grouping only, never for dedup
    pub captured_at: DateTime<Utc>,
}

impl MediaRecord {
    pub fn new(uri: impl Into<String>, kind: MediaKind, captured_at: DateTime<Utc>) -> Self {
        Self {
            uri: uri.into(),
            kind,
            captured_at,
        }
    }
}

/// Records sharing one day label, in source order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayGroup {
    pub label: String,
    pub items: Vec<MediaRecord>,
}

/// Capture flow to run on the host camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Photo,
    Video,
}

/// Result of a capture flow that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(MediaRecord),
    /// User dismissed the capture UI without producing an asset
    Cancelled,
}
