//! Media source adapter contract
//!
//! A [`MediaSource`] hides the host media library, camera capture and
//! permission APIs behind three operations. The view-model never talks to the
//! host directly.

use crate::models::{CaptureMode, CaptureOutcome, MediaRecord};
use crate::picker::PickerError;

/// Failure of a media source call
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSourceError {
    /// Caller lacks authorization to read or capture media
    PermissionDenied(String),
    /// Any lower-level failure; eligible for retry
    SourceUnavailable(String),
}

impl std::fmt::Display for MediaSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSourceError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            MediaSourceError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
        }
    }
}

impl std::error::Error for MediaSourceError {}

impl From<std::io::Error> for MediaSourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                MediaSourceError::PermissionDenied(err.to_string())
            }
            _ => MediaSourceError::SourceUnavailable(err.to_string()),
        }
    }
}

impl From<PickerError> for MediaSourceError {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::PermissionDenied(msg) => MediaSourceError::PermissionDenied(msg),
            other => MediaSourceError::SourceUnavailable(other.to_string()),
        }
    }
}

/// Host media library, camera and permission broker
#[allow(async_fn_in_trait)]
pub trait MediaSource {
    /// Up to `limit` most recent records. Repeatable, no side effects.
    async fn list_recent(&self, limit: usize) -> Result<Vec<MediaRecord>, MediaSourceError>;

    /// Runs the interactive capture flow.
    ///
    /// The captured asset is persisted into the host library, but
    /// `list_recent` is not guaranteed to reflect it immediately.
    async fn capture(&self, mode: CaptureMode) -> Result<CaptureOutcome, MediaSourceError>;

    /// Checks authorization and, only if missing, asks the user once
    async fn check_and_request_access(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            MediaSourceError::from(denied),
            MediaSourceError::PermissionDenied(_)
        ));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            MediaSourceError::from(missing),
            MediaSourceError::SourceUnavailable(_)
        ));
    }

    #[test]
    fn test_picker_error_mapping() {
        assert_eq!(
            MediaSourceError::from(PickerError::PermissionDenied("camera".into())),
            MediaSourceError::PermissionDenied("camera".into())
        );
        assert_eq!(
            MediaSourceError::from(PickerError::Timeout("slow".into())),
            MediaSourceError::SourceUnavailable("Timeout: slow".into())
        );
    }
}
