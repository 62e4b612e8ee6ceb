//! Directory backed media source
//!
//! Treats a plain directory as the host media library: every regular file
//! with a known photo or video extension is one record, dated by its
//! modification time.

use crate::models::{CaptureMode, CaptureOutcome, MediaKind, MediaRecord};
use crate::source::{MediaSource, MediaSourceError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone)]
pub struct DirectoryMediaSource {
    root: PathBuf,
}

impl DirectoryMediaSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Builds the record for one file, skipping it when its timestamp is unreadable
fn dated_record(
    path: &Path,
    kind: MediaKind,
    modified: std::io::Result<SystemTime>,
) -> Option<MediaRecord> {
    match modified {
        Ok(modified) => {
            let modified: DateTime<Utc> = modified.into();
            Some(MediaRecord::new(path.to_string_lossy(), kind, modified))
        }
        Err(e) => {
            log::warn!("Skipping {}, no modification time: {}", path.display(), e);
            None
        }
    }
}

fn scan(root: &Path) -> Result<Vec<MediaRecord>, MediaSourceError> {
    let mut records = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let Some(kind) = MediaKind::from_extension(&path) else {
            continue;
        };
        let metadata = match entry.metadata() {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        records.extend(dated_record(&path, kind, metadata.modified()));
    }

    Ok(records)
}

fn readable(root: &Path) -> bool {
    match std::fs::read_dir(root) {
        Ok(_) => true,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            log::warn!("No read access to {}: {}", root.display(), e);
            false
        }
        // Missing library is reported by list_recent, not as a permission problem
        Err(_) => true,
    }
}

/// Runs filesystem work off the async task
async fn run_blocking<T, F>(f: F) -> Result<T, MediaSourceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, MediaSourceError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MediaSourceError::SourceUnavailable(format!("Scan task failed: {}", e)))?
}

impl MediaSource for DirectoryMediaSource {
    async fn list_recent(&self, limit: usize) -> Result<Vec<MediaRecord>, MediaSourceError> {
        let root = self.root.clone();
        let mut records = run_blocking(move || scan(&root)).await?;
        // Newest first; uri breaks ties so equal timestamps list stably
        records.sort_by(|a, b| {
            b.captured_at
                .cmp(&a.captured_at)
                .then_with(|| a.uri.cmp(&b.uri))
        });
        records.truncate(limit);
        log::debug!(
            "Listed {} records from {}",
            records.len(),
            self.root.display()
        );
        Ok(records)
    }

    async fn capture(&self, mode: CaptureMode) -> Result<CaptureOutcome, MediaSourceError> {
        log::warn!("Capture ({:?}) requested but no camera is available", mode);
        Err(MediaSourceError::SourceUnavailable(
            "Camera not available on this platform".to_string(),
        ))
    }

    async fn check_and_request_access(&self) -> bool {
        let root = self.root.clone();
        match run_blocking(move || Ok(readable(&root))).await {
            Ok(readable) => readable,
            Err(e) => {
                log::error!("Access check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "media-gallery-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, name: &str, age_secs: u64) {
        let file = File::create(dir.join(name)).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
    }

    #[tokio::test]
    async fn test_lists_newest_first_with_limit() {
        let dir = test_dir("newest");
        touch(&dir, "old.jpg", 3000);
        touch(&dir, "mid.mp4", 2000);
        touch(&dir, "new.png", 1000);
        touch(&dir, "notes.txt", 10);
        std::fs::create_dir(dir.join("nested.jpg")).unwrap();

        let source = DirectoryMediaSource::new(&dir);
        let all = source.list_recent(10).await.unwrap();
        let names: Vec<String> = all
            .iter()
            .map(|r| {
                Path::new(&r.uri)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["new.png", "mid.mp4", "old.jpg"]);
        assert_eq!(all[1].kind, MediaKind::Video);

        let limited = source.list_recent(2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0], all[0]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unreadable_timestamp_skips_only_that_file() {
        let path = Path::new("/library/a.jpg");
        let missing = std::io::Error::new(std::io::ErrorKind::Unsupported, "no mtime");
        assert_eq!(dated_record(path, MediaKind::Photo, Err(missing)), None);

        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_709_460_000);
        let record = dated_record(path, MediaKind::Photo, Ok(at)).unwrap();
        assert_eq!(record.uri, "/library/a.jpg");
        assert_eq!(record.captured_at.timestamp(), 1_709_460_000);
    }

    #[tokio::test]
    async fn test_missing_directory_is_unavailable() {
        let source = DirectoryMediaSource::new(test_dir("missing").join("nope"));
        assert!(source.check_and_request_access().await);
        assert!(matches!(
            source.list_recent(5).await,
            Err(MediaSourceError::SourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_capture_is_unavailable() {
        let source = DirectoryMediaSource::new(test_dir("capture"));
        assert!(matches!(
            source.capture(CaptureMode::Photo).await,
            Err(MediaSourceError::SourceUnavailable(_))
        ));
    }
}
