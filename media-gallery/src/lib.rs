//! # Media Gallery
//!
//! Day-grouped media gallery core, independent of any UI toolkit.
//!
//! This crate provides:
//! - The media data model and day grouping (`group_by_day`)
//! - The [`MediaSource`] adapter contract with a directory backed and an
//!   Android media store implementation
//! - A view-model deciding when to refresh, with an async controller driving it
//! - Optional Dioxus components rendering the grouped view (`components` feature)
//!
//! ## Platform Separation
//!
//! Everything except [`picker`] is cross-platform. The Android bridge expects
//! the host activity to expose the media store, camera and permission calls
//! over JNI; on other platforms [`platform_source`] falls back to a directory.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use media_gallery::{platform_source, GalleryConfig, GalleryController, GalleryEvent, LifecycleSignal};
//!
//! let config = GalleryConfig::default();
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut controller = GalleryController::new(platform_source(&config), &config);
//!
//! tx.send(GalleryEvent::Lifecycle(LifecycleSignal::Mount))?;
//! controller.run(rx, |snapshot| render(snapshot)).await;
//! ```

pub mod config;
pub mod controller;
pub mod grouping;
pub mod library;
pub mod lifecycle;
pub mod models;
pub mod picker;
pub mod source;
pub mod view_model;

#[cfg(feature = "components")]
pub mod components;

pub use config::{ConfigError, GalleryConfig};
pub use controller::GalleryController;
pub use grouping::{flatten, group_by_day, DayLabeler, DayZone};
pub use library::DirectoryMediaSource;
pub use lifecycle::{AppPhase, LifecycleSignal, LifecycleTracker};
pub use models::{CaptureMode, CaptureOutcome, DayGroup, MediaKind, MediaRecord};
pub use picker::{parse_media_rows, AndroidPickerConfig, PickerError};
pub use source::{MediaSource, MediaSourceError};
pub use view_model::{
    Effect, GalleryEvent, GallerySnapshot, GalleryViewModel, Notice, RefreshDecision,
    RefreshOutcome, RefreshState,
};

#[cfg(target_os = "android")]
pub use picker::AndroidMediaSource;

#[cfg(feature = "components")]
pub use components::{
    load_media_data, mime_type, DayGroupList, DayGroupSection, FullscreenMedia, MediaThumbnail,
};

/// Media source for the current target: the media store on Android
#[cfg(target_os = "android")]
pub fn platform_source(config: &GalleryConfig) -> AndroidMediaSource {
    AndroidMediaSource::new(config.android.clone())
}

/// Media source for the current target: `library_path` off Android
#[cfg(not(target_os = "android"))]
pub fn platform_source(config: &GalleryConfig) -> DirectoryMediaSource {
    DirectoryMediaSource::new(&config.library_path)
}
