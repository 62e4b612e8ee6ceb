//! Dioxus UI components for the day-grouped gallery
//!
//! Local files are loaded and inlined as data URLs, since the webview cannot
//! read arbitrary device paths. Videos get a placeholder tile.

use crate::models::{DayGroup, MediaKind, MediaRecord};
use dioxus::prelude::*;
use std::path::Path;

/// MIME type for inlining a local file, picked by extension
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("3gp") => "video/3gpp",
        _ => "application/octet-stream",
    }
}

/// Loads a local image file and converts it to a data URL
///
/// URIs that the webview can already display (`data:`, `http(s):`) are passed through.
/// Only file paths and `file://` URIs are read; `content://` URIs have no
/// filesystem path and yield `None`, as do video files.
pub fn load_media_data(uri: &str) -> Option<String> {
    use base64::{engine::general_purpose, Engine as _};

    if uri.starts_with("data:") || uri.starts_with("http://") || uri.starts_with("https://") {
        return Some(uri.to_string());
    }
    if uri.starts_with("content://") {
        log::debug!("Cannot inline content URI {}", uri);
        return None;
    }

    let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
    if MediaKind::from_extension(path) == Some(MediaKind::Video) {
        return None;
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to read media {}: {}", path.display(), e);
            return None;
        }
    };

    let encoded = general_purpose::STANDARD.encode(&bytes);
    Some(format!("data:{};base64,{}", mime_type(path), encoded))
}

#[derive(Debug, Clone)]
enum ImageLoadState {
    Loading,
    Loaded(String),
    Failed,
}

/// Square grid tile for one record
#[component]
pub fn MediaThumbnail(record: MediaRecord, on_select: EventHandler<String>) -> Element {
    let mut image_state = use_signal(|| ImageLoadState::Loading);
    let uri = record.uri.clone();
    let is_video = record.kind == MediaKind::Video;

    use_effect(use_reactive!(|(uri, is_video)| {
        if is_video {
            image_state.set(ImageLoadState::Failed);
        } else if let Some(data) = load_media_data(&uri) {
            image_state.set(ImageLoadState::Loaded(data));
        } else {
            image_state.set(ImageLoadState::Failed);
        }
    }));

    let placeholder = if is_video { "🎬" } else { "📷" };
    let select_uri = record.uri.clone();

    rsx! {
        div {
            style: "aspect-ratio: 1/1; margin: 2px; overflow: hidden; background: #1a1a1a; cursor: pointer;",
            onclick: move |_| on_select.call(select_uri.clone()),
            match image_state() {
                ImageLoadState::Loading => rsx! {
                    div {
                        style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #666;",
                        "⏳"
                    }
                },
                ImageLoadState::Loaded(url) => rsx! {
                    img {
                        src: "{url}",
                        style: "width: 100%; height: 100%; object-fit: cover;",
                    }
                },
                ImageLoadState::Failed => rsx! {
                    div {
                        style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #666; font-size: 28px;",
                        "{placeholder}"
                    }
                },
            }
        }
    }
}

/// Day header plus a four column grid of its items
#[component]
pub fn DayGroupSection(group: DayGroup, on_select: EventHandler<String>) -> Element {
    rsx! {
        div {
            h3 {
                style: "font-size: 18px; padding: 10px 20px; margin: 0; color: white; font-weight: 500;",
                "{group.label}"
            }
            div {
                style: "display: grid; grid-template-columns: repeat(4, 1fr);",
                for (idx, record) in group.items.iter().enumerate() {
                    MediaThumbnail {
                        key: "{record.uri}{idx}",
                        record: record.clone(),
                        on_select,
                    }
                }
            }
        }
    }
}

/// All day groups, or an empty state
#[component]
pub fn DayGroupList(
    groups: Vec<DayGroup>,
    on_select: EventHandler<String>,
    #[props(default = "No photos available".to_string())] empty_text: String,
) -> Element {
    if groups.is_empty() {
        return rsx! {
            div {
                style: "font-size: 18px; color: #fff; text-align: center; margin-top: 20px;",
                "{empty_text}"
            }
        };
    }

    rsx! {
        div {
            for (idx, group) in groups.iter().enumerate() {
                DayGroupSection {
                    key: "{group.label}{idx}",
                    group: group.clone(),
                    on_select,
                }
            }
        }
    }
}

/// Full-screen preview of one record with a close button
///
/// Videos are never read into memory; they show a placeholder.
#[component]
pub fn FullscreenMedia(
    record: MediaRecord,
    on_close: EventHandler<()>,
    #[props(default = "Close".to_string())] close_label: String,
) -> Element {
    let mut image_state = use_signal(|| ImageLoadState::Loading);
    let uri = record.uri.clone();
    let is_video = record.kind == MediaKind::Video;

    use_effect(use_reactive!(|(uri, is_video)| {
        if is_video {
            image_state.set(ImageLoadState::Failed);
        } else if let Some(data) = load_media_data(&uri) {
            image_state.set(ImageLoadState::Loaded(data));
        } else {
            image_state.set(ImageLoadState::Failed);
        }
    }));

    let placeholder = if is_video { "🎬" } else { "📷" };

    rsx! {
        div {
            style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.7); z-index: 1000; display: flex; flex-direction: column; align-items: center; justify-content: center;",
            div {
                style: "width: 90%; height: 80%; display: flex; align-items: center; justify-content: center;",
                match image_state() {
                    ImageLoadState::Loading => rsx! {
                        div {
                            style: "color: white; font-size: 48px;",
                            "⏳"
                        }
                    },
                    ImageLoadState::Loaded(url) => rsx! {
                        img {
                            src: "{url}",
                            style: "max-width: 100%; max-height: 100%; object-fit: contain;",
                        }
                    },
                    ImageLoadState::Failed => rsx! {
                        div {
                            style: "color: white; font-size: 48px;",
                            "{placeholder}"
                        }
                    },
                }
            }
            button {
                style: "position: absolute; bottom: 20px; padding: 10px; background: #fff; border: none; font-size: 18px; cursor: pointer;",
                onclick: move |_| on_close.call(()),
                "{close_label}"
            }
        }
    }
}
