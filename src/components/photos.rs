use crate::components::CameraButton;
use crate::Tab;
use dioxus::prelude::*;
use dioxus_i18n::t;
use media_gallery::{
    platform_source, AppPhase, DayGroupList, FullscreenMedia, GalleryConfig, GalleryController,
    GalleryEvent, GallerySnapshot, LifecycleTracker, Notice, RefreshState,
};
use tokio::sync::mpsc::unbounded_channel;

/// Reports `document.visibilityState` on every change
const VISIBILITY_SCRIPT: &str = r#"
    document.addEventListener("visibilitychange", () => {
        dioxus.send(document.visibilityState);
    });
"#;

#[component]
pub fn PhotosScreen(current_tab: Signal<Tab>) -> Element {
    let config = use_context::<GalleryConfig>();
    let mut snapshot = use_signal(GallerySnapshot::default);
    let mut tracker = use_signal(LifecycleTracker::new);

    // The controller lives as long as this screen; dropping the sender stops it
    let events = use_hook(move || {
        let (tx, rx) = unbounded_channel::<GalleryEvent>();
        let mut controller = GalleryController::new(platform_source(&config), &config);
        spawn(async move {
            controller.run(rx, move |next| snapshot.set(next)).await;
            log::debug!("Gallery controller finished");
        });
        tx
    });

    let dispatch = use_callback(move |event: GalleryEvent| {
        if events.send(event).is_err() {
            log::error!("Gallery controller is not running");
        }
    });

    use_effect(move || {
        if let Some(signal) = tracker.write().mounted() {
            dispatch.call(GalleryEvent::Lifecycle(signal));
        }
    });

    // Tab focus
    use_effect(move || {
        let focused = current_tab() == Tab::Photos;
        if let Some(signal) = tracker.write().focus_changed(focused) {
            dispatch.call(GalleryEvent::Lifecycle(signal));
        }
    });

    // App returning from background
    use_future(move || async move {
        let mut eval = document::eval(VISIBILITY_SCRIPT);
        while let Ok(state) = eval.recv::<String>().await {
            let phase = AppPhase::from_visibility(&state);
            log::debug!("App phase changed to {:?}", phase);
            if let Some(signal) = tracker.write().phase_changed(phase) {
                dispatch.call(GalleryEvent::Lifecycle(signal));
            }
        }
    });

    let view = snapshot();

    rsx! {
        div {
            style: "position: relative; min-height: 100%; padding-bottom: 80px; background: #000;",

            if let RefreshState::Error(message) = view.refresh.clone() {
                div {
                    style: "margin: 12px; padding: 12px 16px; background: #3a1d1d; border-left: 3px solid #ff5252; border-radius: 8px; color: #ffb4b4; font-size: 14px;",
                    "❌ ",
                    { t!("photos-load-error", error: message) }
                }
            }

            if view.refresh == RefreshState::Refreshing && view.item_count == 0 {
                div {
                    style: "text-align: center; padding: 20px; color: #6b6565;",
                    { t!("photos-loading") }
                }
            } else {
                DayGroupList {
                    groups: view.groups.clone(),
                    empty_text: t!("photos-empty"),
                    on_select: move |uri| dispatch.call(GalleryEvent::Select(uri)),
                }
            }

            CameraButton {
                on_capture: move |mode| dispatch.call(GalleryEvent::CaptureRequested(mode)),
            }

            if let Some(record) = view.selected_record().cloned() {
                FullscreenMedia {
                    record,
                    close_label: t!("action-close"),
                    on_close: move |_| dispatch.call(GalleryEvent::Dismiss),
                }
            }

            if let Some(notice) = view.notice.clone() {
                NoticeView {
                    notice,
                    on_dismiss: move |_| dispatch.call(GalleryEvent::DismissNotice),
                }
            }
        }
    }
}

/// Permission dialog or capture failure toast
#[component]
fn NoticeView(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    if notice.is_persistent() {
        return rsx! {
            div {
                style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; background: rgba(0, 0, 0, 0.7); z-index: 1100; display: flex; align-items: center; justify-content: center;",
                div {
                    style: "max-width: 320px; padding: 20px; background: #1f1f1f; border-radius: 12px; color: #fff;",
                    h3 { style: "margin: 0 0 12px 0; font-size: 18px;", { t!("permission-title") } }
                    p { style: "margin: 0 0 16px 0; font-size: 14px; color: #ccc;", { t!("permission-message") } }
                    button {
                        style: "float: right; padding: 8px 20px; background: #fff; border: none; border-radius: 6px; font-size: 16px; cursor: pointer;",
                        onclick: move |_| on_dismiss.call(()),
                        { t!("action-ok") }
                    }
                }
            }
        };
    }

    let message = match &notice {
        Notice::CaptureFailed(error) => t!("capture-failed", error: error.clone()),
        Notice::PermissionRequired => t!("permission-title"),
    };

    rsx! {
        div {
            style: "position: fixed; left: 16px; right: 16px; bottom: 160px; padding: 12px 16px; background: #302f2f; border-radius: 8px; color: #fff; font-size: 14px; display: flex; justify-content: space-between; align-items: center; z-index: 1100;",
            span { "{message}" }
            button {
                style: "background: transparent; border: none; color: #fff; font-size: 18px; cursor: pointer;",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
