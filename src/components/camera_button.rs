use dioxus::prelude::*;
use dioxus_i18n::t;
use media_gallery::CaptureMode;

/// Floating capture button in the bottom right corner
#[component]
pub fn CameraButton(on_capture: EventHandler<CaptureMode>) -> Element {
    rsx! {
        div {
            style: "position: fixed; bottom: 90px; right: 20px;",
            button {
                style: "background: #302f2f; color: #fff; padding: 15px; border: none; border-radius: 10px; font-size: 16px; cursor: pointer;",
                onclick: move |_| on_capture.call(CaptureMode::Photo),
                { t!("photos-take-photo") }
            }
        }
    }
}
