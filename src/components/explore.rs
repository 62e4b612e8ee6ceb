use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn ExploreScreen() -> Element {
    rsx! {
        div {
            style: "padding: 16px; color: #fff;",
            h1 { style: "font-size: 24px; margin: 0 0 20px 0;", { t!("explore-title") } }
            div { style: "text-align: center; padding: 40px; color: #6b6565;", { t!("explore-empty") } }
        }
    }
}
