use crate::Tab;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn NavigationBar(current_tab: Tab, on_navigate: EventHandler<Tab>) -> Element {
    let nav_style = "display: flex; justify-content: space-around; padding: 8px 0; background: #000000; border-top: 1px solid #1f1f1f;";

    rsx! {
        div {
            style: "{nav_style}",

            TabButton {
                icon: "🖼️",
                label: t!("tab-photos"),
                focused: current_tab == Tab::Photos,
                on_click: move |_| on_navigate.call(Tab::Photos),
            }

            TabButton {
                icon: "🗂️",
                label: t!("tab-album"),
                focused: current_tab == Tab::Album,
                on_click: move |_| on_navigate.call(Tab::Album),
            }

            TabButton {
                icon: "🪐",
                label: t!("tab-explore"),
                focused: current_tab == Tab::Explore,
                on_click: move |_| on_navigate.call(Tab::Explore),
            }
        }
    }
}

#[component]
fn TabButton(
    icon: &'static str,
    label: String,
    focused: bool,
    on_click: EventHandler<()>,
) -> Element {
    let color = if focused { "#FFFFFF" } else { "#6b6565" };

    rsx! {
        button {
            style: "flex: 1; padding: 6px; border: none; background: transparent; cursor: pointer; display: flex; flex-direction: column; align-items: center; gap: 2px; color: {color};",
            onclick: move |_| on_click.call(()),
            span { style: "font-size: 24px;", "{icon}" }
            span { style: "font-size: 12px;", "{label}" }
        }
    }
}
