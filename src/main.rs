use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;
use media_gallery::GalleryConfig;

mod components;
mod error;
mod i18n;

use components::{AlbumScreen, ExploreScreen, NavigationBar, PhotosScreen};
use error::AppError;

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("photos"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

/// Location of the optional gallery config file based on platform
fn config_path() -> &'static str {
    #[cfg(target_os = "android")]
    {
        "/storage/emulated/0/Android/data/dev.dioxus.main/files/gallery.toml"
    }

    #[cfg(not(target_os = "android"))]
    {
        "./gallery.toml"
    }
}

fn load_config() -> Result<GalleryConfig, AppError> {
    let config = GalleryConfig::load(config_path())?;

    // The directory source needs its library to exist
    #[cfg(not(target_os = "android"))]
    std::fs::create_dir_all(&config.library_path)?;

    log::info!(
        "Gallery config: fetch_limit={}, locale={}",
        config.fetch_limit,
        config.locale
    );
    Ok(config)
}

/// Bottom navigation tabs
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tab {
    Photos,
    Album,
    Explore,
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);
    use_context_provider(|| {
        load_config().unwrap_or_else(|e| {
            log::error!("{} ({})", e.user_message(), e);
            GalleryConfig::default()
        })
    });
    let mut current_tab = use_signal(|| Tab::Photos);

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; background: #000000; font-family: sans-serif;",

            // Main Content
            div { style: "flex: 1; overflow-y: auto; position: relative;",
                // Photos stays mounted while hidden so it notices focus changes
                div { style: if current_tab() == Tab::Photos { "min-height: 100%;" } else { "display: none;" },
                    PhotosScreen { current_tab }
                }
                match current_tab() {
                    Tab::Photos => rsx! {},
                    Tab::Album => rsx! {
                        AlbumScreen {}
                    },
                    Tab::Explore => rsx! {
                        ExploreScreen {}
                    },
                }
            }

            // Bottom Navigation Bar
            NavigationBar {
                current_tab: current_tab(),
                on_navigate: move |tab| current_tab.set(tab),
            }
        }
    }
}
