#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{
    tao::{dpi::LogicalSize, window::WindowBuilder},
    Config,
};
use dioxus::prelude::*;

use ui::views::Home;
use ui::DashboardConfig;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Shared theme from ui/assets/theme/main.css, always inlined.

#[cfg(feature = "desktop")]
fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("IAnalytics Flow – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(LogicalSize::new(1280.0, 860.0)),
            ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global language code; LocaleSwitcher writes it, components subscribe via use_locale.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    // Endpoints come from config.json in the platform config dir, or the localhost defaults.
    use_context_provider(DashboardConfig::load);

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div { class: "app-root",
            Router::<Route> { }
        }
    }
}
