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
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);
    use_context_provider(DashboardConfig::load);

    rsx! {
        document::Title { "IAnalytics Flow" }
        document::Style { "{MAIN_CSS_INLINE}" }

        div { class: "app-root",
            Router::<Route> {}
        }
    }
}
