use dioxus::prelude::*;

use crate::components::use_locale;
use crate::dashboard::DashboardShell;

#[component]
pub fn Home() -> Element {
    let lang = use_locale();
    tracing::trace!(%lang, "home render");

    rsx! {
        section { class: "page page-dashboard", lang: "{lang}",
            DashboardShell {}
        }
    }
}
