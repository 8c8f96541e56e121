use dioxus::prelude::*;

use crate::i18n;
use crate::t;

/// Current language tag. Reading the platform's `Signal<String>` context subscribes
/// the calling component, so its translated strings refresh on a switch without
/// remounting and losing card state.
pub fn use_locale() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_else(i18n::current_language)
}

/// Language picker. Writes the chosen tag into the platform's `Signal<String>`
/// context (when provided); components calling [`use_locale`] re-render.
#[component]
pub fn LocaleSwitcher() -> Element {
    i18n::init();
    use_locale();

    let langs = use_signal(i18n::available_languages);
    let mut current_lang = use_signal(i18n::current_language);
    let lang_code_ctx = try_use_context::<Signal<String>>();

    if langs().len() < 2 {
        return rsx! {};
    }

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                tracing::debug!(%tag, "language switched");
                current_lang.set(tag.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(tag);
                }
            }
            Err(err) => tracing::warn!(%tag, "language switch failed: {err}"),
        }
    };

    rsx! {
        div { class: "locale-switcher",
            label { class: "visually-hidden", r#for: "locale-select", {t!("nav-language-label")} }
            select {
                id: "locale-select",
                class: "locale-switcher__select",
                value: "{current_lang}",
                oninput: on_change,
                for code in langs() {
                    option { key: "{code}", value: "{code}", selected: code == current_lang(), "{code}" }
                }
            }
        }
    }
}
