use api::QueryClient;
use dioxus::prelude::*;

use super::InsightState;
use crate::components::use_locale;
use crate::core::export;
use crate::markdown::MarkdownView;
use crate::t;

#[component]
pub fn InsightCard(api_url: String) -> Element {
    use_locale();
    let client = use_hook(|| QueryClient::new(api_url.clone()));
    let mut state = use_signal(InsightState::default);

    let on_search = {
        let client = client.clone();
        move |_| start_search(state, client.clone())
    };

    let on_enter = {
        let client = client.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                start_search(state, client.clone());
            }
        }
    };

    let on_export = move |_| {
        let Some(file) = state.read().export_file() else {
            return;
        };
        spawn(async move {
            match export::deliver(file).await {
                Ok(Some(path)) => tracing::info!(%path, "insight exported"),
                Ok(None) => tracing::info!("insight download started"),
                Err(err) => tracing::warn!("insight export failed: {err}"),
            }
        });
    };

    let snapshot = state();

    rsx! {
        div { class: "card card--insight",
            div { class: "card__toolbar",
                input {
                    r#type: "text",
                    class: "card__input",
                    value: "{snapshot.query}",
                    placeholder: t!("insight-placeholder"),
                    oninput: move |evt| state.write().set_query(evt.value()),
                    onkeydown: on_enter,
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: on_search,
                    {t!("card-search")}
                }
                if snapshot.has_result() {
                    button {
                        r#type: "button",
                        class: "button button--success",
                        onclick: on_export,
                        {t!("insight-export")}
                    }
                }
            }

            div { class: "card__body",
                if snapshot.loading {
                    p { class: "card__status", {t!("card-loading")} }
                }
                if let Some(err) = snapshot.error.as_ref() {
                    p { class: "card__error", "{err}" }
                }
                if let Some(text) = snapshot.result.as_ref().filter(|text| !text.is_empty()) {
                    div { class: "card__result",
                        h2 { class: "card__result-title", "{snapshot.query}" }
                        MarkdownView { text: text.clone() }
                    }
                }
                if snapshot.is_idle() {
                    p { class: "card__status card__status--muted", {t!("card-no-result")} }
                }
            }
        }
    }
}

fn start_search(mut state: Signal<InsightState>, client: QueryClient) {
    let Some(ticket) = state.write().begin_search() else {
        return;
    };

    spawn(async move {
        let outcome = client.fetch_text(&ticket.prompt).await;
        state.write().finish(ticket, outcome);
    });
}
