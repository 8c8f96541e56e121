use dioxus::prelude::*;

use crate::chart::ChartCard;
use crate::components::{use_locale, LocaleSwitcher};
use crate::core::config::DashboardConfig;
use crate::dashboard::{Card, CardKind, Dashboard};
use crate::insight::InsightCard;
use crate::t;

#[component]
pub fn DashboardShell() -> Element {
    use_locale();
    let mut dashboard = use_signal(Dashboard::default);
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();

    let cards = dashboard.read().cards().to_vec();

    rsx! {
        div { class: "dashboard",
            header { class: "dashboard__header",
                h1 { class: "dashboard__title", "📊 " {t!("app-title")} }
                div { class: "dashboard__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: move |_| {
                            dashboard.write().add_insight_card();
                        },
                        {t!("shell-add-insight")}
                    }
                    button {
                        r#type: "button",
                        class: "button button--accent",
                        onclick: move |_| {
                            dashboard.write().add_chart_card();
                        },
                        {t!("shell-add-chart")}
                    }
                    LocaleSwitcher {}
                }
            }

            main { class: "dashboard__cards",
                if cards.is_empty() {
                    p { class: "dashboard__placeholder", {t!("shell-empty")} }
                }
                for card in cards.into_iter() {
                    CardFrame { key: "{card.id}", card, dashboard, config: config.clone() }
                }
            }
        }
    }
}

#[component]
fn CardFrame(card: Card, dashboard: Signal<Dashboard>, config: DashboardConfig) -> Element {
    use_locale();
    let Card { id, kind } = card;
    let mut dashboard = dashboard;

    let heading = match kind {
        CardKind::Insight => t!("shell-card-insight"),
        CardKind::Chart => t!("shell-card-chart"),
    };

    let body = match kind {
        CardKind::Insight => rsx! {
            InsightCard { api_url: config.insight_url.clone() }
        },
        CardKind::Chart => rsx! {
            ChartCard { api_url: config.chart_url.clone() }
        },
    };

    rsx! {
        div { class: "dashboard-card dashboard-card--{kind.as_str()}",
            div { class: "dashboard-card__header",
                h2 { class: "dashboard-card__title", "{heading}" }
                button {
                    r#type: "button",
                    class: "button button--danger dashboard-card__remove",
                    title: t!("shell-remove-card"),
                    onclick: move |_| {
                        dashboard.write().remove_card(id);
                    },
                    "🗑"
                }
            }
            {body}
        }
    }
}
