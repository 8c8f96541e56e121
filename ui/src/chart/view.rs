use api::QueryClient;
use dioxus::prelude::*;

use super::render::{render, RenderedChart};
use super::scene::{
    document_height, ChartScene, HoverTarget, LegendEntry, PLOT_HEIGHT, PLOT_WIDTH,
};
use super::state::ChartState;
use crate::components::use_locale;
use crate::core::export::{self, ExportFile};
use crate::t;

#[component]
pub fn ChartCard(api_url: String) -> Element {
    use_locale();
    let client = use_hook(|| QueryClient::new(api_url.clone()));
    let mut state = use_signal(ChartState::default);
    let hovered = use_signal(|| None::<usize>);

    let on_search = {
        let client = client.clone();
        move |_| start_search(state, hovered, client.clone())
    };

    let on_enter = {
        let client = client.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter {
                start_search(state, hovered, client.clone());
            }
        }
    };

    let snapshot = state();
    let title = snapshot
        .config
        .as_ref()
        .map(|config| config.title.clone())
        .unwrap_or_default();
    let rendered = snapshot
        .config
        .as_ref()
        .filter(|_| snapshot.has_result())
        .map(|config| render(config, &snapshot.data, snapshot.hidden()));

    let on_export = {
        let rendered = rendered.clone();
        let title = title.clone();
        let filename = snapshot.export_filename();
        move |_| {
            let Some(RenderedChart::Scene(scene)) = rendered.as_ref() else {
                return;
            };
            let svg = scene.to_svg_document(&title);
            let filename = filename.clone();
            spawn(async move {
                let outcome = async {
                    let png =
                        export::rasterize_svg(&svg, PLOT_WIDTH as u32, document_height() as u32)
                            .await?;
                    export::deliver(ExportFile::png(filename, png)).await
                }
                .await;
                match outcome {
                    Ok(Some(path)) => tracing::info!(%path, "chart exported"),
                    Ok(None) => tracing::info!("chart download started"),
                    Err(err) => tracing::warn!("chart export failed: {err}"),
                }
            });
        }
    };

    let can_export = matches!(rendered, Some(RenderedChart::Scene(_)));

    rsx! {
        div { class: "card card--chart",
            div { class: "card__toolbar",
                input {
                    r#type: "text",
                    class: "card__input",
                    value: "{snapshot.query}",
                    placeholder: t!("chart-placeholder"),
                    oninput: move |evt| state.write().set_query(evt.value()),
                    onkeydown: on_enter,
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: on_search,
                    {t!("card-search")}
                }
                if can_export {
                    button {
                        r#type: "button",
                        class: "button button--success",
                        onclick: on_export,
                        {t!("chart-export")}
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
                match rendered {
                    Some(RenderedChart::Scene(scene)) => rsx! {
                        ChartFigure { title: title.clone(), scene, state, hovered }
                    },
                    Some(RenderedChart::Unsupported(chart_type)) => rsx! {
                        p { class: "chart__unsupported", {t!("chart-unsupported", chart_type = chart_type)} }
                    },
                    None => rsx! {},
                }
                if snapshot.is_idle() {
                    p { class: "card__status card__status--muted", {t!("card-no-result")} }
                }
            }
        }
    }
}

#[component]
fn ChartFigure(
    title: String,
    scene: ChartScene,
    state: Signal<ChartState>,
    hovered: Signal<Option<usize>>,
) -> Element {
    let mut hovered = hovered;
    let plot = scene.to_svg_fragment();
    let view_box = format!("0 0 {PLOT_WIDTH} {PLOT_HEIGHT}");
    let tooltip = hovered().and_then(|index| scene.hover.get(index).cloned());

    rsx! {
        figure { class: "chart",
            if !title.is_empty() {
                figcaption { class: "chart__title", "{title}" }
            }
            div { class: "chart__canvas",
                div { class: "chart__plot", dangerous_inner_html: "{plot}" }
                svg {
                    class: "chart__hover-layer",
                    "viewBox": "{view_box}",
                    "preserveAspectRatio": "xMidYMid meet",
                    for (index, target) in scene.hover.iter().enumerate() {
                        path {
                            key: "{index}",
                            "d": "{target.shape}",
                            "fill": "transparent",
                            onmouseenter: move |_| hovered.set(Some(index)),
                            onmouseleave: move |_| hovered.set(None),
                        }
                    }
                }
                if let Some(target) = tooltip {
                    ChartTooltip { target }
                }
            }
            div { class: "chart__legend",
                for (index, entry) in scene.legend.iter().cloned().enumerate() {
                    LegendButton { key: "{index}", entry, state, hovered }
                }
            }
        }
    }
}

#[component]
fn LegendButton(
    entry: LegendEntry,
    state: Signal<ChartState>,
    hovered: Signal<Option<usize>>,
) -> Element {
    let mut state = state;
    let mut hovered = hovered;
    let toggle = entry.toggle.clone();
    let is_static = toggle.is_none();
    let class = if entry.hidden {
        "chart__legend-item chart__legend-item--hidden"
    } else {
        "chart__legend-item"
    };

    rsx! {
        button {
            r#type: "button",
            class,
            disabled: is_static,
            onclick: move |_| {
                if let Some(key) = toggle.as_deref() {
                    state.write().toggle_key(key);
                    hovered.set(None);
                }
            },
            span { class: "chart__swatch", style: "background: {entry.color};" }
            "{entry.label}"
        }
    }
}

#[component]
fn ChartTooltip(target: HoverTarget) -> Element {
    let style = format!(
        "left: {:.2}%; top: {:.2}%;",
        target.anchor_x / PLOT_WIDTH * 100.0,
        target.anchor_y / PLOT_HEIGHT * 100.0
    );

    rsx! {
        div {
            class: "chart__tooltip",
            style,
            p { class: "chart__tooltip-label", "{target.label}" }
            for (index, entry) in target.entries.iter().enumerate() {
                p { key: "{index}", class: "chart__tooltip-row",
                    span { class: "chart__swatch", style: "background: {entry.color};" }
                    "{entry.name}: {entry.value}"
                }
            }
        }
    }
}

fn start_search(
    mut state: Signal<ChartState>,
    mut hovered: Signal<Option<usize>>,
    client: QueryClient,
) {
    let Some(ticket) = state.write().begin_search() else {
        return;
    };
    hovered.set(None);

    spawn(async move {
        let outcome = client.fetch_chart(&ticket.prompt).await;
        state.write().finish(ticket, outcome);
    });
}
