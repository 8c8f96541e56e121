//! End-to-end checks of the pure dashboard pipeline: cards, chart data, rendering.

use std::collections::BTreeSet;

use api::{ApiError, ChartResponse};
use serde_json::json;
use ui::chart::{render, ChartState, FieldValue, RenderedChart};
use ui::dashboard::Dashboard;
use ui::insight::InsightState;
use ui::markdown::render_markdown;

fn chart_response(chart_type: &str, x_fields: serde_json::Value, rows: serde_json::Value) -> ChartResponse {
    ChartResponse::from_json(
        &json!({
            "columns": [],
            "rows": rows,
            "config": {
                "chartType": chart_type,
                "xFields": x_fields,
                "yFields": "sales",
                "title": "Vendas"
            }
        })
        .to_string(),
    )
    .unwrap()
}

#[test]
fn shell_lists_cards_in_creation_order() {
    let mut dashboard = Dashboard::default();
    dashboard.add_insight_card();
    dashboard.add_chart_card();

    let kinds: Vec<&str> = dashboard.cards().iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, ["api", "grafico"]);

    let first = dashboard.cards()[0].id;
    dashboard.remove_card(first);
    let kinds: Vec<&str> = dashboard.cards().iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(kinds, ["grafico"]);
}

#[test]
fn chart_search_normalizes_rows() {
    let mut state = ChartState::default();
    state.set_query("vendas por região");
    let ticket = state.begin_search().unwrap();
    let response = chart_response("BarChart", json!("region"), json!([{"region": "North", "sales": "120"}]));
    assert!(state.finish(ticket, Ok(response)));

    let row = &state.data[0];
    assert_eq!(row.get("region"), Some(&FieldValue::Text("North".into())));
    assert_eq!(row.get("sales"), Some(&FieldValue::Number(120.0)));
    assert_eq!(row.x_key(), "North");
}

#[test]
fn composite_x_key_joins_fields() {
    let mut state = ChartState::default();
    state.set_query("trimestres");
    let ticket = state.begin_search().unwrap();
    let response = chart_response(
        "LineChart",
        json!(["year", "quarter"]),
        json!([{"year": 2023, "quarter": "Q1", "sales": 7}]),
    );
    state.finish(ticket, Ok(response));
    assert_eq!(state.data[0].x_key(), "2023 - Q1");
}

#[test]
fn legend_toggle_round_trips() {
    let mut state = ChartState::default();
    state.toggle_key("sales");
    state.toggle_key("sales");
    assert!(state.hidden().is_empty());
}

#[test]
fn unknown_chart_type_renders_fallback() {
    let mut state = ChartState::default();
    state.set_query("mapa de calor");
    let ticket = state.begin_search().unwrap();
    let response = chart_response("Heatmap", json!("region"), json!([{"region": "North", "sales": 1}]));
    state.finish(ticket, Ok(response));

    let config = state.config.as_ref().unwrap();
    let rendered = render(config, &state.data, &BTreeSet::new());
    assert_eq!(rendered, RenderedChart::Unsupported("Heatmap".into()));
    assert!(state.error.is_none());
}

#[test]
fn rendered_chart_exports_as_svg_document() {
    let mut state = ChartState::default();
    state.set_query("vendas");
    let ticket = state.begin_search().unwrap();
    let response = chart_response(
        "PieChart",
        json!("region"),
        json!([{"region": "North", "sales": 3}, {"region": "South", "sales": 1}]),
    );
    state.finish(ticket, Ok(response));

    let RenderedChart::Scene(scene) = render(state.config.as_ref().unwrap(), &state.data, state.hidden()) else {
        panic!("pie charts are supported");
    };
    let svg = scene.to_svg_document("Vendas");
    assert!(svg.contains(">Vendas</text>"));
    assert!(svg.contains(">North</text>"));
    assert_eq!(state.export_filename(), "Vendas.png");
}

#[test]
fn insight_error_then_markdown_answer() {
    let mut state = InsightState::default();
    state.set_query("resumo");

    let ticket = state.begin_search().unwrap();
    state.finish(ticket, Err(ApiError::Status(502)));
    assert_eq!(state.error.as_deref(), Some("Falha ao consultar dados. Tente novamente"));

    let ticket = state.begin_search().unwrap();
    state.finish(ticket, Ok("## Destaques\\n**Norte** lidera".into()));
    assert!(state.error.is_none());

    let html = render_markdown(state.result.as_deref().unwrap());
    assert!(html.contains("<h2 class=\"markdown__h2\">Destaques</h2>"));
    assert!(html.contains("<strong class=\"markdown__strong\">Norte</strong>"));
}
