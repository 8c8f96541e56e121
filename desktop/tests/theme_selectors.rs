#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The shared theme (`ui/assets/theme/main.css`) is embedded with `include_str!`.
This test asserts that the selectors the dashboard components emit are still
defined, so a rename in the stylesheet fails here instead of silently leaving
cards unstyled. When a component changes its class names, update
`REQUIRED_SELECTORS` alongside it.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--success",
    ".button--danger",
    // Dashboard shell
    ".dashboard__header",
    ".dashboard__actions",
    ".dashboard__cards",
    ".dashboard__placeholder",
    ".dashboard-card {",
    ".dashboard-card__header",
    ".dashboard-card__remove",
    ".dashboard-card--api",
    ".dashboard-card--grafico",
    ".locale-switcher",
    // Cards
    ".card {",
    ".card__toolbar",
    ".card__input",
    ".card__status--muted",
    ".card__error",
    ".card__result-title",
    // Markdown
    ".markdown__h1",
    ".markdown__h2",
    ".markdown__h3",
    ".markdown__p",
    ".markdown__li",
    ".markdown__strong",
    // Charts
    ".chart__canvas",
    ".chart__plot",
    ".chart__hover-layer",
    ".chart__tooltip",
    ".chart__legend-item",
    ".chart__legend-item--hidden",
    ".chart__swatch",
    ".chart__unsupported",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn hidden_legend_entries_are_dimmed() {
    let start = THEME_CSS
        .find(".chart__legend-item--hidden {")
        .expect("hidden legend rule");
    let block = &THEME_CSS[start..];
    let end = block.find('}').expect("closing brace");
    assert!(block[..end].contains("opacity"));
}
