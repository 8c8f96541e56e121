#![cfg(test)]
//! The shells launch a client only: desktop here, web in the sibling crate.
//! Backends are plain HTTP endpoints reached through `api::QueryClient`.

const DESKTOP_MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
const WEB_MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../web/Cargo.toml"));
const DESKTOP_MAIN: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/src/main.rs"));

fn feature_names(manifest: &str) -> Vec<&str> {
    manifest
        .lines()
        .skip_while(|line| line.trim() != "[features]")
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with('['))
        .filter_map(|line| line.split_once('=').map(|(name, _)| name.trim()))
        .filter(|name| !name.is_empty())
        .collect()
}

#[test]
fn shells_only_expose_client_features() {
    assert_eq!(feature_names(DESKTOP_MANIFEST), vec!["default", "desktop"]);
    assert_eq!(feature_names(WEB_MANIFEST), vec!["default", "web"]);
}

#[test]
fn desktop_main_launches_the_desktop_renderer() {
    assert!(DESKTOP_MAIN.contains("LaunchBuilder::desktop()"));
    assert_eq!(DESKTOP_MAIN.matches("LaunchBuilder::").count(), 1);
}
