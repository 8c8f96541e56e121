//! Localization for `ianalytics-ui`.
//!
//! Messages live in Fluent files embedded at compile time:
//! ```text
//! i18n.toml
//! i18n/
//!   pt-BR/ianalytics_ui.ftl   (fallback/reference)
//!   en-US/ianalytics_ui.ftl
//! ```
//!
//! Call [`init`] once at startup, then look messages up with [`t!`](crate::t):
//! ```ignore
//! use crate::t;
//! crate::i18n::init();
//! let label = t!("card-search");
//! let fallback = t!("chart-unsupported", chart_type = "Heatmap");
//! ```
//!
//! Desktop builds request the OS locale list, web builds `navigator.languages`.
//! A new locale needs a copy of the pt-BR file with every message translated;
//! the completeness tests fail otherwise.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// Message lookup by literal ID, with optional `name = value` arguments, routed
/// through the shared [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the reference file is `i18n/pt-BR/{DOMAIN}.ftl`.
const DOMAIN: &str = "ianalytics_ui";

pub const FALLBACK_LANGUAGE: LanguageIdentifier = langid!("pt-BR");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Shared loader. Bidi isolation marks are off so interpolated values appear verbatim.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = FluentLanguageLoader::new(DOMAIN, FALLBACK_LANGUAGE);
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Load bundles for the requested languages. Safe to call repeatedly.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => tracing::debug!(?selected, "localization loaded"),
            Err(err) => {
                tracing::warn!("failed selecting languages ({err}); continuing with fallback")
            }
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Language tag currently in effect, e.g. `pt-BR`.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
