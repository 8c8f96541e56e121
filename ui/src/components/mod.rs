mod locale_switcher;

pub use locale_switcher::{use_locale, LocaleSwitcher};
