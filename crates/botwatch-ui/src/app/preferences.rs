//! Persistence and environment helpers for the app shell.

use botwatch_models::MODE_STORAGE_KEY;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

use crate::core::endpoints::websocket_url;
use crate::core::theme::ThemeMode;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};

pub(crate) const LOCALE_KEY: &str = "botwatch.locale";

// `mode` holds the bare string `dark`/`light`, so bypass gloo's JSON encoding.
fn read_raw(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}

pub(crate) fn load_theme() -> ThemeMode {
    ThemeMode::from_stored(read_raw(MODE_STORAGE_KEY).as_deref())
}

pub(crate) fn persist_theme(theme: ThemeMode) {
    if LocalStorage::raw()
        .set_item(MODE_STORAGE_KEY, theme.as_str())
        .is_err()
    {
        console::warn!("Could not persist theme preference");
    }
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Some(locale) = read_raw(LOCALE_KEY).and_then(|value| LocaleCode::from_lang_tag(&value)) {
        return locale;
    }
    if let Some(locale) = window()
        .navigator()
        .language()
        .and_then(|nav| LocaleCode::from_lang_tag(&nav))
    {
        return locale;
    }
    DEFAULT_LOCALE
}

pub(crate) fn log_socket_url() -> String {
    let location = window().location();
    websocket_url(
        &location.protocol().unwrap_or_default(),
        &location.hostname().unwrap_or_default(),
        &location.port().unwrap_or_default(),
    )
}
