use leptos::prelude::*;

const STORAGE_KEY: &str = "netsentry-theme";

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: ReadSignal<String>,
    pub set_theme: WriteSignal<String>,
}

/// Apply the theme through the `data-theme` attribute on `<html>`.
/// "light" and "dark" force a palette; anything else clears the attribute
/// and leaves the choice to the CSS @media query.
pub fn apply_theme(theme: &str) {
    let Some(html) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };

    let result = match theme {
        "light" | "dark" => html.set_attribute("data-theme", theme),
        _ => html.remove_attribute("data-theme"),
    };
    if result.is_err() {
        web_sys::console::error_1(&format!("could not apply theme {theme:?}").into());
    }
}

/// Read the saved preference from localStorage, defaulting to "system".
pub fn load_preference() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
        .unwrap_or_else(|| "system".to_string())
}

/// Persist the preference to localStorage. Storage failures (private
/// browsing, quota) are ignored; the in-memory signal still applies.
pub fn store_preference(theme: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(STORAGE_KEY, theme);
    }
}
