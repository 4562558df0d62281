//! Button loading states while a request is in flight.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use crate::page::Element;

pub const SPINNER_HTML: &str = r#"<div class="loading-spinner"></div>"#;

/// Disable `button` and swap its label for a spinner.
pub fn show_loading<E: Element>(button: &E) {
    button.set_disabled(true);
    button.set_html(SPINNER_HTML);
}

/// Re-enable `button` with its original label.
pub fn hide_loading<E: Element>(button: &E, original_text: &str) {
    button.set_disabled(false);
    button.set_text(original_text);
}
