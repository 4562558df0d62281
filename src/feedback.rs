//! Error and success presenters for form-style interactions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every failed API call ends here and becomes exactly one human-readable
//! message, shown inline in a caller-supplied region or, without a region,
//! in a blocking alert. A 401 additionally expires the session.
//!
//! MESSAGE SELECTION
//! =================
//! 1. string body, verbatim
//! 2. `detail`
//! 3. `non_field_errors`, space-joined
//! 4. every field error, flattened and space-joined (field order preserved,
//!    nested serializer errors included)
//! 5. no body: fixed message by status bucket

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::net::types::ApiError;
use crate::page::{ALERT_CLASS, ERROR_CLASS, Element, HIDDEN_CLASS, Page, SUCCESS_CLASS, navigate_after};
use crate::state::session::{Session, SessionStore};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const UNAUTHORIZED_MESSAGE: &str = "Please log in again.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Error,
    Success,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Error => ERROR_CLASS,
            Self::Success => SUCCESS_CLASS,
        }
    }

    fn opposite(self) -> &'static str {
        match self {
            Self::Error => SUCCESS_CLASS,
            Self::Success => ERROR_CLASS,
        }
    }
}

// =============================================================================
// MESSAGE SELECTION
// =============================================================================

/// Fixed message for a failure that carried no usable body.
///
/// Statuses outside the named buckets (400, 409, 429, ...) share the generic
/// retry message.
pub fn status_message(status: u16) -> &'static str {
    match status {
        0 => NETWORK_ERROR_MESSAGE,
        401 => UNAUTHORIZED_MESSAGE,
        403 => FORBIDDEN_MESSAGE,
        404 => NOT_FOUND_MESSAGE,
        500..=u16::MAX => SERVER_ERROR_MESSAGE,
        _ => GENERIC_ERROR_MESSAGE,
    }
}

/// Message carried by a parsed error body, if any.
pub fn body_message(body: &Value) -> Option<String> {
    let message = match body {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if let Some(detail) = map.get("detail").filter(|d| is_present(d)) {
                join_text(std::iter::once(detail))
            } else if let Some(errors) = map.get("non_field_errors").filter(|e| is_present(e)) {
                join_text(std::iter::once(errors))
            } else {
                join_text(map.values())
            }
        }
        Value::Array(items) => join_text(items.iter()),
        Value::Null | Value::Bool(_) | Value::Number(_) => return None,
    };
    (!message.is_empty()).then_some(message)
}

/// The single message to show for `err`.
pub fn error_message(err: &ApiError) -> String {
    if let ApiError::Parse(_) = err {
        return GENERIC_ERROR_MESSAGE.to_owned();
    }
    err.body()
        .and_then(body_message)
        .unwrap_or_else(|| status_message(err.status()).to_owned())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Collect the text leaves of `value`. Nested serializer errors
/// (`{"profile": {"bio": [...]}}`) contribute their messages, not JSON.
fn collect_text(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            if !s.is_empty() {
                parts.push(s.clone());
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_text(v, parts)),
        Value::Object(map) => map.values().for_each(|v| collect_text(v, parts)),
        Value::Bool(_) | Value::Number(_) => parts.push(value.to_string()),
    }
}

/// Flatten every text leaf and join with single spaces.
fn join_text<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    let mut parts = Vec::new();
    for value in values {
        collect_text(value, &mut parts);
    }
    parts.join(" ")
}

// =============================================================================
// PRESENTATION
// =============================================================================

fn show_message<P: Page>(page: &P, region: Option<&P::Element>, message: &str, tone: Tone) {
    match region {
        Some(el) => {
            el.remove_class(HIDDEN_CLASS);
            el.remove_class(tone.opposite());
            el.add_class(tone.class());
            el.set_text(message);
        }
        None => page.alert(message),
    }
}

/// Clear the session and send the user to the login page after the
/// configured delay.
pub fn expire_session<P: Page, S: SessionStore>(page: &P, session: &Session<S>, config: &ClientConfig) {
    session.clear();
    navigate_after(page, &config.login_path, config.unauthorized_redirect_delay_ms);
}

/// Show the message for `err` and apply its side effects. Returns the
/// message shown.
pub fn present_error<P: Page, S: SessionStore>(
    page: &P,
    session: &Session<S>,
    config: &ClientConfig,
    err: &ApiError,
    region: Option<&P::Element>,
) -> String {
    let message = error_message(err);
    log::warn!("{err}; showing: {message}");
    if err.is_unauthorized() {
        expire_session(page, session, config);
    }
    show_message(page, region, &message, Tone::Error);
    message
}

/// Show a success message inline, or as an alert without a region.
pub fn present_success<P: Page>(page: &P, message: &str, region: Option<&P::Element>) {
    show_message(page, region, message, Tone::Success);
}

/// Remove visible `.alert` elements after the configured delay.
///
/// Hidden alert regions are kept; presenters reuse them later.
pub fn schedule_alert_dismissal<P: Page>(page: &P, config: &ClientConfig) {
    let target = page.clone();
    page.schedule(
        config.alert_dismiss_delay_ms,
        Box::new(move || {
            for el in target.elements_by_class(ALERT_CLASS) {
                if !el.has_class(HIDDEN_CLASS) {
                    el.remove();
                }
            }
        }),
    );
}
