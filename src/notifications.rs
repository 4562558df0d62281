//! Notification Poller: keeps the unread badge in sync with the server.
//!
//! The poll is best-effort. Failures never reach the user; a missing count
//! only leaves the badge as the server rendered it.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use crate::config::ClientConfig;
use crate::feedback::present_error;
use crate::net::api;
use crate::net::transport::Transport;
use crate::net::types::ApiError;
use crate::page::{Element, Page};
use crate::state::session::{Session, SessionStore};
use crate::util::cookie::csrf_token;

/// Result of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No credential; no request was issued.
    Skipped,
    /// The server reported this unread count.
    Updated(u64),
    /// The request failed; the badge was left untouched.
    Failed,
}

/// Show `count` on the badge, or hide it (kept in the document) at zero.
pub fn render_badge<E: Element>(badge: &E, count: u64) {
    if count > 0 {
        badge.set_text(&count.to_string());
        badge.show();
    } else {
        badge.hide();
    }
}

/// Fetch the unread count once and render it. Issues exactly one request
/// when a credential is present and none otherwise.
pub async fn update_notification_badge<P, S, T>(
    page: &P,
    session: &Session<S>,
    transport: &T,
    config: &ClientConfig,
) -> PollOutcome
where
    P: Page,
    S: SessionStore,
    T: Transport + ?Sized,
{
    let Some(token) = session.token() else {
        return PollOutcome::Skipped;
    };
    match api::fetch_notification_count(transport, config, &token).await {
        Ok(count) => {
            match page.element_by_id(&config.badge_id) {
                Some(badge) => render_badge(&badge, count.unread_count),
                None => log::debug!("notification badge #{} not on this page", config.badge_id),
            }
            PollOutcome::Updated(count.unread_count)
        }
        Err(err) => {
            // Rejected credentials are dropped without a redirect; the
            // guard handles the next page load.
            if err.is_unauthorized() {
                session.clear();
            }
            log::debug!("notification count unavailable: {err}");
            PollOutcome::Failed
        }
    }
}

/// Mark every notification read, then refresh the badge. Failures go through
/// the error presenter.
///
/// # Errors
///
/// Returns the [`ApiError`] after it has been presented.
pub async fn mark_all_read<P, S, T>(
    page: &P,
    session: &Session<S>,
    transport: &T,
    config: &ClientConfig,
    region: Option<&P::Element>,
) -> Result<(), ApiError>
where
    P: Page,
    S: SessionStore,
    T: Transport + ?Sized,
{
    let result = match session.token() {
        Some(token) => api::mark_all_read(transport, config, &token, csrf_token(&page.cookies())).await,
        None => Err(ApiError::Status { status: 401, body: None }),
    };
    if let Err(err) = result {
        present_error(page, session, config, &err, region);
        return Err(err);
    }
    update_notification_badge(page, session, transport, config).await;
    Ok(())
}
