//! Page-lifecycle hook and the per-page client facade.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Client`] exists per page load. [`Client::on_page_ready`] runs the
//! access guard synchronously; when the page survives it, the badge poll is
//! started separately so the guard never waits on the network.
//! [`Client::run_page`] is the whole page-load sequence in that order.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::config::ClientConfig;
use crate::feedback;
use crate::guard::{AccessDecision, run_access_guard};
use crate::net::transport::Transport;
use crate::net::types::{ApiError, LoginRequest, RegisterRequest};
use crate::notifications::{self, PollOutcome};
use crate::page::Page;
use crate::state::session::{Session, SessionStore};
use crate::util::debounce::Debouncer;
use crate::util::loading;

/// `document.readyState` value while the parser is still running.
const READY_STATE_LOADING: &str = "loading";

/// Whether the page-ready hook must wait for `DOMContentLoaded`.
pub fn must_wait_for_dom(ready_state: &str) -> bool {
    ready_state == READY_STATE_LOADING
}

/// What one page load did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub access: AccessDecision,
    /// `None` when the guard redirected and no poll was started.
    pub poll: Option<PollOutcome>,
}

/// Capabilities and configuration for one page load.
pub struct Client<P, S, T> {
    pub page: P,
    pub session: Session<S>,
    pub transport: T,
    pub config: ClientConfig,
}

impl<P, S, T> Client<P, S, T>
where
    P: Page,
    S: SessionStore,
    T: Transport,
{
    pub fn new(page: P, store: S, transport: T, config: ClientConfig) -> Self {
        Self { page, session: Session::new(store), transport, config }
    }

    /// Entry point once the document is interactive.
    ///
    /// A redirect ends the page; callers must not start further work when
    /// the returned decision is a redirect.
    pub fn on_page_ready(&self) -> AccessDecision {
        let decision = run_access_guard(&self.page, &self.session, &self.config);
        if !decision.is_redirect() {
            feedback::schedule_alert_dismissal(&self.page, &self.config);
        }
        decision
    }

    /// Full page-load sequence: guard first, then at most one badge poll.
    ///
    /// The guard and its navigation complete before the first await, so a
    /// redirecting page never issues a request.
    pub async fn run_page(&self) -> PageLoad {
        let access = self.on_page_ready();
        if access.is_redirect() {
            return PageLoad { access, poll: None };
        }
        let poll = self.refresh_badge().await;
        PageLoad { access, poll: Some(poll) }
    }

    pub async fn refresh_badge(&self) -> PollOutcome {
        notifications::update_notification_badge(&self.page, &self.session, &self.transport, &self.config).await
    }

    pub async fn logout(&self) {
        crate::auth::logout(&self.page, &self.session, &self.transport, &self.config).await;
    }

    /// # Errors
    ///
    /// Returns the presented [`ApiError`] when the request fails.
    pub async fn mark_all_read(&self, region_id: Option<&str>) -> Result<(), ApiError> {
        let region = region_id.and_then(|id| self.page.element_by_id(id));
        notifications::mark_all_read(&self.page, &self.session, &self.transport, &self.config, region.as_ref()).await
    }

    /// Present `err` in the element `region_id`, or as an alert.
    pub fn present_error(&self, err: &ApiError, region_id: Option<&str>) -> String {
        let region = region_id.and_then(|id| self.page.element_by_id(id));
        feedback::present_error(&self.page, &self.session, &self.config, err, region.as_ref())
    }

    /// Present `message` as a success in the element `region_id`, or as an alert.
    pub fn present_success(&self, message: &str, region_id: Option<&str>) {
        let region = region_id.and_then(|id| self.page.element_by_id(id));
        feedback::present_success(&self.page, message, region.as_ref());
    }

    /// # Errors
    ///
    /// Returns the presented [`ApiError`] when sign-in fails.
    pub async fn login(&self, credentials: &LoginRequest, region_id: Option<&str>) -> Result<(), ApiError> {
        let region = region_id.and_then(|id| self.page.element_by_id(id));
        crate::auth::login(&self.page, &self.session, &self.transport, &self.config, credentials, region.as_ref())
            .await
    }

    /// # Errors
    ///
    /// Returns the presented [`ApiError`] when registration fails.
    pub async fn register(&self, form: &RegisterRequest, region_id: Option<&str>) -> Result<(), ApiError> {
        let region = region_id.and_then(|id| self.page.element_by_id(id));
        crate::auth::register(&self.page, &self.session, &self.transport, &self.config, form, region.as_ref()).await
    }

    /// Spinner on the button `button_id`; false when no such button exists.
    pub fn show_loading(&self, button_id: &str) -> bool {
        self.page.element_by_id(button_id).map(|b| loading::show_loading(&b)).is_some()
    }

    /// Restore the button `button_id` with `text`; false when it is gone.
    pub fn hide_loading(&self, button_id: &str, text: &str) -> bool {
        self.page.element_by_id(button_id).map(|b| loading::hide_loading(&b, text)).is_some()
    }

    pub fn debouncer(&self, wait_ms: u32) -> Debouncer<P> {
        Debouncer::new(self.page.clone(), wait_ms)
    }

    /// The stored user record, if signed in.
    pub fn current_user(&self) -> Option<serde_json::Value> {
        self.session.user()
    }
}
