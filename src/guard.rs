//! Access Guard: page-load redirect decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs first on page ready, before anything that assumes an authenticated
//! context. The decision depends only on credential presence and the current
//! path; it never touches the network and never fails.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::ClientConfig;
use crate::page::Page;
use crate::state::session::{Session, SessionStore};

/// Outcome of the guard for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(String),
}

impl AccessDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Pure redirect decision.
///
/// | credential | public | root | outcome          |
/// |------------|--------|------|------------------|
/// | absent     | no     |      | redirect login   |
/// | absent     | yes    |      | allow            |
/// | present    | no     |      | allow            |
/// | present    | yes    | yes  | allow            |
/// | present    | yes    | no   | redirect landing |
pub fn decide_access(authenticated: bool, path: &str, config: &ClientConfig) -> AccessDecision {
    match (authenticated, config.is_public(path)) {
        (false, false) => AccessDecision::Redirect(config.login_path.clone()),
        (true, true) if path != config.root_path => AccessDecision::Redirect(config.landing_path.clone()),
        _ => AccessDecision::Allow,
    }
}

/// Apply the guard to the current page, navigating away when disallowed.
pub fn run_access_guard<P: Page, S: SessionStore>(
    page: &P,
    session: &Session<S>,
    config: &ClientConfig,
) -> AccessDecision {
    let path = page.current_path();
    let authenticated = session.is_authenticated();
    let decision = decide_access(authenticated, &path, config);
    match &decision {
        AccessDecision::Allow => log::debug!("access guard: allow {path} (authenticated={authenticated})"),
        AccessDecision::Redirect(target) => {
            log::info!("access guard: {path} -> {target} (authenticated={authenticated})");
            page.navigate(target);
        }
    }
    decision
}
