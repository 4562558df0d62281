//! Logout action and the login/register flows that create a session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login and register are the only writers of the credential; logout and
//! authentication rejections are the only removers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::ClientConfig;
use crate::feedback::present_error;
use crate::net::api;
use crate::net::transport::Transport;
use crate::net::types::{ApiError, AuthResponse, LoginRequest, RegisterRequest};
use crate::page::Page;
use crate::state::session::{Session, SessionStore};
use crate::util::cookie::csrf_token;

/// Invalidate the credential server-side, then clear the session and go to
/// the site root whatever the server said.
pub async fn logout<P, S, T>(page: &P, session: &Session<S>, transport: &T, config: &ClientConfig)
where
    P: Page,
    S: SessionStore,
    T: Transport + ?Sized,
{
    if let Some(token) = session.token() {
        match api::logout(transport, config, &token, csrf_token(&page.cookies())).await {
            Ok(()) => log::info!("logged out"),
            Err(err) => log::warn!("logout request failed, clearing session anyway: {err}"),
        }
    }
    session.clear();
    page.navigate(&config.root_path);
}

fn complete_sign_in<P: Page, S: SessionStore>(
    page: &P,
    session: &Session<S>,
    config: &ClientConfig,
    auth: &AuthResponse,
) {
    session.sign_in(&auth.token, &auth.user);
    log::info!("signed in; continuing to {}", config.landing_path);
    page.navigate(&config.landing_path);
}

/// Log in with `credentials`, persist the session, and continue to the
/// landing page.
///
/// # Errors
///
/// Returns the [`ApiError`] after presenting it in `region` (or an alert).
pub async fn login<P, S, T>(
    page: &P,
    session: &Session<S>,
    transport: &T,
    config: &ClientConfig,
    credentials: &LoginRequest,
    region: Option<&P::Element>,
) -> Result<(), ApiError>
where
    P: Page,
    S: SessionStore,
    T: Transport + ?Sized,
{
    match api::login(transport, config, credentials, csrf_token(&page.cookies())).await {
        Ok(auth) => {
            complete_sign_in(page, session, config, &auth);
            Ok(())
        }
        Err(err) => {
            present_error(page, session, config, &err, region);
            Err(err)
        }
    }
}

/// Register a new account and sign in with the returned credential.
///
/// # Errors
///
/// Returns the [`ApiError`] after presenting it in `region` (or an alert).
pub async fn register<P, S, T>(
    page: &P,
    session: &Session<S>,
    transport: &T,
    config: &ClientConfig,
    form: &RegisterRequest,
    region: Option<&P::Element>,
) -> Result<(), ApiError>
where
    P: Page,
    S: SessionStore,
    T: Transport + ?Sized,
{
    match api::register(transport, config, form, csrf_token(&page.cookies())).await {
        Ok(auth) => {
            complete_sign_in(page, session, config, &auth);
            Ok(())
        }
        Err(err) => {
            present_error(page, session, config, &err, region);
            Err(err)
        }
    }
}
