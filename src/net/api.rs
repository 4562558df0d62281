//! REST API helpers for communicating with the server.
//!
//! Each helper builds one [`ApiRequest`], sends it through the injected
//! [`Transport`], and decodes the reply. Session bookkeeping and user
//! feedback stay with the callers.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;

use super::transport::Transport;
use super::types::{ApiError, ApiRequest, AuthResponse, LoginRequest, NotificationCount, RegisterRequest};
use crate::config::ClientConfig;

fn json_body<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Invalidate `token` via `POST /api/auth/logout/`.
///
/// # Errors
///
/// Returns an [`ApiError`] for network failures and non-2xx replies.
pub async fn logout<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    token: &str,
    csrf_token: Option<String>,
) -> Result<(), ApiError> {
    let req = ApiRequest::post(&config.logout_endpoint)
        .with_token(token)
        .with_csrf(csrf_token);
    transport.send(req).await?.into_result()?;
    Ok(())
}

/// Fetch the unread count via `GET /api/notifications/count/`.
///
/// # Errors
///
/// Returns an [`ApiError`] for network failures, non-2xx replies, and
/// bodies without a non-negative `unread_count`.
pub async fn fetch_notification_count<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    token: &str,
) -> Result<NotificationCount, ApiError> {
    let req = ApiRequest::get(&config.notification_count_endpoint).with_token(token);
    transport.send(req).await?.decode()
}

/// Mark every notification read via `POST /api/notifications/mark_all_read/`.
///
/// # Errors
///
/// Returns an [`ApiError`] for network failures and non-2xx replies.
pub async fn mark_all_read<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    token: &str,
    csrf_token: Option<String>,
) -> Result<(), ApiError> {
    let req = ApiRequest::post(&config.mark_all_read_endpoint)
        .with_token(token)
        .with_csrf(csrf_token);
    transport.send(req).await?.into_result()?;
    Ok(())
}

/// Exchange credentials for a token via `POST /api/auth/login/`.
///
/// # Errors
///
/// Returns an [`ApiError`]; validation failures arrive as
/// [`ApiError::Status`] with the server's field errors in the body.
pub async fn login<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    credentials: &LoginRequest,
    csrf_token: Option<String>,
) -> Result<AuthResponse, ApiError> {
    let req = ApiRequest::post(&config.login_endpoint)
        .with_csrf(csrf_token)
        .with_json(json_body(credentials)?);
    transport.send(req).await?.decode()
}

/// Create an account via `POST /api/auth/register/`.
///
/// # Errors
///
/// Returns an [`ApiError`]; validation failures arrive as
/// [`ApiError::Status`] with the server's field errors in the body.
pub async fn register<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    form: &RegisterRequest,
    csrf_token: Option<String>,
) -> Result<AuthResponse, ApiError> {
    let req = ApiRequest::post(&config.register_endpoint)
        .with_csrf(csrf_token)
        .with_json(json_body(form)?);
    transport.send(req).await?.decode()
}
