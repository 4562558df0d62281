//! HTTP transport seam.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Tests: a scripted fake that records every request.
//!
//! ERROR HANDLING
//! ==============
//! A request that never reaches the server becomes [`ApiError::Network`];
//! any HTTP response, whatever its status, comes back as `Ok` so callers
//! decide what a status means.

use super::types::{ApiError, ApiRequest, ApiResponse};

/// Sends one API request. Single-threaded: futures need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Issue `request` and wait for the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no HTTP response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Browser `fetch` transport.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        use super::types::Method;
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.path),
            Method::Post => Request::post(&request.path),
        };
        if let Some(auth) = request.authorization() {
            builder = builder.header("Authorization", &auth);
        }
        if request.method == Method::Post {
            if let Some(csrf) = request.csrf_token.as_deref() {
                builder = builder.header("X-CSRFToken", csrf);
            }
        }
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        // Non-JSON bodies (HTML error pages, empty 204s) read as absent.
        let body = resp.json::<serde_json::Value>().await.ok();
        Ok(ApiResponse::new(status, body))
    }
}
