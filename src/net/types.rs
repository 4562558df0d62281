//! Wire types shared by the transport, the endpoint helpers, and the
//! feedback presenters.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Failure of a single API call.
///
/// Every network call resolves to `Ok` or one of these; nothing escapes as a
/// panic or an unhandled rejection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a failure status (or a page script
    /// reported a reply as failed).
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<Value> },

    /// A 2xx response body did not match the expected record.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Rebuild an error from a reply a page script already received.
    ///
    /// `status` 0 means no response. Otherwise the status and JSON body are
    /// kept as given, 2xx included; non-JSON text counts as no body.
    pub fn from_reply(status: u16, raw_body: Option<&str>) -> Self {
        if status == 0 {
            return Self::Network("no response".to_owned());
        }
        let body = raw_body.and_then(|raw| serde_json::from_str(raw).ok());
        let ApiResponse { status, body } = ApiResponse::new(status, body);
        Self::Status { status, body }
    }

    /// HTTP status of the failure; `0` when no response arrived. A parse
    /// failure reports 200 since the response itself succeeded.
    pub fn status(&self) -> u16 {
        match self {
            Self::Network(_) => 0,
            Self::Status { status, .. } => *status,
            Self::Parse(_) => 200,
        }
    }

    /// Parsed error body, if the server sent one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outgoing API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub csrf_token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    fn new(method: Method, path: &str) -> Self {
        Self { method, path: path.to_owned(), token: None, csrf_token: None, body: None }
    }

    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn with_csrf(mut self, csrf_token: Option<String>) -> Self {
        self.csrf_token = csrf_token;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `Authorization` header value: `Token <credential>`.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_deref().map(authorization_header)
    }
}

pub fn authorization_header(token: &str) -> String {
    format!("Token {token}")
}

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Build a response; a `null` or empty-string body counts as no body.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        let body = body.filter(|v| !v.is_null() && v.as_str() != Some(""));
        Self { status, body }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Split into the success body or an [`ApiError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for any non-2xx status.
    pub fn into_result(self) -> Result<Option<Value>, ApiError> {
        if self.ok() {
            Ok(self.body)
        } else {
            Err(ApiError::Status { status: self.status, body: self.body })
        }
    }

    /// Decode a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses and
    /// [`ApiError::Parse`] when the body is missing or has the wrong shape.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let body = self.into_result()?.ok_or_else(|| ApiError::Parse("empty response body".to_owned()))?;
        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// `GET /api/notifications/count/` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCount {
    pub unread_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// Login/register success: a credential plus the opaque user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}
