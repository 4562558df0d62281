//! Client configuration: endpoints, page paths, and timing constants.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders a page and may embed a JSON override block
//! (`<script id="client-config" type="application/json">`). Anything the
//! block omits keeps the default, so an empty page behaves exactly like the
//! stock deployment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_UNAUTHORIZED_REDIRECT_DELAY_MS: u32 = 2_000;
pub const DEFAULT_ALERT_DISMISS_DELAY_MS: u32 = 5_000;
pub const CONFIG_ELEMENT_ID: &str = "client-config";

/// Errors produced while reading [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The override block is not valid JSON for this schema.
    #[error("config parse failed: {0}")]
    Parse(String),

    /// The override block parsed but describes an unusable layout.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub logout_endpoint: String,
    pub login_endpoint: String,
    pub register_endpoint: String,
    pub notification_count_endpoint: String,
    pub mark_all_read_endpoint: String,

    pub root_path: String,
    pub login_path: String,
    pub register_path: String,
    /// Where an authenticated user lands when visiting login/register.
    pub landing_path: String,
    pub public_pages: Vec<String>,

    pub badge_id: String,

    pub unauthorized_redirect_delay_ms: u32,
    pub alert_dismiss_delay_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            logout_endpoint: "/api/auth/logout/".to_owned(),
            login_endpoint: "/api/auth/login/".to_owned(),
            register_endpoint: "/api/auth/register/".to_owned(),
            notification_count_endpoint: "/api/notifications/count/".to_owned(),
            mark_all_read_endpoint: "/api/notifications/mark_all_read/".to_owned(),
            root_path: "/".to_owned(),
            login_path: "/login/".to_owned(),
            register_path: "/register/".to_owned(),
            landing_path: "/feed/".to_owned(),
            public_pages: vec!["/".to_owned(), "/login/".to_owned(), "/register/".to_owned()],
            badge_id: "notification-badge".to_owned(),
            unauthorized_redirect_delay_ms: DEFAULT_UNAUTHORIZED_REDIRECT_DELAY_MS,
            alert_dismiss_delay_ms: DEFAULT_ALERT_DISMISS_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Parse a (possibly partial) JSON override block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when the resulting layout fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Whether `path` belongs to the fixed public-page set.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_pages.iter().any(|p| p == path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("root_path", &self.root_path),
            ("login_path", &self.login_path),
            ("register_path", &self.register_path),
            ("landing_path", &self.landing_path),
        ];
        for (name, path) in paths {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!("{name} must start with '/': {path}")));
            }
        }
        if let Some(bad) = self.public_pages.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid(format!("public page must start with '/': {bad}")));
        }
        // Anonymous users are sent to these pages; a protected one would
        // redirect forever.
        let entry_pages = [
            ("root_path", &self.root_path),
            ("login_path", &self.login_path),
            ("register_path", &self.register_path),
        ];
        for (name, path) in entry_pages {
            if !self.is_public(path) {
                return Err(ConfigError::Invalid(format!("public_pages must include {name}: {path}")));
            }
        }
        if self.badge_id.is_empty() {
            return Err(ConfigError::Invalid("badge_id must not be empty".to_owned()));
        }
        Ok(())
    }

    /// Read the override block from the current document, falling back to
    /// defaults when it is absent or unusable.
    #[cfg(feature = "hydrate")]
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring page config override: {e}");
                Self::default()
            }
        }
    }
}
