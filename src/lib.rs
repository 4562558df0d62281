//! # social-client
//!
//! Browser behavior layer for the server-rendered social-media site.
//!
//! Pages are rendered by the server; this crate runs once per page load to
//! guard access based on the stored credential, keep the unread
//! notification badge in sync, log the user out, and turn API failures
//! into on-page feedback.
//!
//! Built natively (default features) every component runs against injected
//! capabilities for testing. With `hydrate` the crate compiles to WASM and
//! wires those capabilities to `web-sys`, `gloo-net`, and `gloo-timers`.

pub mod app;
pub mod auth;
pub mod config;
pub mod feedback;
pub mod guard;
pub mod net;
pub mod notifications;
pub mod page;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;

#[cfg(feature = "hydrate")]
mod browser {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use crate::app::{Client, must_wait_for_dom};
    use crate::config::ClientConfig;
    use crate::net::transport::GlooTransport;
    use crate::net::types::{ApiError, LoginRequest, RegisterRequest};
    use crate::page::BrowserPage;
    use crate::state::session::LocalStorageStore;
    use crate::util::debounce::Debouncer;

    type BrowserClient = Client<BrowserPage, LocalStorageStore, GlooTransport>;

    fn client() -> Rc<BrowserClient> {
        Rc::new(Client::new(BrowserPage, LocalStorageStore, GlooTransport, ClientConfig::load()))
    }

    fn page_ready() {
        let client = client();
        wasm_bindgen_futures::spawn_local(async move {
            let load = client.run_page().await;
            log::debug!("page ready: {load:?}");
        });
    }

    /// Module start: install logging, then run the page-ready hook once the
    /// document is interactive.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if must_wait_for_dom(&document.ready_state()) {
            let on_ready = Closure::once_into_js(page_ready);
            let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
        } else {
            page_ready();
        }
    }

    /// Logout button handler.
    #[wasm_bindgen]
    pub fn logout() {
        let client = client();
        wasm_bindgen_futures::spawn_local(async move {
            client.logout().await;
        });
    }

    /// On-demand badge refresh.
    #[wasm_bindgen(js_name = refreshNotificationBadge)]
    pub fn refresh_notification_badge() {
        let client = client();
        wasm_bindgen_futures::spawn_local(async move {
            client.refresh_badge().await;
        });
    }

    /// "Mark all read" handler; errors show in `region_id` when given.
    #[wasm_bindgen(js_name = markAllNotificationsRead)]
    pub fn mark_all_notifications_read(region_id: Option<String>) {
        let client = client();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = client.mark_all_read(region_id.as_deref()).await;
        });
    }

    /// Relative label for an RFC 3339 timestamp; the input when unparseable.
    #[wasm_bindgen(js_name = formatRelativeTime)]
    pub fn format_relative_time(raw: &str) -> String {
        crate::util::time::format_timestamp_now(raw).unwrap_or_else(|| raw.to_owned())
    }

    /// Error feedback for page scripts. `status` 0 means the request never
    /// got a response; `body` is the raw response text, if any.
    #[wasm_bindgen(js_name = showApiError)]
    pub fn show_api_error(status: u16, body: Option<String>, region_id: Option<String>) -> String {
        let err = ApiError::from_reply(status, body.as_deref());
        client().present_error(&err, region_id.as_deref())
    }

    /// Success feedback for page scripts.
    #[wasm_bindgen(js_name = showSuccess)]
    pub fn show_success(message: &str, region_id: Option<String>) {
        client().present_success(message, region_id.as_deref());
    }

    /// Login form handler; errors show in `region_id` when given.
    #[wasm_bindgen]
    pub fn login(username: String, password: String, region_id: Option<String>) {
        let client = client();
        wasm_bindgen_futures::spawn_local(async move {
            let credentials = LoginRequest { username, password };
            let _ = client.login(&credentials, region_id.as_deref()).await;
        });
    }

    /// Registration form handler. `form` is the JSON-serialized form.
    #[wasm_bindgen]
    pub fn register(form: &str, region_id: Option<String>) {
        let client = client();
        let form: RegisterRequest = match serde_json::from_str(form) {
            Ok(form) => form,
            Err(e) => {
                log::warn!("unreadable registration form: {e}");
                client.present_error(&ApiError::Parse(e.to_string()), region_id.as_deref());
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            let _ = client.register(&form, region_id.as_deref()).await;
        });
    }

    #[wasm_bindgen(js_name = showLoading)]
    pub fn show_loading(button_id: &str) -> bool {
        client().show_loading(button_id)
    }

    #[wasm_bindgen(js_name = hideLoading)]
    pub fn hide_loading(button_id: &str, text: &str) -> bool {
        client().hide_loading(button_id, text)
    }

    /// Stored user record as JSON text, or `undefined` when signed out.
    #[wasm_bindgen(js_name = currentUser)]
    pub fn current_user() -> Option<String> {
        client().current_user().map(|user| user.to_string())
    }

    /// Debounced callback runner for page scripts.
    #[wasm_bindgen]
    pub struct Debounce {
        inner: Debouncer<BrowserPage>,
    }

    #[wasm_bindgen]
    impl Debounce {
        #[wasm_bindgen(constructor)]
        pub fn new(wait_ms: u32) -> Debounce {
            Debounce { inner: client().debouncer(wait_ms) }
        }

        /// Run `callback` once `wait_ms` passes without another call.
        pub fn call(&self, callback: js_sys::Function) {
            self.inner.call(move || {
                let _ = callback.call0(&JsValue::NULL);
            });
        }
    }
}
