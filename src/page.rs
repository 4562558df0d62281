//! Host capabilities: the current page and the elements on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are rendered by the server; this crate only adjusts existing
//! elements, navigates, and schedules timers. Components receive a [`Page`]
//! instead of reaching for `window`/`document`, which keeps the decision
//! logic testable off the browser.

/// Bootstrap visibility class. Hidden elements stay in the document.
pub const HIDDEN_CLASS: &str = "d-none";
pub const ERROR_CLASS: &str = "alert-danger";
pub const SUCCESS_CLASS: &str = "alert-success";
pub const ALERT_CLASS: &str = "alert";

/// A mutable handle to one element on the page.
pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_text(&self, text: &str);
    fn set_html(&self, html: &str);
    fn set_disabled(&self, disabled: bool);
    /// Detach the element from the document.
    fn remove(&self);

    fn show(&self) {
        self.remove_class(HIDDEN_CLASS);
    }

    fn hide(&self) {
        self.add_class(HIDDEN_CLASS);
    }
}

/// The page-level environment one page load runs in.
pub trait Page: Clone + 'static {
    type Element: Element;

    fn current_path(&self) -> String;
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    /// Full navigation. Code after this call should not assume the page
    /// keeps running.
    fn navigate(&self, path: &str);

    /// Blocking modal message.
    fn alert(&self, message: &str);

    /// Run `task` once after `delay_ms`. No cancellation.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Raw `document.cookie` string.
    fn cookies(&self) -> String;
}

/// Navigate to `path` after `delay_ms`.
pub fn navigate_after<P: Page>(page: &P, path: &str, delay_ms: u32) {
    let target = page.clone();
    let path = path.to_owned();
    page.schedule(delay_ms, Box::new(move || target.navigate(&path)));
}

#[cfg(feature = "hydrate")]
pub use browser::{BrowserPage, DomElement};

#[cfg(feature = "hydrate")]
mod browser {
    use wasm_bindgen::JsCast;

    use super::{Element, Page};

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    /// [`Element`] backed by a live DOM node.
    #[derive(Clone, Debug)]
    pub struct DomElement(web_sys::HtmlElement);

    impl Element for DomElement {
        fn add_class(&self, class: &str) {
            let _ = self.0.class_list().add_1(class);
        }

        fn remove_class(&self, class: &str) {
            let _ = self.0.class_list().remove_1(class);
        }

        fn has_class(&self, class: &str) -> bool {
            self.0.class_list().contains(class)
        }

        fn set_text(&self, text: &str) {
            self.0.set_text_content(Some(text));
        }

        fn set_html(&self, html: &str) {
            self.0.set_inner_html(html);
        }

        fn set_disabled(&self, disabled: bool) {
            if let Some(button) = self.0.dyn_ref::<web_sys::HtmlButtonElement>() {
                button.set_disabled(disabled);
            } else if disabled {
                let _ = self.0.set_attribute("disabled", "");
            } else {
                let _ = self.0.remove_attribute("disabled");
            }
        }

        fn remove(&self) {
            web_sys::Element::remove(&self.0);
        }
    }

    /// [`Page`] backed by the browser window.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserPage;

    impl Page for BrowserPage {
        type Element = DomElement;

        fn current_path(&self) -> String {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }

        fn element_by_id(&self, id: &str) -> Option<DomElement> {
            let el = document()?.get_element_by_id(id)?;
            el.dyn_into::<web_sys::HtmlElement>().ok().map(DomElement)
        }

        fn elements_by_class(&self, class: &str) -> Vec<DomElement> {
            let Some(doc) = document() else {
                return Vec::new();
            };
            // The collection is live; snapshot it before callers mutate.
            let collection = doc.get_elements_by_class_name(class);
            (0..collection.length())
                .filter_map(|i| collection.item(i))
                .filter_map(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                .map(DomElement)
                .collect()
        }

        fn navigate(&self, path: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }

        fn alert(&self, message: &str) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            gloo_timers::callback::Timeout::new(delay_ms, task).forget();
        }

        fn cookies(&self) -> String {
            document()
                .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
                .and_then(|d| d.cookie().ok())
                .unwrap_or_default()
        }
    }
}
