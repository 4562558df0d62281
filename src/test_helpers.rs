//! Shared fakes for unit tests: a recording page and a scripted transport.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::net::transport::Transport;
use crate::net::types::{ApiError, ApiRequest, ApiResponse};
use crate::page::{Element, HIDDEN_CLASS, Page};

// =========================================================================
// FakePage
// =========================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementState {
    pub classes: Vec<String>,
    pub text: String,
    pub html: String,
    pub disabled: bool,
    pub removed: bool,
}

impl ElementState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }
}

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct PageInner {
    path: String,
    cookies: String,
    elements: HashMap<String, ElementState>,
    navigations: Vec<String>,
    alerts: Vec<String>,
    scheduled: Vec<(u32, Task)>,
}

/// In-memory [`Page`]. Clones share state.
#[derive(Clone, Default)]
pub struct FakePage {
    inner: Rc<RefCell<PageInner>>,
}

impl FakePage {
    pub fn at(path: &str) -> Self {
        let page = Self::default();
        page.inner.borrow_mut().path = path.to_owned();
        page
    }

    /// Add an element with the given classes.
    pub fn with_element(self, id: &str, classes: &[&str]) -> Self {
        let state = ElementState { classes: classes.iter().map(|c| (*c).to_owned()).collect(), ..Default::default() };
        self.inner.borrow_mut().elements.insert(id.to_owned(), state);
        self
    }

    pub fn with_cookies(self, cookies: &str) -> Self {
        self.inner.borrow_mut().cookies = cookies.to_owned();
        self
    }

    pub fn element(&self, id: &str) -> ElementState {
        self.inner.borrow().elements.get(id).cloned().unwrap_or_default()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.borrow().navigations.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }

    /// Delays of tasks scheduled and not yet run.
    pub fn scheduled_delays(&self) -> Vec<u32> {
        self.inner.borrow().scheduled.iter().map(|(d, _)| *d).collect()
    }

    /// Run every pending task, including ones scheduled while running.
    pub fn run_timers(&self) {
        loop {
            let tasks = std::mem::take(&mut self.inner.borrow_mut().scheduled);
            if tasks.is_empty() {
                break;
            }
            for (_, task) in tasks {
                task();
            }
        }
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut ElementState)) {
        if let Some(state) = self.inner.borrow_mut().elements.get_mut(id) {
            f(state);
        }
    }
}

pub struct FakeElement {
    id: String,
    page: FakePage,
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.page.update(&self.id, |s| {
            if !s.has_class(class) {
                s.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, class: &str) {
        self.page.update(&self.id, |s| s.classes.retain(|c| c != class));
    }

    fn has_class(&self, class: &str) -> bool {
        self.page.element(&self.id).has_class(class)
    }

    fn set_text(&self, text: &str) {
        self.page.update(&self.id, |s| {
            s.text = text.to_owned();
            s.html = text.to_owned();
        });
    }

    fn set_html(&self, html: &str) {
        self.page.update(&self.id, |s| html.clone_into(&mut s.html));
    }

    fn set_disabled(&self, disabled: bool) {
        self.page.update(&self.id, |s| s.disabled = disabled);
    }

    fn remove(&self) {
        self.page.update(&self.id, |s| s.removed = true);
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn current_path(&self) -> String {
        self.inner.borrow().path.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        let inner = self.inner.borrow();
        let state = inner.elements.get(id)?;
        (!state.removed).then(|| FakeElement { id: id.to_owned(), page: self.clone() })
    }

    fn elements_by_class(&self, class: &str) -> Vec<FakeElement> {
        let inner = self.inner.borrow();
        let mut ids: Vec<&String> =
            inner.elements.iter().filter(|(_, s)| !s.removed && s.has_class(class)).map(|(id, _)| id).collect();
        ids.sort();
        ids.into_iter().map(|id| FakeElement { id: id.clone(), page: self.clone() }).collect()
    }

    fn navigate(&self, path: &str) {
        self.inner.borrow_mut().navigations.push(path.to_owned());
    }

    fn alert(&self, message: &str) {
        self.inner.borrow_mut().alerts.push(message.to_owned());
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.inner.borrow_mut().scheduled.push((delay_ms, task));
    }

    fn cookies(&self) -> String {
        self.inner.borrow().cookies.clone()
    }
}

// =========================================================================
// FakeTransport
// =========================================================================

/// Scripted [`Transport`]: replies in order, records every request. An
/// exhausted script answers with a network error.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse::new(status, Some(body))));
        self
    }

    pub fn reply_empty(self, status: u16) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse::new(status, None)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(ApiError::Network(message.to_owned())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}
