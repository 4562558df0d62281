//! Session Store: the persisted credential and user record.
//!
//! DESIGN
//! ======
//! Components receive a [`Session`] instead of touching `localStorage`
//! directly, so tests swap in [`MemoryStore`]. Presence of a non-empty
//! `auth_token` is the only signal of an authenticated client.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

/// Key-value persistence backing the session.
///
/// Methods take `&self`; implementations use interior mutability the way
/// browser storage does.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Browser `localStorage`. Storage failures (private mode, quota) are
/// treated as missing values.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Typed view over a [`SessionStore`].
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored credential. An empty string counts as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Decode the stored user record. Undecodable records read as absent.
    pub fn user<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist a freshly issued credential with its user record.
    pub fn sign_in(&self, token: &str, user: &serde_json::Value) {
        self.store.set(AUTH_TOKEN_KEY, token);
        self.store.set(USER_KEY, &user.to_string());
    }

    /// Remove both persisted keys.
    pub fn clear(&self) {
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}
