//! Persisted client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The credential and the user record are the only state shared between
//! page-load components. Everything reads and writes them through
//! [`session::Session`].

pub mod session;
