//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema and error taxonomy, `transport` moves
//! requests over HTTP, and `api` names the endpoints this client calls.

pub mod api;
pub mod transport;
pub mod types;
