//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Small stateless helpers the server-rendered pages call into: time
//! labels, cookie lookup, debounced input, and button loading states.

pub mod cookie;
pub mod debounce;
pub mod loading;
pub mod time;
