//! Core components of the runtime.
//!
//! This module contains the pieces the thread pool is built from: the
//! environment-driven configuration read once at startup, and the
//! worker thread wrapper that handles optional core pinning.
pub mod configuration;
pub(crate) mod thread;
