//! Application layer with callback plumbing and failure isolation.

/// Application services.
pub mod services;

pub use services::{
    Callback, ListenerDispatcher, StderrDiagnostics, ensure_async, safe_call, spawn_safe,
};
