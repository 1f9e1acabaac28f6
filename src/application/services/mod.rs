pub mod callback;
pub mod listener_dispatcher;
pub mod safe_call;

pub use callback::{Callback, ensure_async};
pub use listener_dispatcher::{Listener, ListenerDispatcher};
pub use safe_call::{StderrDiagnostics, safe_call, safe_call_with, spawn_safe, spawn_safe_with};
