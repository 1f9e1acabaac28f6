//! Diagnostic output port.

/// Sink for failure reports of background work.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticPort: Send + Sync {
    /// Writes one complete report.
    fn report(&self, text: &str);
}
