//! Failure isolation for fire-and-forget work.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};

use color_eyre::eyre::Report;
use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tracing::error;

use crate::domain::ports::DiagnosticPort;

/// Writes reports to the process's standard error stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

impl DiagnosticPort for StderrDiagnostics {
    fn report(&self, text: &str) {
        eprintln!("{text}");
    }
}

/// Where the last panic on this thread happened, recorded by the chained hook.
struct PanicSite {
    location: Option<String>,
    backtrace: Option<String>,
}

thread_local! {
    static LAST_PANIC: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static PANIC_CAPTURE: Once = Once::new();

// Chains onto the current hook, so the process-wide panic output is unchanged.
fn install_panic_capture() {
    PANIC_CAPTURE.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::capture();
            let site = PanicSite {
                location: info.location().map(ToString::to_string),
                backtrace: (backtrace.status() == BacktraceStatus::Captured)
                    .then(|| backtrace.to_string()),
            };
            LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(site));
            previous(info);
        }));
    });
}

// The future is polled on the panicking thread, so the slot holds its site.
fn take_panic_site() -> Option<PanicSite> {
    LAST_PANIC.with(|slot| slot.borrow_mut().take())
}

fn panic_report(message: &str, site: Option<PanicSite>) -> String {
    let Some(site) = site else {
        return format!("task panicked: {message}");
    };
    let mut report = match site.location {
        Some(location) => format!("task panicked at {location}: {message}"),
        None => format!("task panicked: {message}"),
    };
    if let Some(backtrace) = site.backtrace {
        report.push_str("\nStack backtrace:\n");
        report.push_str(&backtrace);
    }
    report
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Runs `work` to completion, reporting instead of propagating any failure.
///
/// Both `Err` results and panics are caught. The report is the error chain,
/// or the panic message with its location, plus the backtrace when
/// `RUST_BACKTRACE` enables capture. It is preceded by `label` and a newline when a
/// label is given, and goes to standard error.
pub async fn safe_call<F, T, E>(work: F, label: Option<&str>)
where
    F: Future<Output = Result<T, E>>,
    E: Into<Report>,
{
    safe_call_with(&StderrDiagnostics, work, label).await;
}

/// [`safe_call`] with an explicit report sink.
pub async fn safe_call_with<F, T, E>(diagnostics: &dyn DiagnosticPort, work: F, label: Option<&str>)
where
    F: Future<Output = Result<T, E>>,
    E: Into<Report>,
{
    install_panic_capture();

    let details = match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(_)) => return,
        Ok(Err(e)) => {
            let report: Report = e.into();
            error!(label = label.unwrap_or_default(), error = %report, "Background task failed");
            format!("{report:?}")
        }
        Err(panic) => {
            let message = panic_message(&*panic);
            let site = take_panic_site();
            error!(
                label = label.unwrap_or_default(),
                panic = %message,
                location = site.as_ref().and_then(|s| s.location.as_deref()).unwrap_or_default(),
                "Background task panicked"
            );
            panic_report(&message, site)
        }
    };

    let text = match label {
        Some(label) => format!("{label}\n{details}"),
        None => details,
    };
    diagnostics.report(&text);
}

/// Starts `work` as an independent task guarded by [`safe_call`].
pub fn spawn_safe<F, T, E>(work: F, label: Option<String>) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<Report> + Send + 'static,
{
    spawn_safe_with(Arc::new(StderrDiagnostics), work, label)
}

/// [`spawn_safe`] with an explicit report sink.
pub fn spawn_safe_with<F, T, E>(
    diagnostics: Arc<dyn DiagnosticPort>,
    work: F,
    label: Option<String>,
) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<Report> + Send + 'static,
{
    tokio::spawn(async move {
        safe_call_with(diagnostics.as_ref(), work, label.as_deref()).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockDiagnosticPort;
    use color_eyre::eyre::eyre;

    #[tokio::test]
    async fn test_error_is_reported_with_label() {
        let mut diagnostics = MockDiagnosticPort::new();
        diagnostics
            .expect_report()
            .withf(|text| text.starts_with("Exception in listener READY\n") && text.contains("boom"))
            .times(1)
            .return_const(());

        safe_call_with(
            &diagnostics,
            async { Err::<(), _>(eyre!("boom")) },
            Some("Exception in listener READY"),
        )
        .await;
    }

    #[tokio::test]
    async fn test_error_without_label() {
        let mut diagnostics = MockDiagnosticPort::new();
        diagnostics
            .expect_report()
            .withf(|text| text.contains("disk full"))
            .times(1)
            .return_const(());

        safe_call_with(
            &diagnostics,
            async { Err::<(), _>(std::io::Error::other("disk full")) },
            None,
        )
        .await;
    }

    #[tokio::test]
    async fn test_success_is_silent() {
        let mut diagnostics = MockDiagnosticPort::new();
        diagnostics.expect_report().never();

        safe_call_with(&diagnostics, async { Ok::<_, Report>(42) }, Some("label")).await;
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let mut diagnostics = MockDiagnosticPort::new();
        diagnostics
            .expect_report()
            .withf(|text| {
                text.starts_with("worker\ntask panicked at ")
                    && text.contains("safe_call.rs")
                    && text.contains(": kaboom")
            })
            .times(1)
            .return_const(());

        safe_call_with(
            &diagnostics,
            async {
                let value: Option<u8> = None;
                if value.is_none() {
                    panic!("kaboom");
                }
                Ok::<(), Report>(())
            },
            Some("worker"),
        )
        .await;
    }

    #[tokio::test]
    async fn test_stderr_default_does_not_propagate() {
        safe_call(async { Err::<(), _>(eyre!("ignored")) }, Some("stderr")).await;
    }

    #[test]
    fn test_panic_report_without_site() {
        assert_eq!(panic_report("boom", None), "task panicked: boom");
    }

    #[test]
    fn test_panic_report_with_backtrace() {
        let site = PanicSite {
            location: Some("src/lib.rs:10:5".to_string()),
            backtrace: Some("   0: dico::listener".to_string()),
        };
        assert_eq!(
            panic_report("boom", Some(site)),
            "task panicked at src/lib.rs:10:5: boom\nStack backtrace:\n   0: dico::listener"
        );
    }

    #[tokio::test]
    async fn test_spawn_safe_default_sink_swallows_failure() {
        let handle = spawn_safe(
            async { Err::<(), _>(eyre!("reported to stderr")) },
            Some("Exception in listener READY".to_string()),
        );

        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_spawned_task_completes_normally() {
        let mut diagnostics = MockDiagnosticPort::new();
        diagnostics.expect_report().times(1).return_const(());

        let handle = spawn_safe_with(
            Arc::new(diagnostics),
            async { Err::<(), _>(eyre!("background")) },
            Some("task".to_string()),
        );

        assert!(handle.await.is_ok());
    }
}
