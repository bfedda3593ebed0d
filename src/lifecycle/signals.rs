//! OS signal handling.
//!
//! Waits for the first of SIGINT, SIGTERM or SIGHUP (Ctrl+C only on
//! non-Unix targets). A handler that fails to install is logged and never
//! fires; the remaining ones still work.

use std::fmt;

/// Signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Hangup => "SIGHUP",
        };
        f.write_str(name)
    }
}

/// Wait for a shutdown signal.
#[cfg(unix)]
pub async fn wait_for_signal() -> ShutdownSignal {
    use tokio::signal::unix::SignalKind;

    tokio::select! {
        _ = recv(SignalKind::interrupt()) => ShutdownSignal::Interrupt,
        _ = recv(SignalKind::terminate()) => ShutdownSignal::Terminate,
        _ = recv(SignalKind::hangup()) => ShutdownSignal::Hangup,
    }
}

#[cfg(unix)]
async fn recv(kind: tokio::signal::unix::SignalKind) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(signal = ?kind, error = %e, "Failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Wait for a shutdown signal.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> ShutdownSignal {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    ShutdownSignal::Interrupt
}
