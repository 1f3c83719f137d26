//! # Termination signals.
//!
//! [`wait_for_shutdown_signal`] completes on the first of:
//! - **Unix:** `SIGINT` (Ctrl-C), `SIGTERM`, `SIGQUIT`
//! - **elsewhere:** Ctrl-C via [`tokio::signal::ctrl_c`]

/// Completes when the process is asked to stop.
///
/// Returns `Err` if the signal handlers cannot be installed.
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut quit = signal(SignalKind::quit())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {},
            _ = quit.recv() => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
