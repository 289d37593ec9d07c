use std::io;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::WizardError;

pub const FAREWELL: &str = "Exiting gracefully... Goodbye!";

/// Register interrupt and termination handlers and cancel `token` on the first one.
///
/// Handlers are installed before this returns, so a signal arriving while the
/// first prompt is being shown is not lost.
#[cfg(unix)]
pub fn listen(token: CancellationToken) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("received SIGINT"),
            _ = terminate.recv() => tracing::info!("received SIGTERM"),
            () = token.cancelled() => return,
        }
        token.cancel();
    }))
}

#[cfg(not(unix))]
pub fn listen(token: CancellationToken) -> io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "unable to listen for Ctrl+C");
                    return;
                }
                tracing::info!("received Ctrl+C");
            }
            () = token.cancelled() => return,
        }
        token.cancel();
    }))
}

/// Bail out between wizard steps once a shutdown was requested.
pub fn ensure_active(token: &CancellationToken) -> Result<(), WizardError> {
    if token.is_cancelled() {
        return Err(WizardError::Cancelled);
    }
    Ok(())
}
