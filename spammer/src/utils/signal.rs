use std::fmt;

use tokio::signal;
use tracing::info;

use crate::error::SpammerResult;

/// Signal types that stop the spammer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM
    Terminate,
    /// SIGINT / Ctrl+C
    Interrupt,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
        }
    }
}

/// Waits for SIGTERM or Ctrl+C
#[cfg(unix)]
pub async fn wait_for_shutdown() -> SpammerResult<ShutdownSignal> {
    use signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let received = tokio::select! {
        _ = sigterm.recv() => ShutdownSignal::Terminate,
        result = signal::ctrl_c() => {
            result?;
            ShutdownSignal::Interrupt
        }
    };
    info!(signal = %received, "Received shutdown signal");
    Ok(received)
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> SpammerResult<ShutdownSignal> {
    signal::ctrl_c().await?;
    info!(signal = %ShutdownSignal::Interrupt, "Received shutdown signal");
    Ok(ShutdownSignal::Interrupt)
}
