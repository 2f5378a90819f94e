use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancels the shared token on SIGINT or SIGTERM.
#[derive(Clone, Default)]
pub struct ShutdownCoordinator {
    cancel: CancellationToken,
    requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handlers(&self) {
        let coordinator = self.clone();

        tokio::spawn(async move {
            let ctrl_c = async {
                signal::ctrl_c()
                    .await
                    .expect("Failed to install SIGINT handler");
            };

            #[cfg(unix)]
            let terminate = async {
                signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to install SIGTERM handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => info!(signal = "SIGINT", "Stopping sync."),
                _ = terminate => info!(signal = "SIGTERM", "Stopping sync."),
                _ = coordinator.cancel.cancelled() => return,
            }

            coordinator.request();
        });
    }

    /// Marks shutdown as requested and cancels every run holding the token.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.cancel.cancel();
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    ShutdownRequested = 130,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_cancels_token() {
        let coordinator = ShutdownCoordinator::new();
        let token = coordinator.cancel_token();
        assert!(!coordinator.is_shutdown_requested());

        coordinator.request();

        assert!(token.is_cancelled());
        assert!(coordinator.is_shutdown_requested());
    }
}
