use log::info;
use tokio::sync::watch;

/// Latched stop signal shared by the polling loop and the signal handler.
///
/// Once triggered it stays triggered: guards created afterwards observe it
/// immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stopped: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    pub fn subscribe(&self) -> ShutdownGuard {
        ShutdownGuard {
            stopped: self.stopped.subscribe(),
        }
    }

    pub fn shutdown(&self) {
        if !self.stopped.send_replace(true) {
            info!("Shutdown requested, stopping sync");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.stopped.borrow()
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ShutdownGuard {
    stopped: watch::Receiver<bool>,
}

impl ShutdownGuard {
    /// Resolves once shutdown is triggered or every coordinator is dropped.
    pub async fn wait(&mut self) {
        let _ = self.stopped.wait_for(|stopped| *stopped).await;
    }

    pub fn poll_shutdown(&self) -> bool {
        *self.stopped.borrow()
    }
}
