use tokio::sync::watch;

/// Broadcasts a one-shot "stop waiting" flag to batch workers.
#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownListener) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, ShutdownListener { receiver })
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    /// Triggers on CTRL+C, and on SIGTERM where available.
    pub fn install_signal_handlers(&self) {
        let shutdown = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            tracing::info!(target: "shutdown", "termination signal received");
            shutdown.trigger();
        });
    }
}

impl ShutdownListener {
    pub async fn notified(&mut self) {
        // A dropped sender never fires; wait forever instead of spinning.
        if self.receiver.wait_for(|stopped| *stopped).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(err) => {
            tracing::warn!(target: "shutdown", error = %err, "SIGTERM handler unavailable");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn trigger_reaches_existing_and_late_listeners() {
        let (shutdown, mut early) = Shutdown::new();
        assert!(!early.is_triggered());
        shutdown.trigger();
        let mut late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), early.notified())
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(1), late.notified())
            .await
            .unwrap();
        assert!(late.is_triggered());
    }

    #[tokio::test]
    async fn dropped_sender_does_not_fire() {
        let (shutdown, mut listener) = Shutdown::new();
        drop(shutdown);
        let waited = tokio::time::timeout(Duration::from_millis(50), listener.notified()).await;
        assert!(waited.is_err());
    }
}
