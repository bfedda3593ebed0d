//! Shutdown coordination for the service.

use std::future::Future;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Cloned handles share one broadcast channel; any clone can trigger, every
/// listener created before the trigger observes it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that completes once shutdown is triggered.
    ///
    /// The listener is registered when this is called, not when first polled.
    pub fn listen(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Closed means every handle is gone, which is a shutdown too.
            let _ = rx.recv().await;
        }
    }

    /// Notify all listeners. Returns how many were waiting.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    /// Number of registered listeners that have not completed yet.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_all_listeners() {
        let shutdown = Shutdown::new();
        let a = shutdown.listen();
        let b = shutdown.clone().listen();
        assert_eq!(shutdown.listener_count(), 2);

        assert_eq!(shutdown.trigger(), 2);

        tokio::time::timeout(Duration::from_secs(1), async {
            a.await;
            b.await;
        })
        .await
        .expect("listeners should complete after trigger");
    }

    #[test]
    fn test_trigger_without_listeners() {
        let shutdown = Shutdown::default();
        assert_eq!(shutdown.trigger(), 0);
        assert_eq!(shutdown.listener_count(), 0);
    }
}
