//! Periodic background refresh
//!
//! A [`RefreshSource`] is polled on a fixed interval and every successful
//! result is sent over a crossbeam channel. The host drains that channel on
//! its own event thread, so the viewport is only ever touched from one place.

use crate::Result;
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};

#[cfg(feature = "tokio-runtime")]
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
#[cfg(feature = "tokio-runtime")]
use std::time::Duration;

/// Something worth re-fetching periodically (background image, player positions)
#[async_trait]
pub trait RefreshSource: Send + Sync + 'static {
    type Output: Send + 'static;

    async fn fetch(&self) -> Result<Self::Output>;

    /// Name used in log messages
    fn name(&self) -> &str {
        "refresh"
    }
}

/// Channel pair carrying refresh results to the host
pub fn refresh_channel<T>() -> (Sender<T>, Receiver<T>) {
    unbounded()
}

/// Handle to a running refresh loop
///
/// Stopping the loop leaves whatever was last delivered in place.
#[cfg(feature = "tokio-runtime")]
pub struct RefreshTask {
    shutdown: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

#[cfg(feature = "tokio-runtime")]
impl RefreshTask {
    /// Spawns the loop on the current tokio runtime. The first fetch happens
    /// immediately, then once per `interval`.
    pub fn spawn<S: RefreshSource>(source: S, interval: Duration, sender: Sender<S::Output>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = shutdown.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if stop.load(Ordering::SeqCst) {
                    break;
                }

                match source.fetch().await {
                    Ok(output) => {
                        if sender.send(output).is_err() {
                            log::debug!("{}: receiver dropped, stopping", source.name());
                            break;
                        }
                    }
                    Err(e) => log::warn!("{}: refresh failed: {}", source.name(), e),
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Stops polling; safe to call more than once
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(feature = "tokio-runtime")]
impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::MapError;
    use std::sync::atomic::AtomicU64;

    struct Counter {
        next: AtomicU64,
    }

    #[async_trait]
    impl RefreshSource for Counter {
        type Output = u64;

        async fn fetch(&self) -> Result<u64> {
            let value = self.next.fetch_add(1, Ordering::SeqCst);
            if value == 1 {
                return Err(MapError::Source("transient".into()));
            }
            Ok(value)
        }
    }

    #[tokio::test]
    async fn test_refresh_skips_failures_and_stops() {
        let (tx, rx) = refresh_channel();
        let task = RefreshTask::spawn(
            Counter {
                next: AtomicU64::new(0),
            },
            Duration::from_millis(5),
            tx,
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        task.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(task.is_finished());

        let received: Vec<u64> = rx.try_iter().collect();
        assert!(received.len() >= 2);
        assert_eq!(received[0], 0);
        assert_eq!(received[1], 2);

        // Nothing arrives after stop
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }
}
