use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Scoped periodic timer.
///
/// Owns a tick thread that invokes the callback once per period. Cadence is
/// best-effort: no catch-up or drift correction is performed. Dropping the
/// handle stops the thread and joins it, so no callback fires after drop
/// returns. Acquire on mount, release on unmount; never ambient global state.
pub struct TickTimer {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    /// Start a timer firing `on_tick` every `period`.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (shutdown, wakeup) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || {
            tracing::debug!(?period, "tick timer started");
            loop {
                // The shutdown channel doubles as the tick clock: a timeout
                // means "tick", anything else means "stop".
                match wakeup.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => on_tick(),
                    _ => break,
                }
            }
            tracing::debug!("tick timer stopped");
        });
        Self {
            shutdown,
            handle: Some(handle),
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn ticks_repeatedly() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = TickTimer::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        std::thread::sleep(Duration::from_millis(100));
        drop(timer);
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn no_ticks_after_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = TickTimer::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        std::thread::sleep(Duration::from_millis(50));
        drop(timer);
        let frozen = count.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), frozen);
    }

    #[test]
    fn drop_without_any_tick() {
        // Dropping before the first period elapses must not hang or fire.
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let timer = TickTimer::spawn(Duration::from_secs(3600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(timer);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
