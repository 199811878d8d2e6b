use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Cancels a running periodic timer when cancelled or dropped.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.fire();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

pub trait TickSource: Send + Sync {
    /// Starts a one-second timer whose ticks carry `session`.
    fn start(&self, session: u64) -> TickHandle;
}

/// Emits the session number onto a channel once per second until the handle
/// goes away.
#[derive(Clone)]
pub struct TokioTicks {
    events: mpsc::UnboundedSender<u64>,
}

impl TokioTicks {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { events }, receiver)
    }
}

impl TickSource for TokioTicks {
    fn start(&self, session: u64) -> TickHandle {
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            loop {
                interval.tick().await;
                if events.send(session).is_err() {
                    break;
                }
            }
        });
        TickHandle::new(move || task.abort())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{TickHandle, TickSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts timers started and still live; never fires on its own.
    #[derive(Default, Clone)]
    pub struct ManualTicks {
        started: Arc<AtomicUsize>,
        live: Arc<AtomicUsize>,
    }

    impl ManualTicks {
        pub fn started(&self) -> usize {
            self.started.load(Ordering::SeqCst)
        }

        pub fn live(&self) -> usize {
            self.live.load(Ordering::SeqCst)
        }
    }

    impl TickSource for ManualTicks {
        fn start(&self, _session: u64) -> TickHandle {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.live.fetch_add(1, Ordering::SeqCst);
            let live = Arc::clone(&self.live);
            TickHandle::new(move || {
                live.fetch_sub(1, Ordering::SeqCst);
            })
        }
    }
}
