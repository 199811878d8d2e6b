use crate::clock::Clock;
use crate::ledger;
use crate::storage::KeyValueStore;
use crate::ticker::{TickHandle, TickSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const SESSION_ANCHOR_KEY: &str = "sessionStartTime";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct SessionTracker {
    state: SessionState,
    elapsed_seconds: u64,
    session: u64,
    ticker: Option<TickHandle>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self {
            state: SessionState::Stopped,
            elapsed_seconds: 0,
            session: 0,
            ticker: None,
        }
    }
}

impl SessionTracker {
    /// A corrupt or non-positive anchor is removed and the tracker starts stopped.
    pub fn restore<S: KeyValueStore + ?Sized>(
        store: &mut S,
        clock: &dyn Clock,
        ticks: &dyn TickSource,
    ) -> Self {
        let Some(raw) = store.get(SESSION_ANCHOR_KEY) else {
            return Self::default();
        };

        let Some(anchor) = parse_anchor(&raw) else {
            warn!(value = %raw, "discarding unreadable session anchor");
            store.remove(SESSION_ANCHOR_KEY);
            return Self::default();
        };

        let elapsed = elapsed_since(anchor, clock.now_millis());
        if elapsed == 0 {
            debug!(anchor, "session anchor implies no elapsed time; starting stopped");
            store.remove(SESSION_ANCHOR_KEY);
            return Self::default();
        }

        info!(elapsed_seconds = elapsed, "resuming focus session");
        let session = 1;
        Self {
            state: SessionState::Running,
            elapsed_seconds: elapsed,
            session,
            ticker: Some(ticks.start(session)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn start<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        clock: &dyn Clock,
        ticks: &dyn TickSource,
    ) -> bool {
        if self.is_running() {
            return false;
        }

        self.elapsed_seconds = 0;
        self.session = self.session.wrapping_add(1);
        store.set(SESSION_ANCHOR_KEY, clock.now_millis().to_string());
        self.ticker = Some(ticks.start(self.session));
        self.state = SessionState::Running;
        true
    }

    /// Credits the session to the date current at stop time.
    pub fn stop<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        clock: &dyn Clock,
    ) -> Option<u64> {
        if !self.is_running() {
            return None;
        }

        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }

        let elapsed = match store.get(SESSION_ANCHOR_KEY).as_deref().and_then(parse_anchor) {
            Some(anchor) => elapsed_since(anchor, clock.now_millis()),
            None => {
                warn!(
                    elapsed_seconds = self.elapsed_seconds,
                    "session anchor missing at stop; crediting live counter"
                );
                self.elapsed_seconds
            }
        };

        let key = ledger::date_key(clock.today());
        let delta = i64::try_from(elapsed).unwrap_or(i64::MAX);
        ledger::add_to_total(store, &key, delta);
        store.remove(SESSION_ANCHOR_KEY);

        self.elapsed_seconds = 0;
        self.state = SessionState::Stopped;
        Some(elapsed)
    }

    /// Ticks from a stopped or earlier session are ignored.
    pub fn tick(&mut self, session: u64) -> bool {
        if !self.is_running() || session != self.session {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }
}

fn parse_anchor(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn elapsed_since(anchor_ms: i64, now_ms: i64) -> u64 {
    let millis = now_ms.saturating_sub(anchor_ms).max(0);
    (millis / 1000) as u64
}
