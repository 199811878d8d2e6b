use crate::clock::Clock;
use crate::focus::FocusCore;
use crate::storage::{persist_data, AppData};
use crate::ticker::TokioTicks;
use crate::tips::TipGenerator;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::{mpsc, Mutex};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub core: Arc<Mutex<FocusCore>>,
    pub clock: Arc<dyn Clock>,
    pub ticks: TokioTicks,
    pub tips: Arc<dyn TipGenerator>,
    pub tip_timeout: Duration,
}

impl AppState {
    /// Restores the core from `data` and starts applying timer ticks to it.
    /// Must be called inside a tokio runtime.
    pub fn new(
        data_path: PathBuf,
        data: AppData,
        clock: Arc<dyn Clock>,
        tips: Arc<dyn TipGenerator>,
        tip_timeout: Duration,
    ) -> Self {
        let (ticks, events) = TokioTicks::channel();
        let core = FocusCore::restore(data, clock.as_ref(), &ticks);
        let core = Arc::new(Mutex::new(core));
        tokio::spawn(pump_ticks(Arc::clone(&core), events));

        Self {
            data_path,
            core,
            clock,
            ticks,
            tips,
            tip_timeout,
        }
    }

    /// Best-effort write of the store; failures are logged only.
    pub async fn persist(&self, data: &AppData) {
        if let Err(err) = persist_data(&self.data_path, data).await {
            error!("failed to persist data: {err}");
        }
    }
}

async fn pump_ticks(core: Arc<Mutex<FocusCore>>, mut events: mpsc::UnboundedReceiver<u64>) {
    while let Some(session) = events.recv().await {
        core.lock().await.tick(session);
    }
}
