use crate::clock::Clock;
use crate::health::{
    brain_state, format_clock, health_bar_class, health_percent, status_color_class, status_label,
};
use crate::ledger;
use crate::models::DashboardView;
use crate::storage::AppData;
use crate::ticker::TickSource;
use crate::tracker::SessionTracker;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Stopped { credited_seconds: u64 },
}

#[derive(Debug, Default)]
struct TipSlot {
    text: Option<String>,
    loading: bool,
}

/// The widget's state: persisted data, the running session and the tip slot.
#[derive(Debug)]
pub struct FocusCore {
    data: AppData,
    tracker: SessionTracker,
    tip: TipSlot,
}

impl FocusCore {
    pub fn restore(mut data: AppData, clock: &dyn Clock, ticks: &dyn TickSource) -> Self {
        let tracker = SessionTracker::restore(&mut data, clock, ticks);
        Self {
            data,
            tracker,
            tip: TipSlot::default(),
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn start_stop(&mut self, clock: &dyn Clock, ticks: &dyn TickSource) -> Toggle {
        match self.tracker.stop(&mut self.data, clock) {
            Some(credited_seconds) => {
                info!(credited_seconds, "focus session stopped");
                Toggle::Stopped { credited_seconds }
            }
            None => {
                self.tracker.start(&mut self.data, clock, ticks);
                info!("focus session started");
                Toggle::Started
            }
        }
    }

    /// Returns whether the goal changed.
    pub fn set_goal(&mut self, minutes: Option<i64>) -> bool {
        let Some(minutes) = minutes else {
            debug!("ignoring non-numeric goal");
            return false;
        };
        let accepted = ledger::set_goal_minutes(&mut self.data, minutes);
        if accepted {
            info!(minutes, "daily goal updated");
        } else {
            debug!(minutes, "ignoring non-positive goal");
        }
        accepted
    }

    pub fn tick(&mut self, session: u64) -> bool {
        self.tracker.tick(session)
    }

    /// Marks a tip as loading. `false` if one is already on its way.
    pub fn begin_tip(&mut self) -> bool {
        if self.tip.loading {
            return false;
        }
        self.tip.loading = true;
        self.tip.text = None;
        true
    }

    pub fn finish_tip(&mut self, text: String) {
        self.tip.text = Some(text);
        self.tip.loading = false;
    }

    pub fn view(&self, clock: &dyn Clock) -> DashboardView {
        let date_key = ledger::date_key(clock.today());
        let total = ledger::total_for(&self.data, &date_key);
        let goal = ledger::goal_minutes(&self.data);
        let elapsed = self.tracker.elapsed_seconds();
        let is_running = self.tracker.is_running();
        let percent = health_percent(total, goal, elapsed, is_running);
        let state = brain_state(percent);

        DashboardView {
            date_key,
            session_state: self.tracker.state(),
            session_elapsed_seconds: elapsed,
            timer_display: format_clock(elapsed),
            total_focus_seconds_today: total,
            health_percent: percent,
            health_bar_class: health_bar_class(percent).to_string(),
            brain_state: state,
            status_label: status_label(state).to_string(),
            status_color_class: status_color_class(state).to_string(),
            daily_goal_minutes: goal,
            is_running,
            tip_text: self.tip.text.clone(),
            is_tip_loading: self.tip.loading,
        }
    }
}
