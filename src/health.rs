use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrainState {
    Healthy,
    Average,
    Rotten,
}

/// Progress toward the daily goal as a percentage in `0.0..=100.0`.
///
/// The live session only counts while it is running. A zero goal is treated
/// as already met.
pub fn health_percent(daily_total: u64, goal_minutes: u32, live_elapsed: u64, is_running: bool) -> f64 {
    let goal_seconds = u64::from(goal_minutes) * 60;
    if goal_seconds == 0 {
        return 100.0;
    }
    let live = if is_running { live_elapsed } else { 0 };
    let focused = daily_total.saturating_add(live) as f64;
    (focused / goal_seconds as f64 * 100.0).min(100.0)
}

pub fn brain_state(health_percent: f64) -> BrainState {
    if health_percent >= 80.0 {
        BrainState::Healthy
    } else if health_percent >= 40.0 {
        BrainState::Average
    } else {
        BrainState::Rotten
    }
}

pub fn status_label(state: BrainState) -> &'static str {
    match state {
        BrainState::Healthy => "OPTIMAL PERFORMANCE",
        BrainState::Average => "STAYING SHARP",
        BrainState::Rotten => "BRAINROT ALERT",
    }
}

pub fn status_color_class(state: BrainState) -> &'static str {
    match state {
        BrainState::Healthy => "text-green-400",
        BrainState::Average => "text-yellow-400",
        BrainState::Rotten => "text-red-500",
    }
}

/// Fill color of the health bar. Uses its own cut-offs, not the brain state's.
pub fn health_bar_class(health_percent: f64) -> &'static str {
    let clamped = health_percent.clamp(0.0, 100.0);
    if clamped > 70.0 {
        "bar-green"
    } else if clamped > 30.0 {
        "bar-yellow"
    } else {
        "bar-red"
    }
}

/// `MM:SS`, or `HH:MM:SS` once the hour mark is reached.
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
