use crate::health::BrainState;
use crate::tracker::SessionState;
use serde::{Deserialize, Serialize};

/// Everything the page needs to draw itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub date_key: String,
    pub session_state: SessionState,
    pub session_elapsed_seconds: u64,
    pub timer_display: String,
    pub total_focus_seconds_today: u64,
    pub health_percent: f64,
    pub health_bar_class: String,
    pub brain_state: BrainState,
    pub status_label: String,
    pub status_color_class: String,
    pub daily_goal_minutes: u32,
    pub is_running: bool,
    pub tip_text: Option<String>,
    pub is_tip_loading: bool,
}

/// Goal as sent by the page: a JSON number or the raw input text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GoalInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl GoalInput {
    pub fn minutes(&self) -> Option<i64> {
        match self {
            GoalInput::Number(minutes) => Some(*minutes),
            GoalInput::Text(text) => crate::ledger::parse_goal_input(text),
            GoalInput::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub minutes: Option<GoalInput>,
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    pub minutes: String,
}
