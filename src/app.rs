use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/session/toggle", post(handlers::toggle_session_form))
        .route("/goal", post(handlers::set_goal_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/session/toggle", post(handlers::toggle_session))
        .route("/api/goal", post(handlers::set_goal))
        .route("/api/tip", post(handlers::request_tip))
        .with_state(state)
}
