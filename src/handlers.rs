use crate::models::{DashboardView, GoalForm, GoalRequest};
use crate::state::AppState;
use crate::tips::{fetch_tip, FALLBACK_TIP};
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::error;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let core = state.core.lock().await;
    Html(render_index(&core.view(state.clock.as_ref())))
}

pub async fn get_state(State(state): State<AppState>) -> Json<DashboardView> {
    let core = state.core.lock().await;
    Json(core.view(state.clock.as_ref()))
}

pub async fn toggle_session(State(state): State<AppState>) -> Json<DashboardView> {
    Json(apply_toggle(&state).await)
}

pub async fn toggle_session_form(State(state): State<AppState>) -> Redirect {
    apply_toggle(&state).await;
    Redirect::to("/")
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Json<DashboardView> {
    let minutes = payload.minutes.and_then(|input| input.minutes());
    Json(apply_goal(&state, minutes).await)
}

pub async fn set_goal_form(State(state): State<AppState>, Form(form): Form<GoalForm>) -> Redirect {
    apply_goal(&state, crate::ledger::parse_goal_input(&form.minutes)).await;
    Redirect::to("/")
}

pub async fn request_tip(State(state): State<AppState>) -> Json<DashboardView> {
    let should_fetch = state.core.lock().await.begin_tip();
    if should_fetch {
        // Owned by the runtime so a dropped request still clears the loading flag.
        let task_state = state.clone();
        let fetch = tokio::spawn(async move {
            let tip = fetch_tip(task_state.tips.as_ref(), task_state.tip_timeout).await;
            task_state.core.lock().await.finish_tip(tip);
        });
        if let Err(err) = fetch.await {
            error!("tip task failed: {err}");
            state.core.lock().await.finish_tip(FALLBACK_TIP.to_string());
        }
    }

    let core = state.core.lock().await;
    Json(core.view(state.clock.as_ref()))
}

async fn apply_toggle(state: &AppState) -> DashboardView {
    let mut core = state.core.lock().await;
    core.start_stop(state.clock.as_ref(), &state.ticks);
    state.persist(core.data()).await;
    core.view(state.clock.as_ref())
}

async fn apply_goal(state: &AppState, minutes: Option<i64>) -> DashboardView {
    let mut core = state.core.lock().await;
    if core.set_goal(minutes) {
        state.persist(core.data()).await;
    }
    core.view(state.clock.as_ref())
}
