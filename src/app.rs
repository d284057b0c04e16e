use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard).post(handlers::submit_log))
        .route("/history", get(handlers::history))
        .route("/group-stats", get(handlers::group_stats))
        .route("/api/today", get(handlers::get_today))
        .route("/api/history", get(handlers::get_history))
        .with_state(state)
}
