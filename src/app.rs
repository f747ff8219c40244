use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks", post(handlers::form_add_task))
        .route("/tasks/:index/toggle", post(handlers::form_toggle_task))
        .route("/dark-mode", post(handlers::form_toggle_dark_mode))
        .route("/api/tasks", get(handlers::get_board).post(handlers::add_task))
        .route("/api/tasks/:index/toggle", post(handlers::toggle_task))
        .route("/api/dark-mode", post(handlers::toggle_dark_mode))
        .with_state(state)
}
