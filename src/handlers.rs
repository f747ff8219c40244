use crate::day;
use crate::errors::AppError;
use crate::models::{AddTaskRequest, BoardResponse};
use crate::state::AppState;
use crate::stats::day_progress;
use crate::storage::FileStore;
use crate::store::DailyTaskStore;
use crate::ui::{BoardView, render_index};
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = day::today();
    let mut store = state.store.lock().await;
    store.initialize_at(today).await?;
    let show_welcome = store.take_first_visit().await?;

    let view = BoardView {
        display_date: day::display_date(today),
        player_number: day::player_number(today),
        tasks: store.tasks(),
        stats: store.stats(),
        progress: day_progress(),
        dark_mode: store.dark_mode(),
        show_welcome,
    };
    Ok(Html(render_index(&view)))
}

pub async fn get_board(State(state): State<AppState>) -> Result<Json<BoardResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.initialize().await?;
    Ok(Json(to_response(&store)))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<Json<BoardResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.add_task(&payload.text).await?;
    Ok(Json(to_response(&store)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<BoardResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.toggle_task(index).await?;
    Ok(Json(to_response(&store)))
}

pub async fn toggle_dark_mode(State(state): State<AppState>) -> Result<Json<BoardResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.toggle_dark_mode().await?;
    Ok(Json(to_response(&store)))
}

pub async fn form_add_task(
    State(state): State<AppState>,
    Form(payload): Form<AddTaskRequest>,
) -> Result<Redirect, AppError> {
    state.store.lock().await.add_task(&payload.text).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_toggle_task(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    state.store.lock().await.toggle_task(index).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_toggle_dark_mode(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.store.lock().await.toggle_dark_mode().await?;
    Ok(Redirect::to("/"))
}

fn to_response(store: &DailyTaskStore<FileStore>) -> BoardResponse {
    let today = day::today();
    BoardResponse {
        date: day::day_key(today),
        display_date: day::display_date(today),
        player_number: day::player_number(today),
        tasks: store.tasks().to_vec(),
        stats: store.stats(),
        dark_mode: store.dark_mode(),
    }
}
