use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login_form))
        .route("/signup", post(handlers::signup_form))
        .route("/logout", post(handlers::logout_form))
        .route("/tasks/add", post(handlers::add_task_form))
        .route("/tasks/remove", post(handlers::remove_task_form))
        .route("/toggle", post(handlers::toggle_form))
        .route("/api/session", get(handlers::get_session))
        .route("/api/login", post(handlers::login))
        .route("/api/signup", post(handlers::signup))
        .route("/api/logout", post(handlers::logout))
        .route("/api/tasks", get(handlers::get_tasks).post(handlers::add_task))
        .route("/api/tasks/remove", post(handlers::remove_task))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}
