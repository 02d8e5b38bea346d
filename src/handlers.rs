use crate::errors::AppError;
use crate::ledger::parse_day;
use crate::models::{
    LoginRequest, RemoveTaskRequest, SessionResponse, SignupRequest, StatsResponse, TaskRequest,
    TasksResponse, ToggleRequest, ToggleResponse, ViewQuery,
};
use crate::state::{AppState, NoticeKind, Tracker};
use crate::stats::today;
use crate::ui::{render_auth, render_dashboard, AuthView};
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Html<String> {
    let mut tracker = state.tracker.lock().await;
    let notice = tracker.take_notice();
    if tracker.identity().is_logged_in {
        Html(render_dashboard(
            tracker.identity().display_name(),
            tracker.tasks(),
            tracker.ledger(),
            today(),
            notice.as_ref(),
        ))
    } else {
        let view = AuthView::from_query(query.view.as_deref());
        Html(render_auth(view, notice.as_ref()))
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    let result = tracker.login(&payload.email, &payload.password).await;
    flash(&mut tracker, result)?;
    Ok(Redirect::to("/"))
}

pub async fn signup_form(
    State(state): State<AppState>,
    Form(payload): Form<SignupRequest>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.signup(&payload.name).await?;
    Ok(Redirect::to("/"))
}

pub async fn logout_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.tracker.lock().await.logout().await?;
    Ok(Redirect::to("/"))
}

pub async fn add_task_form(
    State(state): State<AppState>,
    Form(payload): Form<TaskRequest>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    if tracker.require_session().is_err() || payload.label.trim().is_empty() {
        return Ok(Redirect::to("/"));
    }
    let result = tracker.add_task(&payload.label).await;
    flash(&mut tracker, result)?;
    Ok(Redirect::to("/"))
}

pub async fn remove_task_form(
    State(state): State<AppState>,
    Form(payload): Form<RemoveTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    if tracker.require_session().is_ok() {
        tracker.remove_task(&payload.label, payload.confirmed).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Form(payload): Form<ToggleRequest>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    if tracker.require_session().is_err() {
        return Ok(Redirect::to("/"));
    }
    let result = match parse_day(&payload.day) {
        Ok(day) => tracker.toggle(day, &payload.task).await.map(|_| ()),
        Err(err) => Err(err.into()),
    };
    flash(&mut tracker, result)?;
    Ok(Redirect::to("/"))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let tracker = state.tracker.lock().await;
    Json(session_response(&tracker))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.login(&payload.email, &payload.password).await?;
    Ok(Json(session_response(&tracker)))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.signup(&payload.name).await?;
    tracker.take_notice();
    Ok(Json(session_response(&tracker)))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.logout().await?;
    Ok(Json(session_response(&tracker)))
}

pub async fn get_tasks(State(state): State<AppState>) -> Result<Json<TasksResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    tracker.require_session()?;
    Ok(Json(tasks_response(&tracker)))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskRequest>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.require_session()?;
    tracker.add_task(&payload.label).await?;
    Ok(Json(tasks_response(&tracker)))
}

pub async fn remove_task(
    State(state): State<AppState>,
    Json(payload): Json<RemoveTaskRequest>,
) -> Result<Json<TasksResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.require_session()?;
    tracker.remove_task(&payload.label, payload.confirmed).await?;
    Ok(Json(tasks_response(&tracker)))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let day = parse_day(&payload.day)?;
    let mut tracker = state.tracker.lock().await;
    tracker.require_session()?;
    let response = tracker.toggle(day, &payload.task).await?;
    Ok(Json(response))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    tracker.require_session()?;
    Ok(Json(tracker.stats_at(today())))
}

fn flash(tracker: &mut Tracker, result: Result<(), AppError>) -> Result<(), AppError> {
    match result {
        Err(err) if err.status.is_server_error() => Err(err),
        Err(err) => {
            tracker.set_notice(NoticeKind::Error, err.message);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

fn session_response(tracker: &Tracker) -> SessionResponse {
    SessionResponse {
        authenticated: tracker.identity().is_logged_in,
        name: tracker.identity().display_name().to_string(),
    }
}

fn tasks_response(tracker: &Tracker) -> TasksResponse {
    TasksResponse {
        tasks: tracker.tasks().labels().to_vec(),
    }
}
