use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use chrono::{Local, NaiveDateTime};
use pulse_analytics::ReportGenerator;
use pulse_core::{PulseError, YearMonth};
use serde::Deserialize;

// ── Health ──────────────────────────────────────────────────────────────

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ── Error mapping ───────────────────────────────────────────────────────

fn error_response(err: PulseError) -> (StatusCode, String) {
    let status = match &err {
        PulseError::DuplicateKey(_) => StatusCode::CONFLICT,
        PulseError::NotFound(_) => StatusCode::NOT_FOUND,
        PulseError::InvalidInterval { .. } | PulseError::InvalidArgument(_) => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, err.to_string())
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, (StatusCode, String)> {
    value
        .parse::<NaiveDateTime>()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid timestamp: {value}")))
}

// ── Users ───────────────────────────────────────────────────────────────

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/user", get(get_user))
        .route("/sessions", get(get_user_sessions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterParams {
    user_id: String,
    user_name: String,
}

async fn register_user(
    State(state): State<AppState>,
    Query(params): Query<RegisterParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut analytics = state.analytics.write().await;
    analytics
        .register_user(params.user_id.clone(), params.user_name)
        .map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "userId": params.user_id,
        "registered": true
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserParams {
    user_id: String,
}

async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let analytics = state.analytics.read().await;
    let user = analytics.user(&params.user_id).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("User not found: {}", params.user_id),
        )
    })?;
    Ok(Json(user))
}

async fn get_user_sessions(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let analytics = state.analytics.read().await;
    let sessions = analytics
        .user_sessions(&params.user_id)
        .map_err(error_response)?
        .to_vec();
    Ok(Json(sessions))
}

// ── Sessions ────────────────────────────────────────────────────────────

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/recordSession", post(record_session))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordSessionParams {
    user_id: String,
    login_time: String,
    logout_time: String,
}

async fn record_session(
    State(state): State<AppState>,
    Query(params): Query<RecordSessionParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let login = parse_timestamp(&params.login_time)?;
    let logout = parse_timestamp(&params.logout_time)?;

    let mut analytics = state.analytics.write().await;
    analytics
        .record_session(&params.user_id, login, logout)
        .map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "userId": params.user_id,
        "recorded": true
    })))
}

// ── Activity metrics ────────────────────────────────────────────────────

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/totalActivity", get(total_activity))
        .route("/inactiveUsers", get(inactive_users))
        .route("/monthlyActivity", get(monthly_activity))
        .route("/report", get(monthly_report))
}

async fn total_activity(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let analytics = state.analytics.read().await;
    let minutes = analytics
        .total_activity_time(&params.user_id)
        .map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "userId": params.user_id,
        "totalMinutes": minutes
    })))
}

#[derive(Debug, Deserialize)]
struct InactiveUsersParams {
    days: i64,
}

async fn inactive_users(
    State(state): State<AppState>,
    Query(params): Query<InactiveUsersParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if params.days < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Days parameter can't be negative".into(),
        ));
    }
    // Timestamps are civil local time throughout; sample the clock once here
    // so the scan itself stays deterministic.
    let now = Local::now().naive_local();
    let analytics = state.analytics.read().await;
    Ok(Json(analytics.find_inactive_users(params.days, now)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthParams {
    user_id: String,
    month: String,
}

async fn monthly_activity(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let month: YearMonth = params.month.parse().map_err(error_response)?;
    let analytics = state.analytics.read().await;
    let metric = analytics
        .monthly_activity_metric(&params.user_id, month)
        .map_err(error_response)?;
    Ok(Json(metric))
}

async fn monthly_report(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let month: YearMonth = params.month.parse().map_err(error_response)?;
    let analytics = state.analytics.read().await;
    let report =
        ReportGenerator::monthly_report(&analytics, &params.user_id, month).map_err(error_response)?;
    Ok(report)
}

// ── Status ──────────────────────────────────────────────────────────────

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(user_status))
        .route("/lastSession", get(last_session))
}

async fn user_status(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let analytics = state.analytics.read().await;
    let status = analytics
        .user_status(&params.user_id)
        .map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "userId": params.user_id,
        "status": status.as_str()
    })))
}

async fn last_session(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let analytics = state.analytics.read().await;
    let date = analytics
        .last_session_date(&params.user_id)
        .map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "userId": params.user_id,
        "lastSessionDate": date
    })))
}
