//! JSON handlers for manual rule cycles and alert memory.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthouse_app::ports::{Controller, Notifier, SettingsRepository};
use smarthouse_app::services::house_manager::CycleReport;
use smarthouse_domain::alert::AlertMemory;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the cycle endpoint.
pub enum RunResponse {
    Ok(Json<CycleReport>),
}

impl IntoResponse for RunResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/cycle`
pub async fn run<C, S, N>(State(state): State<AppState<C, S, N>>) -> Result<RunResponse, ApiError>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let report = state.manager.run_cycle().await?;
    Ok(RunResponse::Ok(Json(report)))
}

/// `GET /api/alerts`
pub async fn alerts<C, S, N>(State(state): State<AppState<C, S, N>>) -> Json<AlertMemory>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Json(state.manager.alert_memory().await)
}

/// `DELETE /api/alerts`
pub async fn reset_alerts<C, S, N>(State(state): State<AppState<C, S, N>>) -> StatusCode
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    state.manager.reset_alerts().await;
    StatusCode::NO_CONTENT
}
