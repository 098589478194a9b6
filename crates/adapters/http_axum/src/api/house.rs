//! JSON handlers for house state and user controls.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use smarthouse_app::ports::{Controller, Notifier, SettingsRepository};
use smarthouse_app::services::house_manager::{ControlOutcome, HouseOverview};
use smarthouse_domain::control::ControlRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the overview endpoint.
pub enum OverviewResponse {
    Ok(Json<HouseOverview>),
}

impl IntoResponse for OverviewResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the controls endpoint.
pub enum ControlsResponse {
    Ok(Json<ControlOutcome>),
}

impl IntoResponse for ControlsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/state`
pub async fn overview<C, S, N>(
    State(state): State<AppState<C, S, N>>,
) -> Result<OverviewResponse, ApiError>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let overview = state.manager.overview().await?;
    Ok(OverviewResponse::Ok(Json(overview)))
}

/// `POST /api/controls`
pub async fn apply_controls<C, S, N>(
    State(state): State<AppState<C, S, N>>,
    Json(req): Json<ControlRequest>,
) -> Result<ControlsResponse, ApiError>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let outcome = state.manager.apply_controls(req).await?;
    Ok(ControlsResponse::Ok(Json(outcome)))
}
