//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cycle;
#[allow(clippy::missing_errors_doc)]
pub mod house;

use axum::Router;
use axum::routing::{get, post};

use smarthouse_app::ports::{Controller, Notifier, SettingsRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<C, S, N>() -> Router<AppState<C, S, N>>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        .route("/state", get(house::overview::<C, S, N>))
        .route("/controls", post(house::apply_controls::<C, S, N>))
        .route("/cycle", post(cycle::run::<C, S, N>))
        .route(
            "/alerts",
            get(cycle::alerts::<C, S, N>).delete(cycle::reset_alerts::<C, S, N>),
        )
}
