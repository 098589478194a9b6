//! Shared application state for axum handlers.

use std::sync::Arc;

use smarthouse_app::ports::{Controller, Notifier, SettingsRepository};
use smarthouse_app::services::house_manager::HouseManager;

/// Application state shared across all axum handlers.
///
/// Generic over the controller, settings repository and notifier to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<C, S, N> {
    /// Rule cycles and user controls.
    pub manager: Arc<HouseManager<C, S, N>>,
}

impl<C, S, N> Clone for AppState<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
        }
    }
}

impl<C, S, N> AppState<C, S, N>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Create a new application state owning the manager.
    pub fn new(manager: HouseManager<C, S, N>) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }

    /// Create a new application state from a manager already shared with
    /// background tasks such as the scheduler.
    pub fn from_arc(manager: Arc<HouseManager<C, S, N>>) -> Self {
        Self { manager }
    }
}
