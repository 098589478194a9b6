//! Settings port — persistence for user-configured thresholds.

use std::future::Future;

use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::settings::ThresholdSettings;

/// Repository for [`ThresholdSettings`].
pub trait SettingsRepository {
    /// Get a single threshold by name.
    fn get(&self, name: &str)
    -> impl Future<Output = Result<Option<f64>, SmartHouseError>> + Send;

    /// Get every configured threshold.
    fn get_all(&self) -> impl Future<Output = Result<ThresholdSettings, SmartHouseError>> + Send;

    /// Create or replace a single threshold.
    fn set(&self, name: &str, value: f64)
    -> impl Future<Output = Result<(), SmartHouseError>> + Send;

    /// Store every threshold of `settings` atomically: all of them or none.
    fn set_many(
        &self,
        settings: ThresholdSettings,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send;
}

impl<T: SettingsRepository + Send + Sync> SettingsRepository for std::sync::Arc<T> {
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<f64>, SmartHouseError>> + Send {
        (**self).get(name)
    }

    fn get_all(&self) -> impl Future<Output = Result<ThresholdSettings, SmartHouseError>> + Send {
        (**self).get_all()
    }

    fn set(
        &self,
        name: &str,
        value: f64,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        (**self).set(name, value)
    }

    fn set_many(
        &self,
        settings: ThresholdSettings,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        (**self).set_many(settings)
    }
}
