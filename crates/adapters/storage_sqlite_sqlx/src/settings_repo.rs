//! `SQLite` implementation of [`SettingsRepository`].

use std::future::Future;

use sqlx::SqlitePool;

use smarthouse_app::ports::SettingsRepository;
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::settings::ThresholdSettings;

use crate::error::StorageError;

const SELECT_BY_NAME: &str = "SELECT value FROM settings WHERE controller_name = ?";
const SELECT_ALL: &str = "SELECT controller_name, value FROM settings";
const UPSERT: &str = "INSERT INTO settings (controller_name, value) VALUES (?, ?) \
     ON CONFLICT (controller_name) DO UPDATE SET value = excluded.value";

/// `SQLite`-backed threshold settings.
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<f64>, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<(f64,)> = sqlx::query_as(SELECT_BY_NAME)
                .bind(&name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|(value,)| value))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<ThresholdSettings, SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String, f64)> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().collect())
        }
    }

    fn set(
        &self,
        name: &str,
        value: f64,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(&name)
                .bind(value)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(setting = %name, value, "threshold stored");
            Ok(())
        }
    }

    fn set_many(
        &self,
        settings: ThresholdSettings,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            for (name, value) in settings.iter() {
                sqlx::query(UPSERT)
                    .bind(name)
                    .bind(value)
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }
            tx.commit().await.map_err(StorageError::from)?;

            tracing::debug!(?settings, "thresholds stored");
            Ok(())
        }
    }
}
