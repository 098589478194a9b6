//! # smarthouse-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the settings port trait defined in `smarthouse-app::ports::settings`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations, seeding default thresholds)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `smarthouse-app` (for port traits) and `smarthouse-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod settings_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use settings_repo::SqliteSettingsRepository;
