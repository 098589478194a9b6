//! # smarthouse-adapter-controller-http
//!
//! HTTP adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Read the device snapshot from the controller API (`GET`, bearer token)
//! - Send device write batches to the controller API (`POST`)
//! - Deliver notifications as JSON to a webhook (e.g. a mail relay)
//! - Map every transport or protocol failure to `ControllerUnreachable`
//!
//! ## Dependency rule
//! Depends on `smarthouse-app` (for port traits) and `smarthouse-domain` (for domain types).

mod config;
mod controller;
mod error;
mod notifier;

pub use config::{ControllerConfig, WebhookConfig};
pub use controller::HttpController;
pub use error::ControllerError;
pub use notifier::WebhookNotifier;
