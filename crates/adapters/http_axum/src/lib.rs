//! # smarthouse-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** over the house manager
//!   (`/api/state`, `/api/controls`, `/api/cycle`, `/api/alerts`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `smarthouse-app` (for port traits and services) and
//! `smarthouse-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
