//! Application services — use-case orchestration.

pub mod dispatcher;
pub mod house_manager;
