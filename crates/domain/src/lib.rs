//! # smarthouse-domain
//!
//! Pure domain model for the smarthouse rule engine.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **device values** and the names of the devices the house exposes
//! - Define **state snapshots** (one read of the controller) and **threshold settings**
//! - Define **write sets** (device writes staged by the rules)
//! - Define **alert memory** and **notifications**
//! - Define **control requests** submitted by users, with their validation
//! - Host the **rule engine**: (snapshot, thresholds, alert memory) → (writes, notifications, alert memory)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod alert;
pub mod control;
pub mod device;
pub mod engine;
pub mod settings;
pub mod state;
pub mod write_set;
