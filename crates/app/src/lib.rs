//! # smarthouse-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Controller` — read the device snapshot, send device writes
//!   - `SettingsRepository` — get & store threshold settings
//!   - `Notifier` — deliver notifications
//! - Define **driving/inbound ports** as use-case structs:
//!   - `Dispatcher` — send only genuine changes, in one batch
//!   - `HouseManager` — rule cycles and the interactive control path,
//!     serialized per controller
//!   - `Scheduler` — periodic rule cycles
//! - Provide **in-process infrastructure** that doesn't need IO (`LogNotifier`)
//!
//! ## Dependency rule
//! Depends on `smarthouse-domain` only (plus `tokio` for locks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notifier;
pub mod ports;
pub mod scheduler;
pub mod services;
