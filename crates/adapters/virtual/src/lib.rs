//! # smarthouse-adapter-virtual
//!
//! Virtual/demo controller that simulates a whole house in memory, for
//! testing and demonstration purposes.
//!
//! ## Simulated devices
//!
//! | Device | Initial value |
//! |--------|---------------|
//! | `leak_detector`, `smoke_detector` | `false` |
//! | `cold_water`, `hot_water`, `boiler` | `true` |
//! | `boiler_temperature` | `78` |
//! | `washing_machine` | `"off"` |
//! | `curtains` | `"open"` |
//! | `outdoor_light` | `30` |
//! | `bedroom_light`, `bathroom_light`, `air_conditioner` | `false` |
//! | `bedroom_temperature` | `21` |
//!
//! Sensor readings only change through [`VirtualHouse::set`]; writes sent
//! through the controller port are applied as-is.
//!
//! ## Dependency rule
//!
//! Depends on `smarthouse-app` (port traits) and `smarthouse-domain` only.

mod house;

pub use house::VirtualHouse;
