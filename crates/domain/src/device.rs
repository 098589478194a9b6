//! Device names and the values the controller reports for them.

use serde::{Deserialize, Serialize};

pub const LEAK_DETECTOR: &str = "leak_detector";
pub const SMOKE_DETECTOR: &str = "smoke_detector";
pub const COLD_WATER: &str = "cold_water";
pub const HOT_WATER: &str = "hot_water";
pub const BOILER: &str = "boiler";
pub const BOILER_TEMPERATURE: &str = "boiler_temperature";
pub const WASHING_MACHINE: &str = "washing_machine";
pub const CURTAINS: &str = "curtains";
pub const OUTDOOR_LIGHT: &str = "outdoor_light";
pub const BEDROOM_LIGHT: &str = "bedroom_light";
pub const BATHROOM_LIGHT: &str = "bathroom_light";
pub const BEDROOM_TEMPERATURE: &str = "bedroom_temperature";
pub const AIR_CONDITIONER: &str = "air_conditioner";

/// Every key the rules read. A snapshot missing one of them cannot be evaluated.
pub const REQUIRED_KEYS: [&str; 8] = [
    LEAK_DETECTOR,
    BOILER_TEMPERATURE,
    CURTAINS,
    OUTDOOR_LIGHT,
    BEDROOM_LIGHT,
    BEDROOM_TEMPERATURE,
    SMOKE_DETECTOR,
    COLD_WATER,
];

/// Curtain positions understood by the controller.
pub mod curtains {
    pub const OPEN: &str = "open";
    pub const CLOSE: &str = "close";
    pub const SLIGHTLY_OPEN: &str = "slightly_open";
}

/// Washing machine modes understood by the controller.
pub mod washing_machine {
    pub const ON: &str = "on";
    pub const OFF: &str = "off";
}

/// A single value reported by, or written to, the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl DeviceValue {
    /// Build a [`DeviceValue::Text`].
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for DeviceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for DeviceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DeviceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for DeviceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Null => f.write_str("null"),
        }
    }
}
