//! Threshold settings — user-configured numeric targets the rules compare against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;

pub const BEDROOM_TARGET_TEMPERATURE: &str = "bedroom_target_temperature";
pub const HOT_WATER_TARGET_TEMPERATURE: &str = "hot_water_target_temperature";

/// Setting-name → value mapping. Read-only to the rule engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdSettings(BTreeMap<String, f64>);

impl ThresholdSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingThreshold`] when `name` is not configured.
    pub fn get(&self, name: &str) -> Result<f64, EvaluationError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::MissingThreshold {
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for ThresholdSettings {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_configured_value() {
        let settings = ThresholdSettings::new().with(BEDROOM_TARGET_TEMPERATURE, 21.0);
        assert!((settings.get(BEDROOM_TARGET_TEMPERATURE).unwrap() - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_fail_when_threshold_missing() {
        let err = ThresholdSettings::new()
            .get(HOT_WATER_TARGET_TEMPERATURE)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::MissingThreshold { name } if name == HOT_WATER_TARGET_TEMPERATURE));
    }

    #[test]
    fn should_serialize_as_flat_object() {
        let settings = ThresholdSettings::new().with(BEDROOM_TARGET_TEMPERATURE, 21.5);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"bedroom_target_temperature":21.5}"#);
    }
}
