//! State snapshot — one point-in-time read of every device the controller reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::DeviceValue;
use crate::error::EvaluationError;
use crate::time::Timestamp;

/// Immutable device-name → value mapping as read from the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    values: BTreeMap<String, DeviceValue>,
    fetched_at: Timestamp,
}

impl StateSnapshot {
    #[must_use]
    pub fn new(values: BTreeMap<String, DeviceValue>, fetched_at: Timestamp) -> Self {
        Self { values, fetched_at }
    }

    /// Build a snapshot from `(name, value)` pairs, the way the controller lists them.
    ///
    /// Later duplicates win.
    pub fn from_pairs<I, K>(pairs: I, fetched_at: Timestamp) -> Self
    where
        I: IntoIterator<Item = (K, DeviceValue)>,
        K: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Self { values, fetched_at }
    }

    /// When the controller was read.
    #[must_use]
    pub fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, DeviceValue> {
        &self.values
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] when the controller did
    /// not report `key`.
    pub fn get(&self, key: &str) -> Result<&DeviceValue, EvaluationError> {
        self.values
            .get(key)
            .ok_or_else(|| EvaluationError::MissingStateKey {
                key: key.to_string(),
            })
    }

    /// Boolean reading for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] or
    /// [`EvaluationError::UnexpectedStateValue`].
    pub fn bool(&self, key: &str) -> Result<bool, EvaluationError> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| unexpected(key, "boolean"))
    }

    /// Numeric reading for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] or
    /// [`EvaluationError::UnexpectedStateValue`].
    pub fn number(&self, key: &str) -> Result<f64, EvaluationError> {
        self.get(key)?
            .as_number()
            .ok_or_else(|| unexpected(key, "number"))
    }

    /// Numeric reading for a sensor that may report `null` while offline.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] when the key is absent and
    /// [`EvaluationError::UnexpectedStateValue`] when it is neither a number nor null.
    pub fn optional_number(&self, key: &str) -> Result<Option<f64>, EvaluationError> {
        match self.get(key)? {
            DeviceValue::Null => Ok(None),
            DeviceValue::Number(value) => Ok(Some(*value)),
            _ => Err(unexpected(key, "number")),
        }
    }

    /// Text reading for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] or
    /// [`EvaluationError::UnexpectedStateValue`].
    pub fn text(&self, key: &str) -> Result<&str, EvaluationError> {
        self.get(key)?
            .as_text()
            .ok_or_else(|| unexpected(key, "string"))
    }

    /// Fail on the first of `keys` the snapshot does not contain.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] naming that key.
    pub fn require_all(&self, keys: &[&str]) -> Result<(), EvaluationError> {
        keys.iter().try_for_each(|key| self.get(key).map(|_| ()))
    }
}

fn unexpected(key: &str, expected: &'static str) -> EvaluationError {
    EvaluationError::UnexpectedStateValue {
        key: key.to_string(),
        expected,
    }
}
