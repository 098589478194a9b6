//! Control request — what a user submits from the settings form.

use serde::{Deserialize, Serialize};

use crate::device::{BATHROOM_LIGHT, BEDROOM_LIGHT};
use crate::error::{SmartHouseError, ValidationError};
use crate::settings::{BEDROOM_TARGET_TEMPERATURE, HOT_WATER_TARGET_TEMPERATURE, ThresholdSettings};
use crate::state::StateSnapshot;
use crate::write_set::WriteSet;

const BEDROOM_TARGET_RANGE: (f64, f64) = (16.0, 50.0);
const HOT_WATER_TARGET_RANGE: (f64, f64) = (24.0, 90.0);

/// Light toggles and threshold updates submitted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlRequest {
    pub bedroom_light: bool,
    pub bathroom_light: bool,
    pub bedroom_target_temperature: f64,
    pub hot_water_target_temperature: f64,
}

impl ControlRequest {
    /// Check the submitted values.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::InvalidUserInput`] when a temperature is not
    /// finite or falls outside its accepted range.
    pub fn validate(&self) -> Result<(), SmartHouseError> {
        check_range(
            BEDROOM_TARGET_TEMPERATURE,
            self.bedroom_target_temperature,
            BEDROOM_TARGET_RANGE,
        )?;
        check_range(
            HOT_WATER_TARGET_TEMPERATURE,
            self.hot_water_target_temperature,
            HOT_WATER_TARGET_RANGE,
        )?;
        Ok(())
    }

    /// Light writes that differ from what the controller currently reports.
    ///
    /// A light the controller does not report counts as different.
    #[must_use]
    pub fn light_toggles(&self, state: &StateSnapshot) -> WriteSet {
        WriteSet::new()
            .with(BEDROOM_LIGHT, self.bedroom_light)
            .with(BATHROOM_LIGHT, self.bathroom_light)
            .changes_from(state)
    }

    /// The submitted thresholds.
    #[must_use]
    pub fn thresholds(&self) -> ThresholdSettings {
        ThresholdSettings::new()
            .with(BEDROOM_TARGET_TEMPERATURE, self.bedroom_target_temperature)
            .with(HOT_WATER_TARGET_TEMPERATURE, self.hot_water_target_temperature)
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { name });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
