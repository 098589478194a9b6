//! Rule engine — maps a state snapshot and thresholds to the device writes
//! the house needs.
//!
//! Rules are pure functions evaluated in a fixed order. Each returns a
//! [`WriteSet`] patch that is merged over the previous ones, so a later rule
//! overrides what an earlier rule staged for the same device. Safety rules
//! come last:
//!
//! 1. leak: shut off water, boiler and washing machine
//! 2. boiler thermostat (hysteresis around the hot water target), idle during a leak
//! 3. curtains from outdoor light, unless set to slightly open by hand
//! 4. bedroom air conditioning (hysteresis around the bedroom target)
//! 5. smoke: washing machine, air conditioner, lights and boiler off
//! 6. no cold water: boiler and washing machine off
//!
//! Writes that match the current state are dropped before returning.

use serde::Serialize;

use crate::alert::{AlertMemory, Notification};
use crate::device::{
    AIR_CONDITIONER, BATHROOM_LIGHT, BEDROOM_LIGHT, BEDROOM_TEMPERATURE, BOILER,
    BOILER_TEMPERATURE, COLD_WATER, CURTAINS, HOT_WATER, LEAK_DETECTOR, OUTDOOR_LIGHT,
    REQUIRED_KEYS, SMOKE_DETECTOR, WASHING_MACHINE, curtains, washing_machine,
};
use crate::error::EvaluationError;
use crate::settings::{BEDROOM_TARGET_TEMPERATURE, HOT_WATER_TARGET_TEMPERATURE, ThresholdSettings};
use crate::state::StateSnapshot;
use crate::write_set::WriteSet;

const LOWER_BAND: f64 = 0.9;
const UPPER_BAND: f64 = 1.1;
const OUTDOOR_LIGHT_LIMIT: f64 = 50.0;

/// A rule reads the snapshot and thresholds and stages writes.
type Rule = fn(&StateSnapshot, &ThresholdSettings) -> Result<WriteSet, EvaluationError>;

/// Evaluation order. Later entries override earlier ones.
const RULES: [Rule; 6] = [
    leak,
    boiler_thermostat,
    curtains_illumination,
    bedroom_air_conditioning,
    smoke,
    cold_water_supply,
];

/// Result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Genuine changes to send to the controller.
    pub writes: WriteSet,
    /// Notifications to deliver.
    pub notifications: Vec<Notification>,
    /// Alert memory to commit for the next pass.
    pub memory: AlertMemory,
}

/// Stateless evaluator of the house rules.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    alert_recipient: String,
}

impl RuleEngine {
    /// Create an engine whose notifications are addressed to `alert_recipient`.
    #[must_use]
    pub fn new(alert_recipient: impl Into<String>) -> Self {
        Self {
            alert_recipient: alert_recipient.into(),
        }
    }

    #[must_use]
    pub fn alert_recipient(&self) -> &str {
        &self.alert_recipient
    }

    /// Run every rule against `state` and `thresholds`.
    ///
    /// Nothing is returned unless every rule could read what it needs.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingStateKey`] when a recognized device
    /// is absent from `state`, [`EvaluationError::UnexpectedStateValue`] when
    /// a reading has the wrong kind, and [`EvaluationError::MissingThreshold`]
    /// when a rule needs a threshold that is not configured.
    pub fn evaluate(
        &self,
        state: &StateSnapshot,
        thresholds: &ThresholdSettings,
        mut memory: AlertMemory,
    ) -> Result<Evaluation, EvaluationError> {
        state.require_all(&REQUIRED_KEYS)?;

        let mut staged = WriteSet::new();
        for rule in RULES {
            staged.merge(rule(state, thresholds)?);
        }

        let mut notifications = Vec::new();
        if memory.observe_leak(state.bool(LEAK_DETECTOR)?) {
            notifications.push(self.leak_notification(state));
        }

        Ok(Evaluation {
            writes: staged.changes_from(state),
            notifications,
            memory,
        })
    }

    fn leak_notification(&self, state: &StateSnapshot) -> Notification {
        Notification {
            subject: "Leak detector".to_string(),
            body: format!("Leak time detection {}.", state.fetched_at()),
            recipient: self.alert_recipient.clone(),
        }
    }
}

fn leak(state: &StateSnapshot, _: &ThresholdSettings) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    if state.bool(LEAK_DETECTOR)? {
        writes.stage(COLD_WATER, false);
        writes.stage(HOT_WATER, false);
        writes.stage(BOILER, false);
        writes.stage(WASHING_MACHINE, washing_machine::OFF);
    }
    Ok(writes)
}

fn boiler_thermostat(
    state: &StateSnapshot,
    thresholds: &ThresholdSettings,
) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    // a leak keeps the boiler off, heating must not undo that
    if state.bool(LEAK_DETECTOR)? {
        return Ok(writes);
    }
    // an offline sensor reports null, leave the boiler alone
    let Some(temperature) = state.optional_number(BOILER_TEMPERATURE)? else {
        return Ok(writes);
    };
    let target = thresholds.get(HOT_WATER_TARGET_TEMPERATURE)?;
    if temperature < target * LOWER_BAND {
        writes.stage(BOILER, true);
    } else if temperature >= target * UPPER_BAND {
        writes.stage(BOILER, false);
    }
    Ok(writes)
}

fn curtains_illumination(
    state: &StateSnapshot,
    _: &ThresholdSettings,
) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    if state.text(CURTAINS)? == curtains::SLIGHTLY_OPEN {
        return Ok(writes);
    }
    let outdoor_light = state.number(OUTDOOR_LIGHT)?;
    let bedroom_light = state.bool(BEDROOM_LIGHT)?;
    if outdoor_light < OUTDOOR_LIGHT_LIMIT && !bedroom_light {
        writes.stage(CURTAINS, curtains::OPEN);
    } else if outdoor_light > OUTDOOR_LIGHT_LIMIT || bedroom_light {
        writes.stage(CURTAINS, curtains::CLOSE);
    }
    Ok(writes)
}

fn bedroom_air_conditioning(
    state: &StateSnapshot,
    thresholds: &ThresholdSettings,
) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    let temperature = state.number(BEDROOM_TEMPERATURE)?;
    let target = thresholds.get(BEDROOM_TARGET_TEMPERATURE)?;
    if temperature > target * UPPER_BAND {
        writes.stage(AIR_CONDITIONER, true);
    } else if temperature < target * LOWER_BAND {
        writes.stage(AIR_CONDITIONER, false);
    }
    Ok(writes)
}

fn smoke(state: &StateSnapshot, _: &ThresholdSettings) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    if state.bool(SMOKE_DETECTOR)? {
        writes.stage(WASHING_MACHINE, washing_machine::OFF);
        for device in [AIR_CONDITIONER, BEDROOM_LIGHT, BATHROOM_LIGHT, BOILER] {
            writes.stage(device, false);
        }
    }
    Ok(writes)
}

fn cold_water_supply(
    state: &StateSnapshot,
    _: &ThresholdSettings,
) -> Result<WriteSet, EvaluationError> {
    let mut writes = WriteSet::new();
    if !state.bool(COLD_WATER)? {
        writes.stage(BOILER, false);
        writes.stage(WASHING_MACHINE, washing_machine::OFF);
    }
    Ok(writes)
}
