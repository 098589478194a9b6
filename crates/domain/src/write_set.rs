//! Write set — device writes staged during one evaluation pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::DeviceValue;
use crate::state::StateSnapshot;

/// A single device write as sent to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceWrite {
    pub name: String,
    pub value: DeviceValue,
}

/// Device-name → desired value. Staging the same device twice keeps the later value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteSet(BTreeMap<String, DeviceValue>);

impl WriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `value` for `device`, replacing anything staged before.
    pub fn stage(&mut self, device: impl Into<String>, value: impl Into<DeviceValue>) {
        self.0.insert(device.into(), value.into());
    }

    /// Builder-style [`stage`](Self::stage).
    #[must_use]
    pub fn with(mut self, device: impl Into<String>, value: impl Into<DeviceValue>) -> Self {
        self.stage(device, value);
        self
    }

    /// Apply `patch` on top of `self`; entries of `patch` win.
    pub fn merge(&mut self, patch: WriteSet) {
        self.0.extend(patch.0);
    }

    /// Drop every write whose device already holds the staged value.
    ///
    /// Writes to devices the snapshot does not report are kept.
    #[must_use]
    pub fn changes_from(mut self, state: &StateSnapshot) -> Self {
        self.0
            .retain(|device, value| state.values().get(device).is_none_or(|current| current != value));
        self
    }

    #[must_use]
    pub fn get(&self, device: &str) -> Option<&DeviceValue> {
        self.0.get(device)
    }

    #[must_use]
    pub fn contains(&self, device: &str) -> bool {
        self.0.contains_key(device)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flatten into the batch format sent to the controller, ordered by device name.
    #[must_use]
    pub fn into_batch(self) -> Vec<DeviceWrite> {
        self.0
            .into_iter()
            .map(|(name, value)| DeviceWrite { name, value })
            .collect()
    }
}

impl FromIterator<DeviceWrite> for WriteSet {
    fn from_iter<T: IntoIterator<Item = DeviceWrite>>(iter: T) -> Self {
        Self(iter.into_iter().map(|w| (w.name, w.value)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_keep_last_staged_value() {
        let mut writes = WriteSet::new();
        writes.stage("boiler", true);
        writes.stage("boiler", false);
        assert_eq!(writes.get("boiler"), Some(&DeviceValue::Bool(false)));
        assert_eq!(writes.len(), 1);
    }

    #[test]
    fn should_let_patch_override_on_merge() {
        let mut writes = WriteSet::new().with("boiler", true).with("curtains", "open");
        writes.merge(WriteSet::new().with("boiler", false));
        assert_eq!(writes.get("boiler"), Some(&DeviceValue::Bool(false)));
        assert_eq!(writes.get("curtains"), Some(&DeviceValue::text("open")));
    }

    #[test]
    fn should_drop_writes_matching_current_state() {
        let state = StateSnapshot::from_pairs(
            [
                ("boiler", DeviceValue::Bool(true)),
                ("curtains", DeviceValue::text("close")),
            ],
            now(),
        );
        let writes = WriteSet::new()
            .with("boiler", true)
            .with("curtains", "open")
            .changes_from(&state);
        assert!(!writes.contains("boiler"));
        assert!(writes.contains("curtains"));
    }

    #[test]
    fn should_keep_writes_for_unreported_devices() {
        let state = StateSnapshot::from_pairs([("boiler", DeviceValue::Bool(true))], now());
        let writes = WriteSet::new()
            .with("air_conditioner", true)
            .changes_from(&state);
        assert!(writes.contains("air_conditioner"));
    }

    #[test]
    fn should_flatten_into_sorted_batch() {
        let batch = WriteSet::new()
            .with("washing_machine", "off")
            .with("boiler", false)
            .into_batch();
        let names: Vec<&str> = batch.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["boiler", "washing_machine"]);
    }
}
