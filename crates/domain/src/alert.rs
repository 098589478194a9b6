//! Alert memory and the notifications the engine asks to be delivered.

use serde::{Deserialize, Serialize};

/// Edge-detection memory for alerting conditions.
///
/// Owned by the caller and threaded through each evaluation: the engine
/// receives the current value and returns the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMemory {
    /// A leak has been alerted and the detector has not cleared since.
    pub leak_alerted: bool,
}

impl AlertMemory {
    /// Record the latest leak detector reading.
    ///
    /// Returns `true` on a false→true transition, i.e. when a notification is due.
    pub fn observe_leak(&mut self, detected: bool) -> bool {
        let rising = detected && !self.leak_alerted;
        self.leak_alerted = detected;
        rising
    }

    /// Forget every alerted condition.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A message generated by the engine. Delivery is the notifier's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}
