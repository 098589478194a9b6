//! In-memory house behind the [`Controller`] port.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use smarthouse_app::ports::Controller;
use smarthouse_domain::device::{
    AIR_CONDITIONER, BATHROOM_LIGHT, BEDROOM_LIGHT, BEDROOM_TEMPERATURE, BOILER,
    BOILER_TEMPERATURE, COLD_WATER, CURTAINS, DeviceValue, HOT_WATER, LEAK_DETECTOR,
    OUTDOOR_LIGHT, SMOKE_DETECTOR, WASHING_MACHINE, curtains, washing_machine,
};
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::time::now;
use smarthouse_domain::write_set::DeviceWrite;

/// Simulated house.
pub struct VirtualHouse {
    devices: Mutex<BTreeMap<String, DeviceValue>>,
    sends: AtomicUsize,
}

impl Default for VirtualHouse {
    fn default() -> Self {
        let devices = [
            (LEAK_DETECTOR, DeviceValue::Bool(false)),
            (SMOKE_DETECTOR, DeviceValue::Bool(false)),
            (COLD_WATER, DeviceValue::Bool(true)),
            (HOT_WATER, DeviceValue::Bool(true)),
            (BOILER, DeviceValue::Bool(true)),
            (BOILER_TEMPERATURE, DeviceValue::Number(78.0)),
            (WASHING_MACHINE, DeviceValue::text(washing_machine::OFF)),
            (CURTAINS, DeviceValue::text(curtains::OPEN)),
            (OUTDOOR_LIGHT, DeviceValue::Number(30.0)),
            (BEDROOM_LIGHT, DeviceValue::Bool(false)),
            (BATHROOM_LIGHT, DeviceValue::Bool(false)),
            (BEDROOM_TEMPERATURE, DeviceValue::Number(21.0)),
            (AIR_CONDITIONER, DeviceValue::Bool(false)),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Self {
            devices: Mutex::new(devices),
            sends: AtomicUsize::new(0),
        }
    }
}

impl VirtualHouse {
    /// Overwrite a device value, e.g. to simulate a sensor reading.
    pub fn set(&self, name: &str, value: impl Into<DeviceValue>) {
        self.lock().insert(name.to_string(), value.into());
    }

    /// Remove a device, simulating a controller that stops reporting it.
    pub fn remove(&self, name: &str) {
        self.lock().remove(name);
    }

    /// Current value of a device.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<DeviceValue> {
        self.lock().get(name).cloned()
    }

    /// Number of batches received through [`Controller::send`].
    #[must_use]
    pub fn send_count(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, DeviceValue>> {
        // the map stays consistent even if a holder panicked
        self.devices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Controller for VirtualHouse {
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
        let snapshot = StateSnapshot::new(self.lock().clone(), now());
        async { Ok(snapshot) }
    }

    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        self.sends.fetch_add(1, Ordering::SeqCst);
        let mut devices = self.lock();
        for write in batch {
            tracing::info!(device = %write.name, value = %write.value, "virtual device updated");
            devices.insert(write.name, write.value);
        }
        drop(devices);
        async { Ok(()) }
    }
}
