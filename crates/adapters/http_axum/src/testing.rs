//! Stub ports shared by the handler tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;

use axum::body::{Body, to_bytes};
use axum::response::Response;
use serde_json::Value;

use smarthouse_app::ports::{Controller, Notifier, SettingsRepository};
use smarthouse_app::services::house_manager::HouseManager;
use smarthouse_domain::alert::Notification;
use smarthouse_domain::device::{
    AIR_CONDITIONER, BATHROOM_LIGHT, BEDROOM_LIGHT, BEDROOM_TEMPERATURE, BOILER,
    BOILER_TEMPERATURE, COLD_WATER, CURTAINS, DeviceValue, HOT_WATER, LEAK_DETECTOR,
    OUTDOOR_LIGHT, SMOKE_DETECTOR, WASHING_MACHINE,
};
use smarthouse_domain::engine::RuleEngine;
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::settings::{
    BEDROOM_TARGET_TEMPERATURE, HOT_WATER_TARGET_TEMPERATURE, ThresholdSettings,
};
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::write_set::DeviceWrite;

use crate::state::AppState;

pub struct StubController {
    pub devices: Mutex<BTreeMap<String, DeviceValue>>,
    pub sent: Mutex<Vec<Vec<DeviceWrite>>>,
    pub unreachable: bool,
}

impl Default for StubController {
    fn default() -> Self {
        let devices = [
            (LEAK_DETECTOR, DeviceValue::Bool(false)),
            (SMOKE_DETECTOR, DeviceValue::Bool(false)),
            (COLD_WATER, DeviceValue::Bool(true)),
            (HOT_WATER, DeviceValue::Bool(true)),
            (BOILER, DeviceValue::Bool(false)),
            (BOILER_TEMPERATURE, DeviceValue::Number(80.0)),
            (WASHING_MACHINE, DeviceValue::text("off")),
            (CURTAINS, DeviceValue::text("open")),
            (OUTDOOR_LIGHT, DeviceValue::Number(20.0)),
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
            sent: Mutex::default(),
            unreachable: false,
        }
    }
}

impl Controller for StubController {
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
        let result = if self.unreachable {
            Err(SmartHouseError::ControllerUnreachable("connection refused".into()))
        } else {
            Ok(StateSnapshot::new(
                self.devices.lock().unwrap().clone(),
                chrono::Utc::now(),
            ))
        };
        async { result }
    }

    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        self.sent.lock().unwrap().push(batch);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct MemorySettings {
    pub values: Mutex<ThresholdSettings>,
}

impl SettingsRepository for MemorySettings {
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<f64>, SmartHouseError>> + Send {
        let value = self.values.lock().unwrap().get(name).ok();
        async move { Ok(value) }
    }

    fn get_all(&self) -> impl Future<Output = Result<ThresholdSettings, SmartHouseError>> + Send {
        let values = self.values.lock().unwrap().clone();
        async { Ok(values) }
    }

    fn set(
        &self,
        name: &str,
        value: f64,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        self.values.lock().unwrap().insert(name, value);
        async { Ok(()) }
    }

    fn set_many(
        &self,
        settings: ThresholdSettings,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        let mut values = self.values.lock().unwrap();
        for (name, value) in settings.iter() {
            values.insert(name, value);
        }
        drop(values);
        async { Ok(()) }
    }
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(
        &self,
        _notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        async { Ok(()) }
    }
}

pub type TestState = AppState<StubController, MemorySettings, NullNotifier>;

pub fn state_with(controller: StubController) -> TestState {
    let settings = MemorySettings {
        values: Mutex::new(
            ThresholdSettings::new()
                .with(BEDROOM_TARGET_TEMPERATURE, 21.0)
                .with(HOT_WATER_TARGET_TEMPERATURE, 80.0),
        ),
    };
    AppState::new(HouseManager::new(
        controller,
        settings,
        NullNotifier,
        RuleEngine::new("owner@example.com"),
    ))
}

pub fn test_state() -> TestState {
    state_with(StubController::default())
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
