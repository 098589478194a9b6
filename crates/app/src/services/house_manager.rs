//! House manager — runs rule cycles and applies user controls.
//!
//! Both the periodic cycle and the interactive path read the controller,
//! decide, and send while holding the same lock. Two passes can therefore
//! never compute writes from the same stale snapshot, and the alert memory
//! is updated atomically with the pass that observed it.

use serde::Serialize;
use tokio::sync::Mutex;

use smarthouse_domain::alert::{AlertMemory, Notification};
use smarthouse_domain::control::ControlRequest;
use smarthouse_domain::engine::RuleEngine;
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::settings::ThresholdSettings;
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::write_set::DeviceWrite;

use crate::ports::{Controller, Notifier, SettingsRepository};
use crate::services::dispatcher::Dispatcher;

/// Outcome of one rule cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Writes sent to the controller.
    pub applied: Vec<DeviceWrite>,
    /// Notifications successfully delivered.
    pub notifications: usize,
}

/// Outcome of a user control submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ControlOutcome {
    /// Requested light states differed from the controller and were sent as is.
    LightsToggled { applied: Vec<DeviceWrite> },
    /// Lights already matched; the rules ran with the submitted thresholds.
    RulesEvaluated(CycleReport),
}

/// Current device state and thresholds, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseOverview {
    pub devices: StateSnapshot,
    pub settings: ThresholdSettings,
}

/// Orchestrates controller reads, rule evaluation, notification and dispatch.
pub struct HouseManager<C, S, N> {
    dispatcher: Dispatcher<C>,
    settings: S,
    notifier: N,
    engine: RuleEngine,
    memory: Mutex<AlertMemory>,
}

impl<C, S, N> HouseManager<C, S, N>
where
    C: Controller,
    S: SettingsRepository,
    N: Notifier,
{
    /// Create a manager with empty alert memory.
    pub fn new(controller: C, settings: S, notifier: N, engine: RuleEngine) -> Self {
        Self {
            dispatcher: Dispatcher::new(controller),
            settings,
            notifier,
            engine,
            memory: Mutex::new(AlertMemory::default()),
        }
    }

    /// Borrow the controller.
    pub fn controller(&self) -> &C {
        self.dispatcher.controller()
    }

    /// Fetch, evaluate with the stored thresholds, notify and dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::ControllerUnreachable`] when the controller
    /// cannot be read or written, [`SmartHouseError::Evaluation`] when the
    /// snapshot or thresholds are incomplete, and storage errors from the
    /// settings repository. Notification failures are logged only.
    pub async fn run_cycle(&self) -> Result<CycleReport, SmartHouseError> {
        let mut memory = self.memory.lock().await;
        let state = self.dispatcher.controller().fetch().await?;
        let thresholds = self.settings.get_all().await?;
        self.evaluate_and_dispatch(&mut memory, &state, &thresholds)
            .await
    }

    /// Apply a user control submission.
    ///
    /// When a requested light differs from the controller, only the light
    /// toggles are sent and the thresholds are stored afterwards. Otherwise
    /// the rules run against the submitted thresholds, which are stored
    /// once the resulting writes were dispatched. A failed dispatch stores
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHouseError::InvalidUserInput`] without touching
    /// anything when the request is invalid, plus every error of
    /// [`run_cycle`](Self::run_cycle).
    pub async fn apply_controls(
        &self,
        request: ControlRequest,
    ) -> Result<ControlOutcome, SmartHouseError> {
        request.validate()?;

        let mut memory = self.memory.lock().await;
        let state = self.dispatcher.controller().fetch().await?;
        let submitted = request.thresholds();

        let toggles = request.light_toggles(&state);
        if !toggles.is_empty() {
            let applied = self.dispatcher.dispatch(toggles).await?;
            self.settings.set_many(submitted).await?;
            tracing::info!(count = applied.len(), "applied light toggles");
            return Ok(ControlOutcome::LightsToggled { applied });
        }

        let mut thresholds = self.settings.get_all().await?;
        for (name, value) in submitted.iter() {
            thresholds.insert(name, value);
        }
        let report = self
            .evaluate_and_dispatch(&mut memory, &state, &thresholds)
            .await?;
        self.settings.set_many(submitted).await?;
        Ok(ControlOutcome::RulesEvaluated(report))
    }

    /// Current device state and stored thresholds.
    ///
    /// # Errors
    ///
    /// Returns controller or storage errors.
    pub async fn overview(&self) -> Result<HouseOverview, SmartHouseError> {
        let devices = self.dispatcher.controller().fetch().await?;
        let settings = self.settings.get_all().await?;
        Ok(HouseOverview { devices, settings })
    }

    /// Current alert memory.
    pub async fn alert_memory(&self) -> AlertMemory {
        *self.memory.lock().await
    }

    /// Forget every alerted condition so the next detection notifies again.
    pub async fn reset_alerts(&self) {
        self.memory.lock().await.reset();
        tracing::info!("alert memory reset");
    }

    async fn evaluate_and_dispatch(
        &self,
        memory: &mut AlertMemory,
        state: &StateSnapshot,
        thresholds: &ThresholdSettings,
    ) -> Result<CycleReport, SmartHouseError> {
        let evaluation = self.engine.evaluate(state, thresholds, *memory)?;
        *memory = evaluation.memory;

        let notifications = self.deliver(evaluation.notifications).await;
        let applied = self.dispatcher.dispatch(evaluation.writes).await?;
        tracing::debug!(
            applied = applied.len(),
            notifications,
            "rule cycle completed"
        );
        Ok(CycleReport {
            applied,
            notifications,
        })
    }

    async fn deliver(&self, notifications: Vec<Notification>) -> usize {
        let mut delivered = 0;
        for notification in notifications {
            let subject = notification.subject.clone();
            match self.notifier.send(notification).await {
                Ok(()) => delivered += 1,
                Err(err) => tracing::warn!(%err, %subject, "failed to deliver notification"),
            }
        }
        delivered
    }
}
