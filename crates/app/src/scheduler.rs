//! Scheduler — runs a rule cycle at a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::{Controller, Notifier, SettingsRepository};
use crate::services::house_manager::HouseManager;

/// Background loop invoking [`HouseManager::run_cycle`] periodically.
pub struct Scheduler<C, S, N> {
    manager: Arc<HouseManager<C, S, N>>,
    interval: Duration,
}

impl<C, S, N> Scheduler<C, S, N>
where
    C: Controller + Send + Sync + 'static,
    S: SettingsRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Spawn the loop. The first cycle runs immediately.
    ///
    /// Abort the returned handle to stop it.
    pub fn start(manager: Arc<HouseManager<C, S, N>>, interval: Duration) -> JoinHandle<()> {
        let scheduler = Self { manager, interval };
        tokio::spawn(scheduler.run())
    }

    /// Run a cycle, wait for the interval, repeat.
    async fn run(self) {
        loop {
            match self.manager.run_cycle().await {
                Ok(report) => tracing::debug!(
                    applied = report.applied.len(),
                    notifications = report.notifications,
                    "scheduled cycle completed"
                ),
                Err(err) => tracing::warn!(%err, "scheduled cycle failed, retrying next interval"),
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthouse_domain::alert::Notification;
    use smarthouse_domain::engine::RuleEngine;
    use smarthouse_domain::error::SmartHouseError;
    use smarthouse_domain::settings::ThresholdSettings;
    use smarthouse_domain::state::StateSnapshot;
    use smarthouse_domain::write_set::DeviceWrite;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reads and always reports an outage.
    #[derive(Default)]
    struct OfflineController {
        fetches: AtomicUsize,
    }

    impl Controller for OfflineController {
        fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            async { Err(SmartHouseError::ControllerUnreachable("offline".into())) }
        }

        fn send(
            &self,
            _batch: Vec<DeviceWrite>,
        ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
            async { Err(SmartHouseError::ControllerUnreachable("offline".into())) }
        }
    }

    struct NoSettings;

    impl SettingsRepository for NoSettings {
        fn get(
            &self,
            _name: &str,
        ) -> impl Future<Output = Result<Option<f64>, SmartHouseError>> + Send {
            async { Ok(None) }
        }

        fn get_all(
            &self,
        ) -> impl Future<Output = Result<ThresholdSettings, SmartHouseError>> + Send {
            async { Ok(ThresholdSettings::new()) }
        }

        fn set(
            &self,
            _name: &str,
            _value: f64,
        ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
            async { Ok(()) }
        }

        fn set_many(
            &self,
            _settings: ThresholdSettings,
        ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
            async { Ok(()) }
        }
    }

    struct NullNotifier;

    impl Notifier for NullNotifier {
        fn send(
            &self,
            _notification: Notification,
        ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
            async { Ok(()) }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_running_cycles_after_failures() {
        let manager = Arc::new(HouseManager::new(
            OfflineController::default(),
            NoSettings,
            NullNotifier,
            RuleEngine::new("owner@example.com"),
        ));

        let handle = Scheduler::start(Arc::clone(&manager), Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(25)).await;
        handle.abort();

        let fetches = manager.controller().fetches.load(Ordering::SeqCst);
        assert_eq!(fetches, 3);
    }
}
