//! Runtime selection of the controller and notifier implementations.
//!
//! The manager is generic over its ports; these enums let the binary pick an
//! adapter from configuration without boxing.

use std::future::Future;

use smarthouse_adapter_controller_http::{ControllerError, HttpController, WebhookNotifier};
use smarthouse_adapter_virtual::VirtualHouse;
use smarthouse_app::notifier::LogNotifier;
use smarthouse_app::ports::{Controller, Notifier};
use smarthouse_domain::alert::Notification;
use smarthouse_domain::error::SmartHouseError;
use smarthouse_domain::state::StateSnapshot;
use smarthouse_domain::write_set::DeviceWrite;

use crate::config::Config;

/// The controller the house manager drives.
pub enum HouseController {
    Api(HttpController),
    Virtual(VirtualHouse),
}

impl HouseController {
    /// Pick the virtual house or the API client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ControllerError> {
        if config.controller.virtual_enabled {
            tracing::info!("using the virtual house controller");
            return Ok(Self::Virtual(VirtualHouse::default()));
        }
        tracing::info!(url = %config.controller.url, "using the controller API");
        Ok(Self::Api(HttpController::new(&config.controller_api())?))
    }
}

impl Controller for HouseController {
    fn fetch(&self) -> impl Future<Output = Result<StateSnapshot, SmartHouseError>> + Send {
        async move {
            match self {
                Self::Api(api) => api.fetch().await,
                Self::Virtual(house) => house.fetch().await,
            }
        }
    }

    fn send(
        &self,
        batch: Vec<DeviceWrite>,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        async move {
            match self {
                Self::Api(api) => api.send(batch).await,
                Self::Virtual(house) => house.send(batch).await,
            }
        }
    }
}

/// Where alerts go.
pub enum HouseNotifier {
    Webhook(WebhookNotifier),
    Log(LogNotifier),
}

impl HouseNotifier {
    /// Use the webhook when one is configured, the log otherwise.
    pub fn from_config(config: &Config) -> Result<Self, ControllerError> {
        match config.webhook() {
            Some(webhook) => {
                tracing::info!(url = %webhook.url, "delivering notifications to webhook");
                Ok(Self::Webhook(WebhookNotifier::new(&webhook)?))
            }
            None => {
                tracing::info!("no notification webhook configured, alerts are logged only");
                Ok(Self::Log(LogNotifier))
            }
        }
    }
}

impl Notifier for HouseNotifier {
    fn send(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        async move {
            match self {
                Self::Webhook(webhook) => webhook.send(notification).await,
                Self::Log(log) => log.send(notification).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_virtual_house_by_default() {
        let controller = HouseController::from_config(&Config::default()).unwrap();
        assert!(matches!(controller, HouseController::Virtual(_)));
    }

    #[test]
    fn should_use_api_when_virtual_house_disabled() {
        let mut config = Config::default();
        config.controller.virtual_enabled = false;
        config.controller.url = "http://controller.local/api".to_string();
        let controller = HouseController::from_config(&config).unwrap();
        assert!(matches!(controller, HouseController::Api(_)));
    }

    #[test]
    fn should_log_notifications_without_webhook() {
        let notifier = HouseNotifier::from_config(&Config::default()).unwrap();
        assert!(matches!(notifier, HouseNotifier::Log(_)));
    }

    #[test]
    fn should_use_configured_webhook() {
        let mut config = Config::default();
        config.notifications.webhook_url = Some("http://mail.local/send".to_string());
        let notifier = HouseNotifier::from_config(&config).unwrap();
        assert!(matches!(notifier, HouseNotifier::Webhook(_)));
    }

    #[tokio::test]
    async fn should_forward_to_virtual_house() {
        let controller = HouseController::from_config(&Config::default()).unwrap();
        let snapshot = controller.fetch().await.unwrap();
        assert!(snapshot.contains("leak_detector"));
    }
}
