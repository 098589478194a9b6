//! Notifier port — delivers notifications produced by the rule engine.

use std::future::Future;

use smarthouse_domain::alert::Notification;
use smarthouse_domain::error::SmartHouseError;

/// Delivers a [`Notification`] to its recipient.
pub trait Notifier {
    /// Deliver one notification.
    fn send(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn send(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        (**self).send(notification)
    }
}
