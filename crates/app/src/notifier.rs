//! Notifier that writes notifications to the log.

use std::future::Future;

use smarthouse_domain::alert::Notification;
use smarthouse_domain::error::SmartHouseError;

use crate::ports::Notifier;

/// Records every notification as a `WARN` log line instead of delivering it.
///
/// Used when no delivery channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        tracing::warn!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            body = %notification.body,
            "notification"
        );
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_always_succeed() {
        let notification = Notification {
            subject: "Leak detector".to_string(),
            body: "Leak time detection now.".to_string(),
            recipient: "owner@example.com".to_string(),
        };
        assert!(LogNotifier.send(notification).await.is_ok());
    }
}
