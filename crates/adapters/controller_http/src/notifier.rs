//! Webhook implementation of the [`Notifier`] port.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use smarthouse_app::ports::Notifier;
use smarthouse_domain::alert::Notification;
use smarthouse_domain::error::SmartHouseError;

use crate::config::WebhookConfig;
use crate::error::ControllerError;

/// Delivers each notification as a JSON `POST` to a webhook, typically a mail relay.
///
/// The body is the serialized [`Notification`]: `{"subject", "body", "recipient"}`.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Build a notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Http`] if the underlying client cannot be built.
    pub fn new(config: &WebhookConfig) -> Result<Self, ControllerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ControllerError> {
        let response = self.client.post(&self.url).json(notification).send().await?;
        if !response.status().is_success() {
            return Err(ControllerError::Status(response.status()));
        }
        Ok(())
    }
}

impl Notifier for WebhookNotifier {
    fn send(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), SmartHouseError>> + Send {
        async move {
            match self.deliver(&notification).await {
                Ok(()) => {
                    tracing::info!(
                        recipient = %notification.recipient,
                        subject = %notification.subject,
                        "notification delivered"
                    );
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!(%err, url = %self.url, "notification delivery failed");
                    Err(err.into())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/notify")
    }

    fn leak_notification() -> Notification {
        Notification {
            subject: "Leak detector".to_string(),
            body: "Leak time detection 2024-01-01 00:00:00 UTC.".to_string(),
            recipient: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn should_post_notification_as_json() {
        let received: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = Arc::clone(&received);
        let router = Router::new().route(
            "/notify",
            post(move |Json(body): Json<Value>| {
                let sink = Arc::clone(&sink);
                async move {
                    sink.lock().unwrap().push(body);
                    StatusCode::ACCEPTED
                }
            }),
        );
        let notifier = WebhookNotifier::new(&WebhookConfig {
            url: spawn(router).await,
            timeout_secs: 5,
        })
        .unwrap();

        notifier.send(leak_notification()).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["subject"], "Leak detector");
        assert_eq!(received[0]["recipient"], "owner@example.com");
    }

    #[tokio::test]
    async fn should_fail_when_webhook_rejects() {
        let router = Router::new().route(
            "/notify",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let notifier = WebhookNotifier::new(&WebhookConfig {
            url: spawn(router).await,
            timeout_secs: 5,
        })
        .unwrap();

        assert!(notifier.send(leak_notification()).await.is_err());
    }
}
