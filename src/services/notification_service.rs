use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::services::collaborators::{Notifier, NotifyKind};

/// Routes each notification to the matching log level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Success | NotifyKind::Info => tracing::info!(kind = ?kind, "{}", message),
            NotifyKind::Warning => tracing::warn!("{}", message),
            NotifyKind::Error => tracing::error!("{}", message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload<'a> {
    pub kind: NotifyKind,
    pub message: &'a str,
    pub sent_at: DateTime<Utc>,
}

/// Posts notifications to an external webhook; delivery is best effort.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    target_url: Url,
    secret: Option<String>,
}

impl WebhookNotifier {
    pub fn new(target_url: Url, secret: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            target_url,
            secret,
        })
    }

    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        config
            .notification_webhook_url
            .clone()
            .map(|url| Self::new(url, config.webhook_secret.clone()))
            .transpose()
    }

    pub async fn deliver(&self, kind: NotifyKind, message: &str) -> Result<u16> {
        let payload = NotificationPayload {
            kind,
            message,
            sent_at: Utc::now(),
        };
        let mut request = self.client.post(self.target_url.clone()).json(&payload);
        if let Some(secret) = &self.secret {
            request = request.header("X-Webhook-Secret", secret);
        }
        let resp = request.send().await?;
        Ok(resp.status().as_u16())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, kind: NotifyKind, message: &str) {
        match self.deliver(kind, message).await {
            Ok(status) if (200..300).contains(&status) => {}
            Ok(status) => {
                tracing::warn!(status, url = %self.target_url, "Notification webhook rejected delivery")
            }
            Err(e) => {
                tracing::warn!(error = ?e, url = %self.target_url, "Notification webhook delivery failed")
            }
        }
    }
}
