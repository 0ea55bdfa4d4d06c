use crate::core::{MessagePayload, Notifier};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts the message as JSON to a Slack-compatible incoming webhook.
///
/// A single attempt; the runner decides what a failure means.
#[derive(Clone)]
pub struct WebhookNotifier {
    webhook_url: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            webhook_url: webhook_url.into(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, payload: &MessagePayload) -> Result<()> {
        tracing::debug!(
            "Posting {} bytes of message text to webhook",
            payload.text.len()
        );
        self.client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::NotifierError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_posts_text_payload_as_json() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"text": "<L|T>\n\n"}));
            then.status(200).body("ok");
        });

        let notifier = WebhookNotifier::new(server.url("/hook"), Duration::from_secs(5)).unwrap();
        let payload = MessagePayload {
            text: "<L|T>\n\n".to_string(),
        };
        notifier.send(&payload).await.unwrap();

        hook.assert();
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(404).body("no_service");
        });

        let notifier = WebhookNotifier::new(server.url("/hook"), Duration::from_secs(5)).unwrap();
        let result = notifier
            .send(&MessagePayload {
                text: "x".to_string(),
            })
            .await;

        assert!(matches!(result, Err(NotifierError::HttpError(_))));
        hook.assert_hits(1);
    }
}
