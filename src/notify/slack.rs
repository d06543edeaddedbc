use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use crate::config::{DEFAULT_SLACK_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::errors::ReporterError;
use super::channel::NotificationChannel;
use tracing::debug;

pub enum SlackChannel {
    /// `chat.postMessage` with a bot token.
    Bot {
        client: Client,
        token: String,
        channel: String,
        api_url: String,
    },
    /// Incoming webhook bound to a single channel.
    Webhook {
        client: Client,
        url: String,
    },
}

fn build_client(timeout_secs: Option<u64>) -> Result<Client, ReporterError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
        .build()
        .map_err(|e| ReporterError::Config(format!("Failed to build Slack HTTP client: {}", e)))
}

impl SlackChannel {
    pub fn bot(
        token: &str,
        channel: &str,
        api_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ReporterError> {
        Ok(Self::Bot {
            client: build_client(timeout_secs)?,
            token: token.to_string(),
            channel: channel.to_string(),
            api_url: api_url.unwrap_or(DEFAULT_SLACK_API_URL).trim_end_matches('/').to_string(),
        })
    }

    pub fn webhook(url: &str, timeout_secs: Option<u64>) -> Result<Self, ReporterError> {
        Ok(Self::Webhook {
            client: build_client(timeout_secs)?,
            url: url.to_string(),
        })
    }
}

/// Interpret a `chat.postMessage` response: Slack answers HTTP 200 with
/// `"ok": false` for most failures.
pub fn check_post_message_response(data: &Value) -> Result<(), ReporterError> {
    if data["ok"].as_bool() == Some(true) {
        return Ok(());
    }
    let reason = data["error"].as_str().unwrap_or("unknown_error");
    Err(ReporterError::Delivery(format!("Slack rejected message: {}", reason)))
}

#[async_trait]
impl NotificationChannel for SlackChannel {
    async fn send(&self, text: &str) -> Result<(), ReporterError> {
        match self {
            SlackChannel::Bot { client, token, channel, api_url } => {
                let resp = client
                    .post(format!("{}/chat.postMessage", api_url))
                    .bearer_auth(token)
                    .json(&json!({ "channel": channel, "text": text }))
                    .send()
                    .await
                    .map_err(|e| ReporterError::Delivery(format!("Slack API request failed: {}", e)))?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ReporterError::Delivery(format!("Slack API returned HTTP {}", status)));
                }

                let data: Value = resp.json().await
                    .map_err(|e| ReporterError::Delivery(format!("Failed to parse Slack response: {}", e)))?;
                check_post_message_response(&data)?;
                debug!(channel = %channel, "Slack message posted");
                Ok(())
            }
            SlackChannel::Webhook { client, url } => {
                let resp = client
                    .post(url.as_str())
                    .json(&json!({ "text": text }))
                    .send()
                    .await
                    .map_err(|e| ReporterError::Delivery(format!("Slack webhook request failed: {}", e)))?;

                let status = resp.status();
                if !status.is_success() {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(ReporterError::Delivery(format!(
                        "Slack webhook returned HTTP {}: {}",
                        status,
                        body.trim()
                    )));
                }
                debug!("Slack webhook message posted");
                Ok(())
            }
        }
    }

    fn channel_name(&self) -> &str {
        match self {
            SlackChannel::Bot { channel, .. } => channel.as_str(),
            SlackChannel::Webhook { .. } => "slack-webhook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_accepted() {
        assert!(check_post_message_response(&json!({"ok": true, "ts": "1.2"})).is_ok());
    }

    #[test]
    fn test_not_ok_response_is_delivery_error() {
        let err = check_post_message_response(&json!({"ok": false, "error": "channel_not_found"})).unwrap_err();
        assert!(matches!(err, ReporterError::Delivery(_)));
        assert!(err.to_string().contains("channel_not_found"));
    }

    #[test]
    fn test_missing_ok_is_failure() {
        assert!(check_post_message_response(&json!({})).is_err());
    }

    #[test]
    fn test_bot_defaults_api_url() {
        let channel = SlackChannel::bot("xoxb-test", "#bugs", None, None).unwrap();
        match channel {
            SlackChannel::Bot { api_url, .. } => assert_eq!(api_url, "https://slack.com/api"),
            SlackChannel::Webhook { .. } => panic!("expected bot channel"),
        }
    }
}
