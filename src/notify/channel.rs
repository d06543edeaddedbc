use async_trait::async_trait;
use crate::config::SlackConfig;
use crate::errors::ReporterError;
use super::console::ConsoleChannel;
use super::slack::SlackChannel;

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver one finished report. A failure is final for the current run.
    async fn send(&self, text: &str) -> Result<(), ReporterError>;

    /// Channel name for logging
    fn channel_name(&self) -> &str;
}

/// Pick the delivery sink: the console for dry runs, otherwise Slack via a
/// webhook or a bot token, whichever the config provides.
pub fn create_channel(
    slack: Option<&SlackConfig>,
    dry_run: bool,
) -> Result<Box<dyn NotificationChannel>, ReporterError> {
    if dry_run {
        return Ok(Box::new(ConsoleChannel::new()));
    }

    let slack = slack.ok_or_else(|| {
        ReporterError::Config("No slack section configured; use --dry-run to print the report instead".into())
    })?;

    if let Some(webhook) = slack.webhook_url.as_deref().filter(|w| !w.is_empty()) {
        return Ok(Box::new(SlackChannel::webhook(webhook, slack.timeout_secs)?));
    }

    match (slack.token.as_deref(), slack.channel.as_deref()) {
        (Some(token), Some(channel)) if !token.is_empty() && !channel.is_empty() => {
            Ok(Box::new(SlackChannel::bot(token, channel, slack.api_url.as_deref(), slack.timeout_secs)?))
        }
        _ => Err(ReporterError::Config(
            "Slack delivery needs either webhook_url or both token and channel".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_uses_console() {
        let channel = create_channel(None, true).unwrap();
        assert_eq!(channel.channel_name(), "console");
    }

    #[test]
    fn test_missing_slack_section_is_config_error() {
        let err = create_channel(None, false).err().unwrap();
        assert!(matches!(err, ReporterError::Config(_)));
    }

    #[test]
    fn test_webhook_wins() {
        let slack = SlackConfig {
            webhook_url: Some("https://hooks.slack.com/services/T/B/X".into()),
            ..Default::default()
        };
        let channel = create_channel(Some(&slack), false).unwrap();
        assert_eq!(channel.channel_name(), "slack-webhook");
    }

    #[test]
    fn test_bot_token_and_channel() {
        let slack = SlackConfig {
            token: Some("xoxb-test".into()),
            channel: Some("#bugs".into()),
            ..Default::default()
        };
        let channel = create_channel(Some(&slack), false).unwrap();
        assert_eq!(channel.channel_name(), "#bugs");
    }

    #[test]
    fn test_token_without_channel_rejected() {
        let slack = SlackConfig {
            token: Some("xoxb-test".into()),
            ..Default::default()
        };
        assert!(create_channel(Some(&slack), false).is_err());
    }
}
