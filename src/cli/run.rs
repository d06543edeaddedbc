use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use crate::bugzilla::BugzillaClient;
use crate::cli::commands::{DeliveryArgs, RunArgs, SourceArgs};
use crate::config::{self, ReporterConfig, SlackConfig};
use crate::errors::ReporterError;
use crate::notify::create_channel;
use crate::reporting;
use tracing::info;

pub async fn handle_run(args: RunArgs) -> Result<(), ReporterError> {
    let config = load_config(&args.source, Some(&args.delivery)).await?;
    let client = BugzillaClient::new(&config.bugzilla())?;
    let channel = create_channel(config.slack.as_ref(), args.delivery.dry_run)?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    let summary = reporting::run_cycle(&client, channel.as_ref(), &config.report(), &cancel).await?;
    info!(run_id = %summary.run_id, bugs = summary.bug_count, "Run completed");
    Ok(())
}

pub async fn handle_preview(args: SourceArgs) -> Result<(), ReporterError> {
    let config = load_config(&args, None).await?;
    let client = BugzillaClient::new(&config.bugzilla())?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    let text = reporting::report(&client, &config.report(), &cancel).await?;
    print!("{}", text);
    Ok(())
}

/// Read the optional config file, then layer command-line and environment
/// overrides on top.
pub async fn load_config(
    source: &SourceArgs,
    delivery: Option<&DeliveryArgs>,
) -> Result<ReporterConfig, ReporterError> {
    let mut config = match &source.config {
        Some(path) => config::parse_config(&PathBuf::from(path)).await?,
        None => ReporterConfig::default(),
    };
    apply_overrides(&mut config, source, delivery);
    Ok(config)
}

pub fn apply_overrides(config: &mut ReporterConfig, source: &SourceArgs, delivery: Option<&DeliveryArgs>) {
    if source.bugzilla_url.is_some() || source.bugzilla_api_key.is_some() {
        let mut bz = config.bugzilla();
        if let Some(url) = &source.bugzilla_url {
            bz.base_url = url.clone();
        }
        if let Some(key) = &source.bugzilla_api_key {
            bz.api_key = Some(key.clone());
        }
        config.bugzilla = Some(bz);
    }

    if let Some(components) = &source.components {
        let mut report = config.report();
        report.components = components
            .split(',')
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .collect();
        config.report = Some(report);
    }

    let Some(delivery) = delivery else { return };
    if delivery.slack_token.is_none() && delivery.slack_channel.is_none() && delivery.slack_webhook_url.is_none() {
        return;
    }

    let mut slack = config.slack.clone().unwrap_or_else(SlackConfig::default);
    if let Some(webhook) = &delivery.slack_webhook_url {
        slack.webhook_url = Some(webhook.clone());
        slack.token = None;
    }
    if let Some(token) = &delivery.slack_token {
        slack.token = Some(token.clone());
        slack.webhook_url = None;
    }
    if let Some(channel) = &delivery.slack_channel {
        slack.channel = Some(channel.clone());
    }
    config.slack = Some(slack);
}

pub fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            cancel.cancel();
        }
    });
}
