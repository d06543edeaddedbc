use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use crate::bugzilla::{BugTrackerClient, BugzillaClient};
use crate::cli::commands::ScheduleArgs;
use crate::cli::run::{load_config, spawn_ctrl_c};
use crate::config::ReportConfig;
use crate::errors::ReporterError;
use crate::notify::{create_channel, NotificationChannel};
use crate::reporting;
use crate::utils::formatting::format_interval;
use tracing::{info, warn};

pub async fn handle_schedule(args: ScheduleArgs) -> Result<(), ReporterError> {
    let config = load_config(&args.source, Some(&args.delivery)).await?;
    let interval_secs = args.interval_secs.unwrap_or_else(|| config.interval_secs());
    if interval_secs == 0 {
        return Err(ReporterError::Config("interval must be positive".into()));
    }

    let client = BugzillaClient::new(&config.bugzilla())?;
    let channel = create_channel(config.slack.as_ref(), args.delivery.dry_run)?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    info!(period = %format_interval(interval_secs), "Closed bugs reporter scheduled");
    let cycles = run_schedule(
        &client,
        channel.as_ref(),
        &config.report(),
        Duration::from_secs(interval_secs),
        &cancel,
    ).await;
    info!(cycles, "Scheduler stopped");
    Ok(())
}

/// Trigger a report cycle on every tick until `cancel` fires. The first tick
/// is immediate. A failed cycle is logged and does not stop the schedule.
/// Returns the number of cycles started.
pub async fn run_schedule(
    client: &dyn BugTrackerClient,
    channel: &dyn NotificationChannel,
    config: &ReportConfig,
    period: Duration,
    cancel: &CancellationToken,
) -> u64 {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycles = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        cycles += 1;
        let cycle_cancel = cancel.child_token();
        match reporting::run_cycle(client, channel, config, &cycle_cancel).await {
            Ok(_) => {}
            Err(ReporterError::Cancelled(_)) => break,
            Err(e) => {
                warn!(cycle = cycles, reason = e.classify().reason, error = %e, "Report cycle failed");
            }
        }
    }

    cycles
}
