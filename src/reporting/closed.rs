use chrono::{DateTime, Utc};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::bugzilla::{BugQuery, BugTrackerClient};
use crate::config::ReportConfig;
use crate::errors::ReporterError;
use crate::notify::NotificationChannel;
use crate::utils::formatting::format_duration;
use super::aggregator::aggregate;
use super::formatter::{format_report, NO_BUGS_CLOSED};
use tracing::{info, warn};

/// A rendered digest together with the counts it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedReport {
    pub text: String,
    pub bug_count: usize,
    pub group_count: usize,
}

/// Outcome of one delivered report cycle.
#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub bug_count: usize,
    pub group_count: usize,
    pub duration_ms: u64,
    pub delivered_to: String,
}

/// Build the closed-bugs digest: one search, then grouping and rendering.
pub async fn report(
    client: &dyn BugTrackerClient,
    config: &ReportConfig,
    cancel: &CancellationToken,
) -> Result<String, ReporterError> {
    Ok(build_report(client, config, cancel).await?.text)
}

pub async fn build_report(
    client: &dyn BugTrackerClient,
    config: &ReportConfig,
    cancel: &CancellationToken,
) -> Result<ClosedReport, ReporterError> {
    if cancel.is_cancelled() {
        return Err(ReporterError::Cancelled("report cancelled before bug search".into()));
    }

    let query = BugQuery::closed_in_last_day(config);
    let searched = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReporterError::Cancelled("bug search aborted".into())),
        result = client.search(&query) => result,
    };

    let bugs = match searched {
        Ok(bugs) => bugs,
        Err(e) => {
            let class = e.classify();
            warn!(reason = class.reason, tracker = client.tracker_name(), error = %e, "Closed bugs search failed");
            return Err(e);
        }
    };

    if bugs.is_empty() {
        return Ok(ClosedReport {
            text: NO_BUGS_CLOSED.to_string(),
            bug_count: 0,
            group_count: 0,
        });
    }

    let groups = aggregate(&bugs);
    Ok(ClosedReport {
        text: format_report(&groups),
        bug_count: groups.total(),
        group_count: groups.len(),
    })
}

/// Run one full cycle: build the report and deliver it. Nothing is retried;
/// a report that fails delivery is dropped.
pub async fn run_cycle(
    client: &dyn BugTrackerClient,
    channel: &dyn NotificationChannel,
    config: &ReportConfig,
    cancel: &CancellationToken,
) -> Result<CycleSummary, ReporterError> {
    let run_id = uuid::Uuid::new_v4().to_string();
    let started_at = Utc::now();
    let start = Instant::now();

    info!(run_id = %run_id, product = %config.product, components = config.components.len(), "Starting closed bugs report");

    let closed = build_report(client, config, cancel).await?;

    let delivered = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ReporterError::Cancelled("report delivery aborted".into())),
        result = channel.send(&closed.text) => result,
    };

    if let Err(e) = delivered {
        let class = e.classify();
        warn!(
            run_id = %run_id,
            reason = class.reason,
            channel = channel.channel_name(),
            error = %e,
            "Failed to deliver closed bug counts"
        );
        return Err(e);
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        run_id = %run_id,
        bugs = closed.bug_count,
        resolutions = closed.group_count,
        channel = channel.channel_name(),
        started_at = %started_at.to_rfc3339(),
        elapsed = %format_duration(duration_ms),
        "Closed bugs report delivered"
    );

    Ok(CycleSummary {
        run_id,
        started_at,
        bug_count: closed.bug_count,
        group_count: closed.group_count,
        duration_ms,
        delivered_to: channel.channel_name().to_string(),
    })
}
