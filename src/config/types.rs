use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_BUGZILLA_URL: &str = "https://bugzilla.redhat.com";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReporterConfig {
    pub bugzilla: Option<BugzillaConfig>,
    pub report: Option<ReportConfig>,
    pub slack: Option<SlackConfig>,
    pub schedule: Option<ScheduleConfig>,
}

impl ReporterConfig {
    pub fn bugzilla(&self) -> BugzillaConfig {
        self.bugzilla.clone().unwrap_or_default()
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    pub fn interval_secs(&self) -> u64 {
        self.schedule
            .as_ref()
            .and_then(|s| s.interval_secs)
            .unwrap_or(DEFAULT_INTERVAL_SECS)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BugzillaConfig {
    #[serde(default = "default_bugzilla_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for BugzillaConfig {
    fn default() -> Self {
        Self {
            base_url: default_bugzilla_url(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

/// Scope of the closed-bugs query. Read-only input for each run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_classification")]
    pub classification: String,
    #[serde(default = "default_product")]
    pub product: String,
    #[serde(default = "default_status")]
    pub status: String,
    /// Empty means no component restriction.
    #[serde(default)]
    pub components: BTreeSet<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            classification: default_classification(),
            product: default_product(),
            status: default_status(),
            components: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SlackConfig {
    pub token: Option<String>,
    pub channel: Option<String>,
    pub webhook_url: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScheduleConfig {
    pub interval_secs: Option<u64>,
}

fn default_bugzilla_url() -> String {
    DEFAULT_BUGZILLA_URL.to_string()
}

fn default_classification() -> String {
    "Red Hat".to_string()
}

fn default_product() -> String {
    "OpenShift Container Platform".to_string()
}

fn default_status() -> String {
    "CLOSED".to_string()
}
