use clap::{Parser, Subcommand, Args};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(name = "closedbugs", version, long_version = LONG_VERSION, about = "Daily digest of closed Bugzilla bugs, grouped by resolution")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build one report and deliver it
    Run(RunArgs),
    /// Build one report and print it without delivering
    Preview(SourceArgs),
    /// Deliver a report periodically until interrupted
    Schedule(ScheduleArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Where the bugs come from and how the query is scoped.
#[derive(Args, Clone, Default)]
pub struct SourceArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bugzilla base URL
    #[arg(long)]
    pub bugzilla_url: Option<String>,

    /// Bugzilla API key
    #[arg(long, env = "BUGZILLA_API_KEY", hide_env_values = true)]
    pub bugzilla_api_key: Option<String>,

    /// Comma-separated components to restrict the query to
    #[arg(long)]
    pub components: Option<String>,
}

/// Where the report goes.
#[derive(Args, Clone, Default)]
pub struct DeliveryArgs {
    /// Slack bot token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub slack_token: Option<String>,

    /// Slack channel for the bot token
    #[arg(long, env = "SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Slack incoming webhook URL
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook_url: Option<String>,

    /// Print the report instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub delivery: DeliveryArgs,
}

#[derive(Args, Clone)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub delivery: DeliveryArgs,

    /// Seconds between reports (overrides schedule.interval_secs)
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
