use clap::Parser;
use closedbugs::{cli, config, errors};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    debug!(git_hash = option_env!("GIT_HASH").unwrap_or("dev"), "closedbugs starting");

    let result = match cli.command {
        cli::Commands::Run(args) => cli::run::handle_run(args).await,
        cli::Commands::Preview(args) => cli::run::handle_preview(args).await,
        cli::Commands::Schedule(args) => cli::schedule::handle_schedule(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.classify().exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::ReporterError> {
    let path = std::path::PathBuf::from(&args.config);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
