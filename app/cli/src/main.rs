mod calculate_cmd;
mod config_cmd;
mod options_cmd;
mod ping_cmd;
mod terminal_output;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use escapevel_client::HttpCalculatorApi;
use escapevel_config::{config_dir, config_file_path, load_and_prepare, log_dir, LoadedConfig, API_URL_ENV};
use escapevel_core::{CalculatorApi, EscapeThreshold};
use escapevel_logging::{init_logger, LogOptions};

use calculate_cmd::CalculateArgs;

#[derive(Parser)]
#[command(name = "escapevel")]
#[command(about = "Will your rocket escape Earth's gravity?")]
#[command(version)]
struct Cli {
    /// Calculation service base URL (overrides config and ESCAPEVEL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Also write logs to stderr (headless commands only)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (default)
    Ui,
    /// Submit one calculation and print the verdict
    Calculate(CalculateArgs),
    /// List the materials and fuels the service accepts
    Options,
    /// Check that the service is reachable
    Ping,
    /// Show the effective configuration
    Config {
        /// Write a config file with the built-in defaults
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    let dir = config_dir();
    let path = config_file_path(&dir);

    let mut env: HashMap<String, String> = std::env::vars().collect();
    if let Some(url) = cli.api_url {
        env.insert(API_URL_ENV.to_string(), url);
    }
    let LoadedConfig { config, warnings } = load_and_prepare(&path, &env).await?;

    init_logger(&LogOptions {
        dir: log_dir(&config, &dir),
        level: config.log_level().to_string(),
        console: cli.verbose && !matches!(command, Commands::Ui),
    })?;
    for warning in &warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    let api: Arc<dyn CalculatorApi> = Arc::new(HttpCalculatorApi::new(config.base_url()));
    let threshold = EscapeThreshold::new(config.escape_velocity_mps());
    info!(base_url = %api.base_url(), threshold = threshold.mps(), "escapevel starting");

    match command {
        Commands::Ui => escapevel_tui::run_ui(api, threshold).await,
        Commands::Calculate(args) => calculate_cmd::run(api, threshold, args).await,
        Commands::Options => options_cmd::run(api.as_ref()).await,
        Commands::Ping => ping_cmd::run(api.as_ref()).await,
        Commands::Config { init: true, force } => config_cmd::init(&path, force).await,
        Commands::Config { init: false, .. } => config_cmd::show(&config, &path),
    }
}
