mod commands;
mod utils;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use formflow_core::{init_logging, LoggingConfig, SessionConfig};
use formflow_validation::Locale;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formflow")]
#[command(about = "Validate and submit registration form data")]
struct Cli {
    /// Message language (en or uk), overrides FORMFLOW_LOCALE
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON values file as a full submit attempt would
    Check {
        /// JSON object of field values
        file: PathBuf,

        /// Print the form snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a JSON values file to the simulated backend
    Submit {
        /// JSON object of field values
        file: PathBuf,

        /// Make the backend fail with this reason
        #[arg(long, value_name = "REASON", num_args = 0..=1, default_missing_value = "simulated failure")]
        fail: Option<String>,

        /// Exit right after the submission instead of waiting out the success notice
        #[arg(long)]
        no_wait: bool,
    },

    /// Print the registration rules
    Rules,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SessionConfig::from_env()?;
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.get_log_level().as_str()
    };
    let logging = LoggingConfig {
        json_format: cli.log_json,
        ..LoggingConfig::default()
    }
    .with_level(level)
    .with_global_field("locale", config.get_locale().to_string());
    init_logging(logging).map_err(|e| anyhow!(e))?;

    match cli.command {
        Commands::Check { file, json } => commands::check::run(&file, &config, json),
        Commands::Submit {
            file,
            fail,
            no_wait,
        } => commands::submit::run(&file, config, fail, !no_wait).await,
        Commands::Rules => commands::rules::run(&config),
    }
}
