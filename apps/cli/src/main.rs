use billing_cli::command::{Command, exit_code, observe, render};
use billing_cli::error::CliError;
use billing_cli::logger::{initialize as LoggerInitialize, level_from_env};
use billing_cli::session::store_from_env;

use api_client::Dispatcher;
use api_client::config::{ClientConfig, detect_config_paths};
use api_client::error::CoreError;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let command = Command::parse(std::env::args().skip(1))?;

    let paths = detect_config_paths().map_err(CoreError::from)?;
    let log_dir = paths.config_dir.join(LOG_DIR_NAME);
    create_dir_all(&log_dir).map_err(|e| CliError::Cli {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Logger first so config loading is recorded
    LoggerInitialize(&log_dir, level_from_env())?;
    info!("Billing CLI starting, running {command:?}");

    let config = ClientConfig::load_default().map_err(CoreError::from)?;
    info!("API base URL: {}", config.api.base_url);

    let dispatcher = Arc::new(
        Dispatcher::from_config(&config.api, Arc::new(store_from_env()))
            .map_err(CoreError::from)?,
    );

    let receiver = command.watch(&dispatcher);
    let settled = observe(receiver, |state| println!("{}", render(state)))
        .await
        .ok_or_else(|| CliError::Cli {
            message: "Call ended without settling".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(exit_code(&settled))
}
