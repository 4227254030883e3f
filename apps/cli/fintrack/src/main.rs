use fintrack::app::App;
use fintrack::cli::Cli;
use fintrack::commands;
use fintrack::error::FintrackError;
use fintrack::logger::initialize as LoggerInitialize;
use fintrack::output::{OutputFormat, error_envelope, print_json};
use fintrack::prompt::Prompt;

use client_core::config::{config_dir, load_dotenv};
use client_core::notify::Notification;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

const LOG_DIR_NAME: &str = "fintrack";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = OutputFormat::from_flag(cli.json);

    // Before resolving the config dir: .env may set FINTRACK_CONFIG_DIR
    load_dotenv();

    let config_dir = match cli.config_dir.clone() {
        Some(dir) => dir,
        None => match config_dir() {
            Ok(dir) => dir,
            Err(e) => return fail(&FintrackError::from(e), output, &[]),
        },
    };

    let log_dir = log_dir(&config_dir);
    if let Err(e) = LoggerInitialize(&log_dir, cli.verbose) {
        // Logging is best effort; the command still runs
        eprintln!("Warning: {}", e.user_message());
    }

    info!("fintrack starting");
    info!("Config directory: {}", config_dir.display());

    let mut app = match App::bootstrap(&config_dir, output) {
        Ok(app) => app,
        Err(e) => return fail(&e, output, &[]),
    };

    let mut prompt = Prompt::stdin();
    let mut stdout = std::io::stdout();
    let result = commands::dispatch(&mut app, cli.command, &mut prompt, &mut stdout).await;

    let notifications = app.notifier().take_buffered();
    match result {
        Ok(report) => match report.emit(output, &notifications) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(&e, output, &[]),
        },
        Err(e) => fail(&e, output, &notifications),
    }
}

/// `{platform data dir}/fintrack`, else the config dir.
fn log_dir(config_dir: &std::path::Path) -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(LOG_DIR_NAME))
        .unwrap_or_else(|| config_dir.to_path_buf())
}

fn fail(error: &FintrackError, output: OutputFormat, notifications: &[Notification]) -> ExitCode {
    error!("{error}");

    match output {
        OutputFormat::Json => {
            if let Err(e) = print_json(&error_envelope(error, notifications)) {
                eprintln!("Error: {}", e.user_message());
            }
        }
        OutputFormat::Text => eprintln!("Error: {}", error.user_message()),
    }

    ExitCode::FAILURE
}
