//! usermgt - create and delete system user accounts.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use nix::unistd::geteuid;
use tracing::{debug, error, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usermgt::cli::{effective_level, Cli, Request};
use usermgt::config::Settings;
use usermgt::executor::SystemRunner;
use usermgt::operations::UserManager;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    cli.apply_overrides(&mut settings);

    if let Err(e) = init_logging(&settings, cli.verbose) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    debug!(
        log_file = %settings.paths.log_file.display(),
        backup_dir = %settings.paths.backup_dir.display(),
        "Configuration loaded"
    );

    if !geteuid().is_root() {
        warn!("Not running as root; account tools will likely refuse to make changes");
    }

    let request = cli.request(&settings);
    let manager = UserManager::new(SystemRunner::new(settings.command_timeout()), settings);
    let mut stdout = io::stdout().lock();

    let result = match &request {
        Request::Create(op) => manager.create_user(op, &mut stdout),
        Request::Delete(op) => manager.delete_user(op, &mut stdout),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Operation could not be recorded");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on settings.
///
/// Diagnostics go to stderr; stdout carries the operation messages.
fn init_logging(settings: &Settings, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(effective_level(&settings.logging.level, verbose)))?;

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()?;
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
