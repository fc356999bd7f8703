//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::Settings;
use crate::operations::{CreateUser, DeleteUser};

/// Provision and deprovision system user accounts.
#[derive(Parser, Debug)]
#[command(name = "usermgt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Action log path (overrides the configuration file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new user
    Create {
        /// Username of the new user
        #[arg(long)]
        username: String,

        /// Full name of the user
        #[arg(long)]
        fullname: String,

        /// Group to assign the user to
        #[arg(long)]
        group: String,

        /// Shell for the user [default: /bin/bash]
        #[arg(long)]
        shell: Option<String>,
    },

    /// Delete an existing user
    Delete {
        /// Username of the user to delete
        #[arg(long)]
        username: String,
    },
}

/// A parsed subcommand with configured defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create(CreateUser),
    Delete(DeleteUser),
}

impl Cli {
    /// Apply command-line overrides to loaded settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(log_file) = &self.log_file {
            settings.paths.log_file = log_file.clone();
        }
    }

    /// Build the operation request for the chosen subcommand.
    pub fn request(&self, settings: &Settings) -> Request {
        match &self.command {
            Commands::Create {
                username,
                fullname,
                group,
                shell,
            } => Request::Create(CreateUser::new(
                username.as_str(),
                fullname.as_str(),
                group.as_str(),
                shell
                    .clone()
                    .unwrap_or_else(|| settings.defaults.shell.clone()),
            )),
            Commands::Delete { username } => Request::Delete(DeleteUser::new(username.as_str())),
        }
    }
}

/// Tracing level after applying `-v` flags to the configured level.
pub fn effective_level(configured: &str, verbose: u8) -> String {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let configured = configured.to_lowercase();
    let base = LEVELS
        .iter()
        .position(|l| *l == configured)
        .unwrap_or(1);
    let index = (base + verbose as usize).min(LEVELS.len() - 1);
    LEVELS[index].to_string()
}
