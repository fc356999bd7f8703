//! Error types for usermgt.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for account operations.
#[derive(Error, Debug)]
pub enum UserMgtError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Rejected command-line input.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// The account database is not in the state the operation requires.
    #[error("{kind}")]
    Precondition { kind: PreconditionKind },

    /// External tool failures.
    #[error("{kind}")]
    Command { kind: CommandErrorKind },

    /// Writing the action log failed.
    #[error("Failed to write action log '{}': {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation error kinds.
#[derive(Error, Debug)]
pub enum ValidationErrorKind {
    #[error("Invalid username: {username}: {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("Invalid group name: {group}: {reason}")]
    InvalidGroup { group: String, reason: String },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

/// Precondition kinds.
///
/// Messages match the wording written to the action log.
#[derive(Error, Debug)]
pub enum PreconditionKind {
    #[error("User {username} already exists.")]
    UserExists { username: String },

    #[error("User {username} does not exist.")]
    UserMissing { username: String },
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Failed to execute {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} failed (exit {}): {message}", display_code(*exit_code))]
    NonZeroExit {
        program: String,
        exit_code: Option<i32>,
        message: String,
    },

    #[error("{program} timed out after {timeout_secs} seconds")]
    Timeout { program: String, timeout_secs: u64 },
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Coarse classification used when reporting an operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected outcome: bad input or account state.
    Precondition,
    /// An external tool could not run or reported failure.
    ToolFailure,
    /// Anything else (filesystem faults, configuration).
    Unexpected,
}

impl UserMgtError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::Precondition { .. } => ErrorCategory::Precondition,
            Self::Command { .. } => ErrorCategory::ToolFailure,
            Self::Config { .. } | Self::Log { .. } | Self::Io(_) => ErrorCategory::Unexpected,
        }
    }

    /// Exit code of the failed tool, if this is a non-zero exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Command {
                kind: CommandErrorKind::NonZeroExit { exit_code, .. },
            } => *exit_code,
            _ => None,
        }
    }
}

/// Result type alias for usermgt operations.
pub type UserMgtResult<T> = Result<T, UserMgtError>;
