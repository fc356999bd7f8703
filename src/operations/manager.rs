//! Runs operations and records their outcome.

use std::io::Write;

use tracing::{info, warn};

use crate::accounts::AccountTools;
use crate::audit::{AuditAction, AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::UserMgtResult;
use crate::executor::CommandRunner;

use super::context::OperationContext;
use super::create::CreateUser;
use super::delete::DeleteUser;
use super::traits::Operation;

/// Outcome of one operation, as printed and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub action: AuditAction,
    /// Line printed for the user.
    pub message: String,
    /// Details written to the action log.
    pub details: String,
}

impl OperationReport {
    pub fn success(&self) -> bool {
        !self.action.is_error()
    }

    pub fn entry(&self) -> AuditEntry {
        AuditEntry::new(self.action, self.details.clone())
    }
}

/// Entry point for account operations.
pub struct UserManager<R> {
    tools: AccountTools<R>,
    settings: Settings,
    logger: AuditLogger,
}

impl<R: CommandRunner> UserManager<R> {
    /// Create a manager logging to `settings.paths.log_file`.
    pub fn new(runner: R, settings: Settings) -> Self {
        let logger = AuditLogger::new(&settings.paths.log_file);
        Self {
            tools: AccountTools::new(runner),
            settings,
            logger,
        }
    }

    /// Create a user. See [`CreateUser`].
    pub fn create_user<W: Write>(
        &self,
        request: &CreateUser,
        out: &mut W,
    ) -> UserMgtResult<OperationReport> {
        self.perform(request, out)
    }

    /// Back up and delete a user. See [`DeleteUser`].
    pub fn delete_user<W: Write>(
        &self,
        request: &DeleteUser,
        out: &mut W,
    ) -> UserMgtResult<OperationReport> {
        self.perform(request, out)
    }

    /// Validate and execute `op`, then print and log the outcome.
    ///
    /// Operation failures become an error report; the returned error is
    /// reserved for failures to print or to write the action log.
    pub fn perform<O: Operation, W: Write>(
        &self,
        op: &O,
        out: &mut W,
    ) -> UserMgtResult<OperationReport> {
        info!(operation = op.name(), username = %op.username(), "Starting operation");

        let outcome = op.validate().and_then(|()| {
            let mut ctx = OperationContext::new(&self.tools, &self.settings, &mut *out);
            op.execute(&mut ctx)
        });

        let report = match outcome {
            Ok(completed) => {
                info!(
                    operation = op.name(),
                    username = %op.username(),
                    "Operation succeeded"
                );
                OperationReport {
                    action: op.success_action(),
                    message: completed.message,
                    details: completed.details,
                }
            }
            Err(err) => {
                warn!(
                    operation = op.name(),
                    username = %op.username(),
                    category = ?err.category(),
                    error = %err,
                    "Operation failed"
                );
                let details = op.describe_failure(&err);
                OperationReport {
                    action: op.error_action(),
                    message: details.clone(),
                    details,
                }
            }
        };

        writeln!(out, "{}", report.message)?;
        self.logger.log(&report.entry())?;

        Ok(report)
    }
}
