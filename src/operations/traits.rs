//! Operation trait definition.

use std::io::Write;

use crate::audit::AuditAction;
use crate::error::{ErrorCategory, UserMgtError, UserMgtResult};
use crate::executor::CommandRunner;

use super::context::{Completed, OperationContext};

/// An account operation run by `UserManager`.
pub trait Operation {
    /// Short name used in tracing output.
    fn name(&self) -> &'static str;

    /// The account the operation acts on.
    fn username(&self) -> &str;

    /// Present participle used in failure messages ("creating").
    fn verb(&self) -> &'static str;

    /// Action logged when `execute` succeeds.
    fn success_action(&self) -> AuditAction;

    /// Action logged for every failure.
    fn error_action(&self) -> AuditAction;

    /// Check the arguments before any tool is run.
    fn validate(&self) -> UserMgtResult<()>;

    /// Run the operation against the system.
    fn execute<R: CommandRunner, W: Write>(
        &self,
        ctx: &mut OperationContext<'_, R, W>,
    ) -> UserMgtResult<Completed>;

    /// Log details for a failure.
    fn describe_failure(&self, err: &UserMgtError) -> String {
        match err.category() {
            ErrorCategory::Precondition => err.to_string(),
            ErrorCategory::ToolFailure => {
                format!("Error {} user {}: {}", self.verb(), self.username(), err)
            }
            ErrorCategory::Unexpected => format!(
                "Unexpected error {} user {}: {}",
                self.verb(),
                self.username(),
                err
            ),
        }
    }
}
