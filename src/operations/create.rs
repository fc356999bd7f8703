//! Create user operation.
//!
//! Ensures the primary group exists, refuses existing accounts, then runs
//! `useradd` with a home directory, comment, group and shell.

use std::io::Write;

use tracing::{debug, info};

use crate::accounts::NewAccount;
use crate::audit::AuditAction;
use crate::error::{PreconditionKind, UserMgtError, UserMgtResult};
use crate::executor::CommandRunner;
use crate::validation::{
    validate_fullname, validate_group_name, validate_shell, validate_system_username,
};

use super::context::{Completed, OperationContext};
use super::traits::Operation;

/// Create a new system user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub username: String,
    pub fullname: String,
    pub group: String,
    pub shell: String,
}

impl CreateUser {
    pub fn new(
        username: impl Into<String>,
        fullname: impl Into<String>,
        group: impl Into<String>,
        shell: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            fullname: fullname.into(),
            group: group.into(),
            shell: shell.into(),
        }
    }
}

impl Operation for CreateUser {
    fn name(&self) -> &'static str {
        "create"
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn verb(&self) -> &'static str {
        "creating"
    }

    fn success_action(&self) -> AuditAction {
        AuditAction::CreateUser
    }

    fn error_action(&self) -> AuditAction {
        AuditAction::ErrorCreateUser
    }

    fn validate(&self) -> UserMgtResult<()> {
        validate_system_username(&self.username)?;
        validate_fullname(&self.fullname)?;
        validate_group_name(&self.group)?;
        validate_shell(&self.shell)?;
        Ok(())
    }

    fn execute<R: CommandRunner, W: Write>(
        &self,
        ctx: &mut OperationContext<'_, R, W>,
    ) -> UserMgtResult<Completed> {
        if !ctx.tools.group_exists(&self.group)? {
            ctx.say(format!(
                "Group {} does not exist. Creating group...",
                self.group
            ))?;
            ctx.tools.create_group(&self.group)?;
            info!(group = %self.group, "Group created");
        }

        if ctx.tools.user_exists(&self.username)? {
            return Err(UserMgtError::Precondition {
                kind: PreconditionKind::UserExists {
                    username: self.username.clone(),
                },
            });
        }

        debug!(
            username = %self.username,
            group = %self.group,
            shell = %self.shell,
            "Adding user"
        );

        ctx.tools.add_user(&NewAccount {
            username: &self.username,
            fullname: &self.fullname,
            group: &self.group,
            shell: &self.shell,
        })?;

        Ok(Completed {
            message: format!("User {} created successfully.", self.username),
            details: format!(
                "Username={}, FullName={}, Group={}, Shell={}",
                self.username, self.fullname, self.group, self.shell
            ),
        })
    }
}
