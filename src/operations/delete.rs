//! Delete user operation.
//!
//! Backs up the home directory into the backup directory, then removes the
//! account and its home with `userdel -r`.

use std::io::Write;

use tracing::{debug, info};

use crate::accounts::{ensure_backup_dir, home_dir_exists};
use crate::audit::AuditAction;
use crate::error::{CommandErrorKind, PreconditionKind, UserMgtError, UserMgtResult};
use crate::executor::CommandRunner;
use crate::validation::validate_existing_username;

use super::context::{Completed, OperationContext};
use super::traits::Operation;

/// Delete a system user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUser {
    pub username: String,
}

impl DeleteUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl Operation for DeleteUser {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn verb(&self) -> &'static str {
        "deleting"
    }

    fn success_action(&self) -> AuditAction {
        AuditAction::DeleteUser
    }

    fn error_action(&self) -> AuditAction {
        AuditAction::ErrorDeleteUser
    }

    fn validate(&self) -> UserMgtResult<()> {
        validate_existing_username(&self.username)?;
        Ok(())
    }

    fn execute<R: CommandRunner, W: Write>(
        &self,
        ctx: &mut OperationContext<'_, R, W>,
    ) -> UserMgtResult<Completed> {
        let username = self.username.as_str();

        if !ctx.tools.user_exists(username)? {
            return Err(UserMgtError::Precondition {
                kind: PreconditionKind::UserMissing {
                    username: username.to_string(),
                },
            });
        }

        let settings = ctx.settings;
        let paths = &settings.paths;
        ensure_backup_dir(&paths.backup_dir, settings.backup_mode()?)?;

        let home = ctx
            .tools
            .home_dir(username)?
            .unwrap_or_else(|| paths.home_base.join(username));
        let backup = paths.backup_dir.join(username);

        if home_dir_exists(&home) {
            debug!(
                username = %username,
                home = %home.display(),
                backup = %backup.display(),
                "Backing up home directory"
            );
            ctx.tools.mirror_directory(&home, &backup)?;
            info!(username = %username, backup = %backup.display(), "Home directory backed up");
            ctx.say(format!(
                "Data for user {} backed up to {}.",
                username,
                backup.display()
            ))?;
        } else {
            ctx.say(format!(
                "No home directory found for user {}. Skipping backup.",
                username
            ))?;
        }

        ctx.tools.delete_user(username)?;

        Ok(Completed {
            message: format!("User {} deleted successfully.", username),
            details: format!("Username={}", username),
        })
    }

    fn describe_failure(&self, err: &UserMgtError) -> String {
        match err {
            UserMgtError::Command {
                kind: CommandErrorKind::NonZeroExit { program, .. },
            } if program == "userdel" => format!(
                "Failed to delete user {}. Return code: {}",
                self.username,
                err.exit_code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string())
            ),
            UserMgtError::Precondition { .. } | UserMgtError::Validation { .. } => err.to_string(),
            UserMgtError::Command { .. } => {
                format!("Error deleting user {}: {}", self.username, err)
            }
            _ => format!("Unexpected error deleting user {}: {}", self.username, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_metadata() {
        let op = DeleteUser::new("testuser");
        assert_eq!(op.name(), "delete");
        assert_eq!(op.success_action(), AuditAction::DeleteUser);
        assert_eq!(op.error_action(), AuditAction::ErrorDeleteUser);
    }

    #[test]
    fn test_validate_valid_username() {
        assert!(DeleteUser::new("testuser").validate().is_ok());
    }

    #[test]
    fn test_validate_reserved_username() {
        assert!(DeleteUser::new("root").validate().is_err());
        assert!(DeleteUser::new("www-data").validate().is_err());
    }

    #[test]
    fn test_validate_empty_username() {
        assert!(DeleteUser::new("").validate().is_err());
    }

    #[test]
    fn test_validate_accepts_names_outside_creation_rules() {
        assert!(DeleteUser::new("john.doe").validate().is_ok());
        assert!(DeleteUser::new("John").validate().is_ok());
        assert!(DeleteUser::new("ws01$").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unsafe_names() {
        assert!(DeleteUser::new("-r").validate().is_err());
        assert!(DeleteUser::new("..").validate().is_err());
        assert!(DeleteUser::new("a/b").validate().is_err());
    }

    #[test]
    fn test_userdel_failure_reports_return_code() {
        let op = DeleteUser::new("testuser");
        let err = UserMgtError::Command {
            kind: CommandErrorKind::NonZeroExit {
                program: "userdel".to_string(),
                exit_code: Some(8),
                message: "User 'testuser' is currently logged in".to_string(),
            },
        };
        assert_eq!(
            op.describe_failure(&err),
            "Failed to delete user testuser. Return code: 8"
        );
    }

    #[test]
    fn test_rsync_failure_wording() {
        let op = DeleteUser::new("testuser");
        let err = UserMgtError::Command {
            kind: CommandErrorKind::NonZeroExit {
                program: "rsync".to_string(),
                exit_code: Some(23),
                message: "Partial transfer due to error".to_string(),
            },
        };
        assert_eq!(
            op.describe_failure(&err),
            "Error deleting user testuser: rsync failed (exit 23): Partial transfer due to error"
        );
    }

    #[test]
    fn test_missing_user_wording() {
        let op = DeleteUser::new("ghost");
        let err = UserMgtError::Precondition {
            kind: PreconditionKind::UserMissing {
                username: "ghost".to_string(),
            },
        };
        assert_eq!(op.describe_failure(&err), "User ghost does not exist.");
    }
}
