//! System username validation.
//!
//! Validates usernames for safe use with system user management commands.

use crate::error::{UserMgtError, ValidationErrorKind};

/// Maximum length for system usernames (Linux standard).
const MAX_USERNAME_LENGTH: usize = 32;

/// Upper bound for names of existing accounts (LOGIN_NAME_MAX).
const MAX_EXISTING_USERNAME_LENGTH: usize = 256;

/// Reserved system usernames that cannot be created or deleted.
const RESERVED_USERNAMES: &[&str] = &[
    "root",
    "daemon",
    "bin",
    "sys",
    "sync",
    "games",
    "man",
    "lp",
    "mail",
    "news",
    "uucp",
    "proxy",
    "www-data",
    "backup",
    "list",
    "irc",
    "gnats",
    "nobody",
    "systemd-network",
    "systemd-resolve",
    "messagebus",
    "sshd",
    "_apt",
];

fn invalid(username: &str, reason: impl Into<String>) -> UserMgtError {
    UserMgtError::Validation {
        kind: ValidationErrorKind::InvalidUsername {
            username: username.to_string(),
            reason: reason.into(),
        },
    }
}

/// Validate a system username.
///
/// Rules:
/// - Must not be empty
/// - Must not exceed 32 characters
/// - Must start with a lowercase letter
/// - May only contain lowercase letters, digits, underscores, and hyphens
/// - Must not be a reserved system username
pub fn validate_system_username(username: &str) -> Result<&str, UserMgtError> {
    let Some(first) = username.chars().next() else {
        return Err(invalid(username, "username cannot be empty"));
    };

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(invalid(
            username,
            format!("exceeds maximum length of {} characters", MAX_USERNAME_LENGTH),
        ));
    }

    if !first.is_ascii_lowercase() {
        return Err(invalid(username, "must start with a lowercase letter"));
    }

    if let Some(c) = username
        .chars()
        .find(|&c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '_' && c != '-')
    {
        return Err(invalid(
            username,
            format!(
                "contains invalid character '{}'; only lowercase letters, digits, underscores, and hyphens are allowed",
                c.escape_default()
            ),
        ));
    }

    if RESERVED_USERNAMES.contains(&username) {
        return Err(invalid(username, "reserved system account"));
    }

    Ok(username)
}

/// Validate the name of an account that is expected to exist already.
///
/// Existing accounts may use names the creation rules refuse (`john.doe`,
/// `John`, `host$`), so only what keeps the name a single safe argument
/// and a single path component is checked:
/// - Must not be empty or exceed 256 characters
/// - Must not start with `-`
/// - Must not be `.` or `..`
/// - Must not contain `/`, `:`, whitespace or control characters
/// - Must not be a reserved system username
pub fn validate_existing_username(username: &str) -> Result<&str, UserMgtError> {
    if username.is_empty() {
        return Err(invalid(username, "username cannot be empty"));
    }

    if username.chars().count() > MAX_EXISTING_USERNAME_LENGTH {
        return Err(invalid(
            username,
            format!(
                "exceeds maximum length of {} characters",
                MAX_EXISTING_USERNAME_LENGTH
            ),
        ));
    }

    if username.starts_with('-') {
        return Err(invalid(username, "must not start with '-'"));
    }

    if username == "." || username == ".." {
        return Err(invalid(username, "not a valid account name"));
    }

    if let Some(c) = username
        .chars()
        .find(|&c| c == '/' || c == ':' || c.is_whitespace() || c.is_control())
    {
        return Err(invalid(
            username,
            format!("contains invalid character '{}'", c.escape_default()),
        ));
    }

    if RESERVED_USERNAMES.contains(&username) {
        return Err(invalid(username, "reserved system account"));
    }

    Ok(username)
}
