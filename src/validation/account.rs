//! Group, full name and shell validation.

use std::path::{Component, Path};

use crate::error::{UserMgtError, ValidationErrorKind};

const MAX_GROUP_LENGTH: usize = 32;
const MAX_FULLNAME_LENGTH: usize = 256;

fn invalid_param(param: &str, message: impl Into<String>) -> UserMgtError {
    UserMgtError::Validation {
        kind: ValidationErrorKind::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        },
    }
}

/// Validate a group name: 1-32 ASCII alphanumerics, `_` or `-`, not
/// starting with `-`.
pub fn validate_group_name(group: &str) -> Result<&str, UserMgtError> {
    let invalid = |reason: &str| UserMgtError::Validation {
        kind: ValidationErrorKind::InvalidGroup {
            group: group.to_string(),
            reason: reason.to_string(),
        },
    };

    if group.is_empty() || group.len() > MAX_GROUP_LENGTH {
        return Err(invalid("must be 1-32 characters"));
    }
    if group.starts_with('-') {
        return Err(invalid("must not start with '-'"));
    }
    if !group
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("contains invalid characters"));
    }

    Ok(group)
}

/// Validate the full name stored in the passwd comment field.
///
/// May be empty. Colons would corrupt the passwd entry.
pub fn validate_fullname(fullname: &str) -> Result<&str, UserMgtError> {
    if fullname.chars().count() > MAX_FULLNAME_LENGTH {
        return Err(invalid_param(
            "fullname",
            format!("exceeds maximum length of {} characters", MAX_FULLNAME_LENGTH),
        ));
    }
    if fullname.contains(':') {
        return Err(invalid_param("fullname", "must not contain ':'"));
    }
    if fullname.chars().any(char::is_control) {
        return Err(invalid_param("fullname", "must not contain control characters"));
    }

    Ok(fullname)
}

/// Validate a login shell path.
pub fn validate_shell(shell: &str) -> Result<&str, UserMgtError> {
    if !shell.starts_with('/') {
        return Err(invalid_param("shell", "must be an absolute path"));
    }
    if Path::new(shell)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(invalid_param(
            "shell",
            "cannot contain path traversal sequences (..)",
        ));
    }
    if shell
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == ':')
    {
        return Err(invalid_param(
            "shell",
            "must not contain whitespace, control characters or ':'",
        ));
    }

    Ok(shell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_groups() {
        assert!(validate_group_name("developers").is_ok());
        assert!(validate_group_name("www-data").is_ok());
        assert!(validate_group_name("Team_2").is_ok());
    }

    #[test]
    fn test_invalid_groups() {
        assert!(validate_group_name("").is_err());
        assert!(validate_group_name(&"g".repeat(33)).is_err());
        assert!(validate_group_name("-r").is_err());
        assert!(validate_group_name("dev ops").is_err());
        assert!(validate_group_name("dev:ops").is_err());
    }

    #[test]
    fn test_fullname() {
        assert!(validate_fullname("Jane Doe").is_ok());
        assert!(validate_fullname("").is_ok());
        assert!(validate_fullname("José Ñúñez, Room 4").is_ok());
        assert!(validate_fullname("Jane:Doe").is_err());
        assert!(validate_fullname("Jane\nDoe").is_err());
        assert!(validate_fullname(&"x".repeat(257)).is_err());
    }

    #[test]
    fn test_shell() {
        assert!(validate_shell("/bin/bash").is_ok());
        assert!(validate_shell("/usr/sbin/nologin").is_ok());
        assert!(validate_shell("bash").is_err());
        assert!(validate_shell("/bin/../tmp/sh").is_err());
        assert!(validate_shell("/bin/ba sh").is_err());
        assert!(validate_shell("/bin/sh:x").is_err());
    }
}
