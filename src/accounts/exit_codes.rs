//! Readable messages for documented exit codes of the account tools.

/// Describe a `useradd` exit code.
pub fn describe_useradd_exit(code: Option<i32>, username: &str, group: &str) -> String {
    match code {
        Some(1) => "Cannot update password file".to_string(),
        Some(2) => "Invalid command syntax".to_string(),
        Some(3) => "Invalid argument to option".to_string(),
        Some(4) => "UID already in use".to_string(),
        Some(6) => format!("Group '{}' does not exist", group),
        Some(9) => format!("Username '{}' already in use", username),
        Some(10) => "Cannot update group file".to_string(),
        Some(12) => format!("Cannot create home directory for '{}'", username),
        Some(14) => "Cannot update SELinux user mapping".to_string(),
        _ => "Unexpected failure".to_string(),
    }
}

/// Describe a `userdel` exit code.
pub fn describe_userdel_exit(code: Option<i32>, username: &str) -> String {
    match code {
        Some(1) => "Cannot update password file".to_string(),
        Some(2) => "Invalid command syntax".to_string(),
        Some(6) => format!("User '{}' does not exist", username),
        Some(8) => format!("User '{}' is currently logged in", username),
        Some(10) => "Cannot update group file".to_string(),
        Some(12) => format!("Cannot remove home directory of '{}'", username),
        _ => "Unexpected failure".to_string(),
    }
}

/// Describe a `groupadd` exit code.
pub fn describe_groupadd_exit(code: Option<i32>, group: &str) -> String {
    match code {
        Some(2) => "Invalid command syntax".to_string(),
        Some(3) => "Invalid argument to option".to_string(),
        Some(4) => "GID already in use".to_string(),
        Some(9) => format!("Group '{}' already exists", group),
        Some(10) => "Cannot update group file".to_string(),
        _ => "Unexpected failure".to_string(),
    }
}

/// Describe an `rsync` exit code.
pub fn describe_rsync_exit(code: Option<i32>) -> String {
    match code {
        Some(1) => "Syntax or usage error".to_string(),
        Some(3) => "Errors selecting input/output files or directories".to_string(),
        Some(11) => "Error in file I/O".to_string(),
        Some(20) => "Interrupted by signal".to_string(),
        Some(23) => "Partial transfer due to error".to_string(),
        Some(24) => "Partial transfer due to vanished source files".to_string(),
        None => "Terminated by signal".to_string(),
        _ => "Unexpected failure".to_string(),
    }
}
