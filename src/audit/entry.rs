//! Action log entry types.

use std::fmt;

/// The action tag that starts every log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreateUser,
    ErrorCreateUser,
    DeleteUser,
    ErrorDeleteUser,
}

impl AuditAction {
    /// The tag as written to the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "CREATE_USER",
            Self::ErrorCreateUser => "ERROR_CREATE_USER",
            Self::DeleteUser => "DELETE_USER",
            Self::ErrorDeleteUser => "ERROR_DELETE_USER",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorCreateUser | Self::ErrorDeleteUser)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single action log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub details: String,
}

impl AuditEntry {
    /// Create an entry. Line breaks in `details` are flattened so the
    /// entry always occupies exactly one line.
    pub fn new(action: AuditAction, details: impl Into<String>) -> Self {
        let details: String = details.into();
        let details = if details.contains(['\n', '\r']) {
            details
                .split(['\n', '\r'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            details
        };
        Self { action, details }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.action, self.details)
    }
}
