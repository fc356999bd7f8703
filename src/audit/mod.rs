//! Action log module.
//!
//! Every operation outcome is appended to a plain text log as one
//! `ACTION: details` line. The file is only ever appended to.

mod entry;
mod logger;

pub use entry::{AuditAction, AuditEntry};
pub use logger::AuditLogger;
