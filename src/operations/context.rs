//! State handed to an executing operation.

use std::io::Write;

use crate::accounts::AccountTools;
use crate::config::Settings;
use crate::error::UserMgtResult;

/// What an operation hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    /// Line printed for the user.
    pub message: String,
    /// Details written to the action log.
    pub details: String,
}

/// Tools, settings and the output stream for one operation.
pub struct OperationContext<'a, R, W> {
    pub tools: &'a AccountTools<R>,
    pub settings: &'a Settings,
    out: &'a mut W,
}

impl<'a, R, W: Write> OperationContext<'a, R, W> {
    pub fn new(tools: &'a AccountTools<R>, settings: &'a Settings, out: &'a mut W) -> Self {
        Self {
            tools,
            settings,
            out,
        }
    }

    /// Print a progress line.
    pub fn say(&mut self, message: impl AsRef<str>) -> UserMgtResult<()> {
        writeln!(self.out, "{}", message.as_ref())?;
        Ok(())
    }
}
