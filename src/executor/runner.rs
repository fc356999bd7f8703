//! The seam between account operations and the operating system.

use std::time::Duration;

use crate::error::UserMgtError;

use super::subprocess::{run_command, SubprocessResult};

/// Runs external programs on behalf of the account operations.
///
/// A non-zero exit is reported through `SubprocessResult`, not as an
/// error; errors mean the program could not be run to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<SubprocessResult, UserMgtError>;
}

/// Runs programs as real subprocesses.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<SubprocessResult, UserMgtError> {
        run_command(program, args, self.timeout)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<SubprocessResult, UserMgtError> {
        (**self).run(program, args)
    }
}
