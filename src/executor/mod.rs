//! Command executor module.
//!
//! Handles subprocess spawning with timeouts, and the `CommandRunner`
//! seam the account operations are written against.

mod output;
mod runner;
mod subprocess;

pub use output::sanitize_output;
pub use runner::{CommandRunner, SystemRunner};
pub use subprocess::{run_command, SubprocessBuilder, SubprocessResult};
