//! Account operations.
//!
//! Each operation is an existence check, an action and a log entry.
//! Failures of any kind are reported and logged by `UserManager`; only a
//! failure to write the log or the terminal escapes it.
//!
//! ## Adding a New Operation
//!
//! 1. Create a new file implementing the `Operation` trait
//! 2. Add an entry point on `UserManager` that calls `perform`

mod context;
mod create;
mod delete;
mod manager;
mod traits;

pub use context::{Completed, OperationContext};
pub use create::CreateUser;
pub use delete::DeleteUser;
pub use manager::{OperationReport, UserManager};
pub use traits::Operation;
