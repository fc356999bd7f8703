//! Input validation module.
//!
//! Arguments end up in `useradd`/`groupadd` argument vectors and in the
//! colon-separated passwd and group files, so they are checked first.

mod account;
mod username;

pub use account::{validate_fullname, validate_group_name, validate_shell};
pub use username::{validate_existing_username, validate_system_username};
