//! Account tooling.
//!
//! Typed wrappers over the system administration commands that own the
//! user and group databases, plus the backup directory handling used
//! before an account is removed.

mod backup;
mod exit_codes;
mod tools;

pub use backup::{ensure_backup_dir, home_dir_exists};
pub use exit_codes::{
    describe_groupadd_exit, describe_rsync_exit, describe_useradd_exit, describe_userdel_exit,
};
pub use tools::{AccountTools, NewAccount};
