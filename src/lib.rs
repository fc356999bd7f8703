//! usermgt library.
//!
//! Provisions and deprovisions system user accounts by driving the
//! standard account tools, and records every outcome in an append-only
//! action log.

pub mod accounts;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod operations;
pub mod validation;
