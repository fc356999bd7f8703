//! Configuration module for usermgt.
//!
//! Handles loading and validating settings from an optional TOML file.

mod settings;

pub use settings::*;
