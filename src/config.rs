//! Configuration module
//!
//! This module handles loading resolve-pr configuration from TOML files.

pub mod loader;
pub mod schema;

pub use schema::{ApiConfig, BehaviorConfig, Config, OutputConfig, OutputFormat};
