//! # keystash-core
//!
//! Configuration and utilities shared by the keystash crates:
//!
//! - **Configuration**: loading, validation, and persistence of the JSON5 config file
//! - **Paths**: resolution of the keystash home directory
//! - **Environment**: typed access to `KEYSTASH_*` variables

pub mod config;
pub mod env;
pub mod error;
pub mod paths;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
