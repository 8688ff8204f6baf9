//! graphcool command line interface
//!
//! The binary lives in `main.rs`; everything else is exposed here so the
//! integration tests can drive commands against in-memory storage.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod project_file;
pub mod resolve;
pub mod system;

pub use error::CliError;
pub use system::SystemEnvironment;
