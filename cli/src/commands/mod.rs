//! Command implementations for the graphcool CLI
//!
//! Each command takes its parsed arguments plus a [`SystemEnvironment`]
//! and performs all I/O through it.
//!
//! [`SystemEnvironment`]: crate::system::SystemEnvironment

pub mod export;

pub use export::*;
