//! Side-effect boundaries of a command invocation
//!
//! Commands never touch the filesystem, the console or the network endpoint
//! directly; they go through a [`SystemEnvironment`] so tests can swap in the
//! in-memory [`MemoryResolver`] and the recording [`TestOut`].

pub mod out;
pub mod resolver;

pub use out::{Out, StdOut, TestOut};
pub use resolver::{FileSystemResolver, MemoryResolver, Resolver};

use crate::constants;
use crate::error::CliError;
use std::path::PathBuf;

/// Everything a command needs from the outside world for one invocation
pub struct SystemEnvironment {
    pub resolver: Box<dyn Resolver>,
    pub out: Box<dyn Out>,
    /// System API endpoint the export request is sent to
    pub endpoint: String,
    /// Location of the auth config file
    pub config_path: PathBuf,
}

impl SystemEnvironment {
    pub fn new(resolver: impl Resolver + 'static, out: impl Out + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            out: Box::new(out),
            endpoint: constants::system_api_endpoint(),
            config_path: constants::config_file_path(),
        }
    }

    /// Real filesystem rooted at the working directory, console output
    pub fn from_process() -> Result<Self, CliError> {
        Ok(Self::new(FileSystemResolver::current_dir()?, StdOut))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }
}
