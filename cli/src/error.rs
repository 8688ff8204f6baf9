use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the graphcool CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// More than one project file found and nothing explicit to choose between them
    #[error(
        "Found more than one project file: {}. Pass --project-file or --project-id to choose one.",
        .candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    AmbiguousProjectSource { candidates: Vec<PathBuf> },

    /// No project id and no project file, or the given project file does not exist
    #[error("{}", no_project_message(.path.as_deref()))]
    NoProjectSource { path: Option<PathBuf> },

    /// Project file exists but holds no usable project id
    #[error("Malformed project file {}: {reason}", .path.display())]
    MalformedDescriptor { path: PathBuf, reason: String },

    /// The config file with the auth token is missing
    #[error("Not authenticated: no config file at {}", .path.display())]
    NotAuthenticated { path: PathBuf },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-success response or transport failure talking to the system API
    #[error("Backend request failed: {0}")]
    BackendRequestFailed(String),

    /// Payload encoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::NotAuthenticated { .. } => 2,
            CliError::Io(_) => 3,
            CliError::AmbiguousProjectSource { .. }
            | CliError::NoProjectSource { .. }
            | CliError::MalformedDescriptor { .. } => 4,
            CliError::BackendRequestFailed(_) => 7,
            CliError::Serialization(_) | CliError::Other(_) => 1,
        }
    }

    pub fn malformed<S: Into<String>>(path: impl Into<PathBuf>, reason: S) -> Self {
        CliError::MalformedDescriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn no_project_message(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("Project file {} does not exist", path.display()),
        None => "No project found. Pass --project-id or --project-file, or run inside a project directory."
            .to_string(),
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}
