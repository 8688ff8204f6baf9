//! Conventional names, paths and endpoints shared by all commands

use std::path::PathBuf;

/// Default name of the project descriptor file in a project directory
pub const PROJECT_FILE_NAME: &str = "project.graphcool";

/// Extension shared by all project descriptor files
pub const PROJECT_FILE_EXTENSION: &str = "graphcool";

/// Name of the config file in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".graphcool";

/// System API used for project-level operations
pub const SYSTEM_API_ENDPOINT: &str = "https://api.graph.cool/system";

/// Environment variable replacing [`SYSTEM_API_ENDPOINT`]
pub const SYSTEM_API_ENDPOINT_ENV: &str = "GRAPHCOOL_SYSTEM_API";

/// Path of the config file holding the auth token.
///
/// Falls back to a relative path when no home directory can be determined.
pub fn config_file_path() -> PathBuf {
    home::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// System API endpoint, honouring the environment override
pub fn system_api_endpoint() -> String {
    std::env::var(SYSTEM_API_ENDPOINT_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| SYSTEM_API_ENDPOINT.to_string())
}
