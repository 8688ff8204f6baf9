//! Local auth config (`~/.graphcool`)

use crate::error::CliError;
use crate::system::Resolver;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    /// Load the config file, which must exist before any backend call.
    pub fn load(resolver: &dyn Resolver, path: &Path) -> Result<Self, CliError> {
        if !resolver.exists(path) {
            return Err(CliError::NotAuthenticated {
                path: path.to_path_buf(),
            });
        }

        let content = resolver.read(path)?;
        let config: AuthConfig = serde_json::from_str(&content).map_err(|e| {
            CliError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!(
            "Loaded config from {} (token present: {})",
            path.display(),
            config.bearer_token().is_some()
        );
        Ok(config)
    }

    /// Token to send, `None` when the config holds an empty one
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}
