use app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

mod config_loader;
pub use config_loader::*;

/// The configuration system uses JSON configuration files with an embedded
/// default and doesn't rely on environment variables.
///
/// This module provides the core configuration types and loading functions.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub port: u16,
    pub address: String,
}

impl Server {
    pub fn new(address: String, port: u16) -> Self {
        Self { port, address }
    }

    // Validate server configuration
    pub fn validate(&self) -> AppResult<()> {
        // Validate port
        if self.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Invalid server port: '0' is not a valid port number"
            )));
        }

        // Validate address (basic check)
        if self.address.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Server address cannot be empty"
            )));
        }

        Ok(())
    }
}

/// Converts from the full AppConfig to the listener Server view
impl From<&AppConfig> for Server {
    fn from(config: &AppConfig) -> Self {
        Self {
            port: config.server.port,
            address: config.server.host.clone(),
        }
    }
}
