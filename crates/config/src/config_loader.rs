use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, info, warn};

use app_error::{AppError, AppResult};

/// Complete application configuration loaded from JSON file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub database: DatabasesConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabasesConfig {
    pub content_db: SurrealDbConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SurrealDbConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub pool: DbPoolConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DbPoolConfig {
    pub size: usize,
    pub connection_timeout: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeouts: ServerTimeouts,
    pub body_limit: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerTimeouts {
    pub read: u64,
    pub write: u64,
    pub idle: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SecurityConfig {
    pub cors: CorsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitoringConfig {
    pub sentry: SentryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SentryConfig {
    pub dsn: String,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
    pub environment: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub hide_secrets: bool,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        debug!("Configuration loaded from file");
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load() -> AppResult<Self> {
        let config_content =
            std::str::from_utf8(include_bytes!("../res/app-config.json")).expect("Invalid UTF-8");

        // Try to load the config from file
        let config = match serde_json::from_str::<AppConfig>(config_content) {
            Ok(conf) => {
                info!("Loaded configuration from: {:?}", conf.environment);
                conf
            }
            Err(e) => {
                warn!(
                    "Failed to load config file: {}. Using default configuration.",
                    e
                );
                Self::default()
            }
        };

        // Validate the config
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        let is_production = self.environment == "production";

        self.validate_database_config(
            &self.database.content_db,
            "content_db",
            is_production,
            &mut errors,
        );

        // Validate server configuration
        if self.server.host.trim().is_empty() {
            errors.push("Server host cannot be empty".to_string());
        }

        if self.server.port == 0 {
            errors.push("Server port cannot be 0".to_string());
        }

        if self.server.body_limit == 0 {
            errors.push("Server body limit cannot be 0".to_string());
        }

        // Validate monitoring configuration
        if is_production && self.monitoring.sentry.dsn.trim().is_empty() {
            errors.push("Sentry DSN should be configured in production".to_string());
        }

        if !errors.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Invalid configuration: {}",
                errors.join(", ")
            )));
        }
        Ok(())
    }

    /// Helper function to validate individual database configs
    fn validate_database_config(
        &self,
        db_config: &SurrealDbConfig,
        db_name: &str,
        is_production: bool,
        errors: &mut Vec<String>,
    ) {
        // Endpoint validation
        if db_config.endpoint.trim().is_empty() {
            errors.push(format!("{} endpoint cannot be empty", db_name));
        } else if is_production
            && !db_config.endpoint.starts_with("wss://")
            && !db_config.endpoint.contains("memory")
        {
            errors.push(format!(
                "{} should use a secure 'wss://' database connection in production",
                db_name
            ));
        }

        // Namespace validation
        if db_config.namespace.trim().is_empty() {
            errors.push(format!("{} namespace cannot be empty", db_name));
        }

        // Database name validation
        if db_config.database.trim().is_empty() {
            errors.push(format!("{} database name cannot be empty", db_name));
        }

        // Pool validation
        if db_config.pool.size == 0 {
            errors.push(format!("{} pool size must be greater than 0", db_name));
        }

        // Credentials validation in production
        if is_production {
            if db_config.username == "root" {
                errors.push(format!(
                    "Using default 'root' username in {} in production is insecure",
                    db_name
                ));
            }

            if db_config.password == "root" {
                errors.push(format!(
                    "Using default 'root' password in {} in production is insecure",
                    db_name
                ));
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database: DatabasesConfig {
                content_db: SurrealDbConfig {
                    endpoint: "ws://localhost:8000".to_string(),
                    username: "root".to_string(),
                    password: "root".to_string(),
                    namespace: "contentDb".to_string(),
                    database: "blogEngine".to_string(),
                    pool: DbPoolConfig {
                        size: 5,
                        connection_timeout: 5000,
                    },
                },
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                timeouts: ServerTimeouts {
                    read: 30000,
                    write: 30000,
                    idle: 60000,
                    keep_alive: 15000,
                },
                body_limit: 1048576, // 1MB
            },
            security: SecurityConfig {
                cors: CorsConfig {
                    allowed_origins: vec!["*".to_string()],
                    allowed_methods: vec![
                        "GET".to_string(),
                        "POST".to_string(),
                        "OPTIONS".to_string(),
                    ],
                    allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
                },
            },
            monitoring: MonitoringConfig {
                sentry: SentryConfig {
                    dsn: "".to_string(),
                    sample_rate: 1.0,
                    traces_sample_rate: 0.2,
                    environment: "development".to_string(),
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                    format: "json".to_string(),
                    hide_secrets: true,
                },
            },
        }
    }
}
