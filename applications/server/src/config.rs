/// Server configuration
use crate::{
    error::{Result, ServerError},
    services::auth::{MAX_ACCESS_TOKEN_HOURS, MAX_REFRESH_TOKEN_DAYS},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

impl ServerConfig {
    /// Load configuration, reading `path` instead of `config.toml` when given.
    ///
    /// Environment variables prefixed with `SPENDWISE_` override the file;
    /// nested keys use `__`, e.g. `SPENDWISE_AUTH__JWT_SECRET`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SPENDWISE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set SPENDWISE_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if !(1..=MAX_ACCESS_TOKEN_HOURS).contains(&self.auth.jwt_expiration_hours) {
            return Err(ServerError::Config(format!(
                "auth.jwt_expiration_hours must be between 1 and {MAX_ACCESS_TOKEN_HOURS}"
            )));
        }

        if !(1..=MAX_REFRESH_TOKEN_DAYS).contains(&self.auth.jwt_refresh_expiration_days) {
            return Err(ServerError::Config(format!(
                "auth.jwt_refresh_expiration_days must be between 1 and {MAX_REFRESH_TOKEN_DAYS}"
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/spendwise.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fail_validation_without_secret() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 5000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_expiration_is_rejected() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config.auth.jwt_expiration_hours = 0;
        assert!(config.validate().is_err());

        config.auth.jwt_expiration_hours = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_lifetimes_are_rejected() {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();

        config.auth.jwt_expiration_hours = u64::MAX;
        assert!(config.validate().is_err());
        config.auth.jwt_expiration_hours = MAX_ACCESS_TOKEN_HOURS;
        assert!(config.validate().is_ok());

        config.auth.jwt_refresh_expiration_days = MAX_REFRESH_TOKEN_DAYS + 1;
        assert!(config.validate().is_err());
        config.auth.jwt_refresh_expiration_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_fills_missing_sections_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[auth]\njwt_secret = \"from-file\"\n"
        )
        .unwrap();

        let config = ServerConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.auth.jwt_expiration_hours, 24);
        assert_eq!(config.storage.database_url, "sqlite://./data/spendwise.db");
    }
}
