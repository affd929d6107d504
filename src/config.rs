//! Configuration module for folio.

use serde::Deserialize;
use std::path::Path;

use crate::{FolioError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the built frontend as static files.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
    /// Rate limit for the login endpoint (requests per minute).
    #[serde(default = "default_login_rate_limit")]
    pub login_rate_limit: u32,
    /// Rate limit for public API endpoints (requests per minute).
    #[serde(default = "default_api_rate_limit")]
    pub api_rate_limit: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_path() -> String {
    "web/dist".to_string()
}

fn default_login_rate_limit() -> u32 {
    5 // 5 requests per minute
}

fn default_api_rate_limit() -> u32 {
    100 // 100 requests per minute
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            serve_static: false,
            static_path: default_static_path(),
            login_rate_limit: default_login_rate_limit(),
            api_rate_limit: default_api_rate_limit(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/folio.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiry in days.
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry_days: u64,
    /// Email for the admin account created on first startup.
    #[serde(default = "default_admin_email")]
    pub default_admin_email: String,
    /// Password for the admin account created on first startup.
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
}

fn default_access_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_expiry() -> u64 {
    7 // 7 days
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_admin_password() -> String {
    "changeme123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_expiry_secs: default_access_expiry(),
            refresh_token_expiry_days: default_refresh_expiry(),
            default_admin_email: default_admin_email(),
            default_admin_password: default_admin_password(),
        }
    }
}

/// SMTP configuration for the credential notification mail.
///
/// `username`, `password`, `from_address` and `backup_address` have no
/// usable defaults and are checked by [`Config::validate`] at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// SMTP authentication username.
    #[serde(default)]
    pub username: String,
    /// SMTP authentication password.
    #[serde(default)]
    pub password: String,
    /// Sender address for outbound mail.
    #[serde(default)]
    pub from_address: String,
    /// Backup address that receives credential notifications.
    #[serde(default)]
    pub backup_address: String,
    /// Send timeout in seconds.
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    30
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::new(),
            backup_address: String::new(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file (empty disables file logging).
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/folio.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// SMTP configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FolioError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FolioError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FOLIO_JWT_SECRET`: Override the JWT secret key
    /// - `FOLIO_SMTP_USERNAME`: Override the SMTP username
    /// - `FOLIO_SMTP_PASSWORD`: Override the SMTP password
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("FOLIO_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
        if let Ok(username) = std::env::var("FOLIO_SMTP_USERNAME") {
            if !username.is_empty() {
                self.smtp.username = username;
            }
        }
        if let Ok(password) = std::env::var("FOLIO_SMTP_PASSWORD") {
            if !password.is_empty() {
                self.smtp.password = password;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the JWT secret is not set
    /// - any of the four SMTP values required for credential notifications
    ///   (username, password, from_address, backup_address) is missing
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(FolioError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via the FOLIO_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        let missing: Vec<&str> = [
            ("smtp.username", &self.smtp.username),
            ("smtp.password", &self.smtp.password),
            ("smtp.from_address", &self.smtp.from_address),
            ("smtp.backup_address", &self.smtp.backup_address),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();
        if !missing.is_empty() {
            return Err(FolioError::Config(format!(
                "credential notifications require {} to be set in config.toml",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.cors_origins.is_empty());
        assert!(!config.server.serve_static);
        assert_eq!(config.server.static_path, "web/dist");
        assert_eq!(config.server.login_rate_limit, 5);
        assert_eq!(config.server.api_rate_limit, 100);

        assert_eq!(config.database.path, "data/folio.db");

        assert!(config.auth.jwt_secret.is_empty());
        assert_eq!(config.auth.access_token_expiry_secs, 900);
        assert_eq!(config.auth.refresh_token_expiry_days, 7);
        assert_eq!(config.auth.default_admin_email, "admin@example.com");
        assert_eq!(config.auth.default_admin_password, "changeme123");

        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert!(config.smtp.username.is_empty());
        assert!(config.smtp.password.is_empty());
        assert!(config.smtp.from_address.is_empty());
        assert!(config.smtp.backup_address.is_empty());
        assert_eq!(config.smtp.timeout_secs, 30);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/folio.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:3000", "http://localhost:5173"]
serve_static = true
static_path = "public"
login_rate_limit = 10
api_rate_limit = 60

[database]
path = "custom/db.sqlite"

[auth]
jwt_secret = "test-secret-key"
access_token_expiry_secs = 600
refresh_token_expiry_days = 14
default_admin_email = "owner@example.com"
default_admin_password = "first-password"

[smtp]
host = "smtp.example.com"
port = 2525
username = "mailer@example.com"
password = "app-password"
from_address = "portfolio@example.com"
backup_address = "backup@example.com"
timeout_secs = 10

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.server.cors_origins[0], "http://localhost:3000");
        assert_eq!(config.server.cors_origins[1], "http://localhost:5173");
        assert!(config.server.serve_static);
        assert_eq!(config.server.static_path, "public");
        assert_eq!(config.server.login_rate_limit, 10);
        assert_eq!(config.server.api_rate_limit, 60);

        assert_eq!(config.database.path, "custom/db.sqlite");

        assert_eq!(config.auth.jwt_secret, "test-secret-key");
        assert_eq!(config.auth.access_token_expiry_secs, 600);
        assert_eq!(config.auth.refresh_token_expiry_days, 14);
        assert_eq!(config.auth.default_admin_email, "owner@example.com");
        assert_eq!(config.auth.default_admin_password, "first-password");

        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.username, "mailer@example.com");
        assert_eq!(config.smtp.password, "app-password");
        assert_eq!(config.smtp.from_address, "portfolio@example.com");
        assert_eq!(config.smtp.backup_address, "backup@example.com");
        assert_eq!(config.smtp.timeout_secs, 10);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000

[auth]
jwt_secret = "partial-secret"
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_secret, "partial-secret");

        // Default values
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/folio.db");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.auth.access_token_expiry_secs, 900);
    }

    #[test]
    fn test_parse_empty_config() {
        let toml = "";
        let config = Config::parse(toml).unwrap();

        // All defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/folio.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let toml = "this is not valid toml [[[";
        let result = Config::parse(toml);

        assert!(result.is_err());
        if let Err(FolioError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(FolioError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_jwt_secret() {
        // Save original value if exists
        let original = std::env::var("FOLIO_JWT_SECRET").ok();

        // Set env var
        std::env::set_var("FOLIO_JWT_SECRET", "env-secret-key");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.auth.jwt_secret, "env-secret-key");

        // Restore original
        if let Some(val) = original {
            std::env::set_var("FOLIO_JWT_SECRET", val);
        } else {
            std::env::remove_var("FOLIO_JWT_SECRET");
        }
    }

    #[test]
    fn test_apply_env_overrides_smtp_credentials() {
        let original_user = std::env::var("FOLIO_SMTP_USERNAME").ok();
        let original_pass = std::env::var("FOLIO_SMTP_PASSWORD").ok();

        std::env::set_var("FOLIO_SMTP_USERNAME", "env-user@example.com");
        std::env::set_var("FOLIO_SMTP_PASSWORD", "env-app-password");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.smtp.username, "env-user@example.com");
        assert_eq!(config.smtp.password, "env-app-password");

        if let Some(val) = original_user {
            std::env::set_var("FOLIO_SMTP_USERNAME", val);
        } else {
            std::env::remove_var("FOLIO_SMTP_USERNAME");
        }
        if let Some(val) = original_pass {
            std::env::set_var("FOLIO_SMTP_PASSWORD", val);
        } else {
            std::env::remove_var("FOLIO_SMTP_PASSWORD");
        }
    }

    #[test]
    fn test_apply_env_overrides_empty_value() {
        // Save original value if exists
        let original = std::env::var("FOLIO_JWT_SECRET").ok();

        // Set empty env var
        std::env::set_var("FOLIO_JWT_SECRET", "");

        let mut config = Config::default();
        config.auth.jwt_secret = "original-secret".to_string();
        config.apply_env_overrides();

        // Should not override with empty string
        assert_eq!(config.auth.jwt_secret, "original-secret");

        // Restore original
        if let Some(val) = original {
            std::env::set_var("FOLIO_JWT_SECRET", val);
        } else {
            std::env::remove_var("FOLIO_JWT_SECRET");
        }
    }

    fn filled_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        config.smtp.username = "user@example.com".to_string();
        config.smtp.password = "app-password".to_string();
        config.smtp.from_address = "portfolio@example.com".to_string();
        config.smtp.backup_address = "backup@example.com".to_string();
        config
    }

    #[test]
    fn test_validate_no_jwt_secret() {
        let mut config = filled_config();
        config.auth.jwt_secret = String::new();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(FolioError::Config(msg)) = result {
            assert!(msg.contains("jwt_secret"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_missing_smtp_values() {
        let mut config = filled_config();
        config.smtp.password = String::new();
        config.smtp.backup_address = String::new();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(FolioError::Config(msg)) = result {
            assert!(msg.contains("smtp.password"));
            assert!(msg.contains("smtp.backup_address"));
            assert!(!msg.contains("smtp.username"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_complete() {
        let config = filled_config();
        assert!(config.validate().is_ok());
    }
}
