//! Application configuration, read from the environment.
//!
//! `.env` files are honoured through `dotenvy`; parsing itself takes a lookup
//! closure so tests never touch the process environment.

use std::env::VarError;
use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use storefront_observability::{LogFormat, LogSettings};

/// Password used when `STOREFRONT_ADMIN_PASSWORD` is unset outside production.
pub const DEV_ADMIN_PASSWORD: &str = "server48admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    MissingEnvVar(String),

    #[error("invalid value for `{var}`: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub log_format: LogFormat,
    /// JSON catalog file; products and slides live in memory when absent.
    pub catalog_path: Option<PathBuf>,
    pub seed_demo_data: bool,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub session_ttl_minutes: u32,
}

impl AppConfig {
    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            default_filter: self.log_level.clone(),
            format: self.log_format,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(i64::from(self.session_ttl_minutes))
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("catalog_path", &self.catalog_path)
            .field("seed_demo_data", &self.seed_demo_data)
            .field("admin_name", &self.admin_name)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[redacted]")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

/// Load configuration, reading a `.env` file first if one exists.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load configuration from the process environment only.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                other => Err(invalid(var, format!("expected a boolean, got `{other}`"))),
            },
            Err(_) => Ok(default),
        }
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"));
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let log_format = or_default("STOREFRONT_LOG_FORMAT", "json")
        .parse::<LogFormat>()
        .map_err(|e| invalid("STOREFRONT_LOG_FORMAT", e))?;

    let catalog_path = lookup("STOREFRONT_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let seed_demo_data = parse_bool("STOREFRONT_SEED_DEMO_DATA", !env.is_production())?;

    let admin_name = or_default("STOREFRONT_ADMIN_NAME", "SERVER48 Admin");
    let admin_email = or_default("STOREFRONT_ADMIN_EMAIL", "admin@server48.id");
    let admin_password = match lookup("STOREFRONT_ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ if env.is_production() => {
            return Err(ConfigError::MissingEnvVar(
                "STOREFRONT_ADMIN_PASSWORD".to_string(),
            ));
        }
        _ => DEV_ADMIN_PASSWORD.to_string(),
    };

    let session_ttl_minutes = or_default("STOREFRONT_SESSION_TTL_MINUTES", "480")
        .parse::<u32>()
        .map_err(|e| invalid("STOREFRONT_SESSION_TTL_MINUTES", e.to_string()))?;
    if session_ttl_minutes == 0 {
        return Err(invalid(
            "STOREFRONT_SESSION_TTL_MINUTES",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        log_format,
        catalog_path,
        seed_demo_data,
        admin_name,
        admin_email,
        admin_password,
        session_ttl_minutes,
    })
}

/// Unrecognized values fall back to development.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
