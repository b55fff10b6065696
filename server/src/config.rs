//! Process settings, read from environment variables.
//!
//! `main` calls `dotenvy::dotenv()` first, so a `.env` file in the working
//! directory feeds the same variables. Names are case-sensitive:
//!
//! - `PROJECT_NAME`, `PROJECT_DESCRIPTION`, `VERSION`: API documentation metadata
//! - `API_PREFIX`: path prefix for every route (default `/api`)
//! - `ENV`: `development` (default) | `test` | `production`
//! - `DEBUG`: verbose logging (default `true`)
//! - `HOST`, `PORT`: bind address (default `127.0.0.1:8000`)

use std::{collections::HashMap, fmt, str::FromStr};

use thiserror::Error;

pub const DEFAULT_PROJECT_NAME: &str = "Todo API";
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "A todo CRUD web service";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("ENV must be one of development, test, production; got {0:?}")]
    InvalidEnvironment(String),

    #[error("{key} must be a boolean; got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("PORT must be an integer between 0 and 65535; got {0:?}")]
    InvalidPort(String),

    #[error("API_PREFIX must be empty or start with '/'; got {0:?}")]
    InvalidApiPrefix(String),
}

/// Deployment environment named by `ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_name: String,
    pub project_description: String,
    pub version: String,
    /// Either empty or `/segment[/segment...]`, never with a trailing slash.
    pub api_prefix: String,
    pub environment: Environment,
    pub debug: bool,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            project_description: DEFAULT_PROJECT_DESCRIPTION.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            environment: Environment::default(),
            debug: true,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment. Non-UTF-8 entries are
    /// skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Builds settings from arbitrary key/value pairs; unset keys keep their
    /// defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let mut settings = Settings::default();

        if let Some(value) = vars.remove("PROJECT_NAME") {
            settings.project_name = value;
        }
        if let Some(value) = vars.remove("PROJECT_DESCRIPTION") {
            settings.project_description = value;
        }
        if let Some(value) = vars.remove("VERSION") {
            settings.version = value;
        }
        if let Some(value) = vars.remove("API_PREFIX") {
            settings.api_prefix = normalize_prefix(&value)?;
        }
        if let Some(value) = vars.remove("ENV") {
            settings.environment = value.parse()?;
        }
        if let Some(value) = vars.remove("DEBUG") {
            settings.debug = parse_bool("DEBUG", &value)?;
        }
        if let Some(value) = vars.remove("HOST") {
            settings.host = value;
        }
        if let Some(value) = vars.remove("PORT") {
            settings.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?;
        }

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn normalize_prefix(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidApiPrefix(value.to_string()))
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
