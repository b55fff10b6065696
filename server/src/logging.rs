//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence. Without it the `DEBUG` setting picks between
//! debug and info for this crate and `tower_http`. Production emits JSON
//! lines; other environments use the human-readable formatter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ConfigError, Environment, Settings};

pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "todo_server=debug,tower_http=debug"
    } else {
        "todo_server=info,tower_http=info"
    }
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(settings.debug).into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match settings.environment {
        Environment::Production => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        Environment::Development | Environment::Test => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Reports settings that failed to load. `main` installs a default
/// subscriber first since the real one depends on those settings.
pub fn log_config_error(error: &ConfigError) {
    tracing::error!(%error, "invalid configuration");
}
