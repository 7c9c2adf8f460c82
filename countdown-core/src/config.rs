//! Countdown configuration.
//!
//! Lives at `~/.config/countdown/config.toml`. Any key can be overridden
//! from the environment with a `COUNTDOWN_` prefix, using `__` for nested
//! keys (e.g. `COUNTDOWN_AUTH__TOKEN`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};

use crate::error::{CountdownError, CountdownResult};
use crate::view_model::DisplayOptions;

static DEFAULT_API_BASE: &str = "https://m2fptvl5ai.execute-api.us-east-1.amazonaws.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Base URL of the events API; `/events` is appended.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub display: DisplayOptions,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        CountdownConfig {
            api_base: default_api_base(),
            request_timeout_secs: default_timeout_secs(),
            auth: AuthConfig::default(),
            display: DisplayOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Send `Authorization: Bearer <token>` with every request.
    #[serde(default)]
    pub enabled: bool,

    /// Fixed token. Takes precedence over the session file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl AuthConfig {
    /// Session file path with `~` expanded, falling back to the default location.
    pub fn session_path(&self) -> CountdownResult<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(PathBuf::from(
                shellexpand::tilde(&path.to_string_lossy()).into_owned(),
            )),
            None => crate::session::FileSession::default_path(),
        }
    }
}

impl CountdownConfig {
    pub fn config_path() -> CountdownResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CountdownError::Config("Could not determine config directory".into()))?
            .join("countdown");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, writing a commented default file first
    /// if none exists.
    pub fn load() -> CountdownResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CountdownResult<Self> {
        Self::load_with_env(path, None)
    }

    /// `env` replaces the process environment when given.
    fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> CountdownResult<Self> {
        let config: CountdownConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("COUNTDOWN")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(|e| CountdownError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CountdownError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), api_base = %config.api_base, "loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CountdownResult<()> {
        let contents = format!(
            "\
# countdown configuration

# Events API:
# api_base = \"{DEFAULT_API_BASE}\"
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Bearer-token authentication:
# [auth]
# enabled = true
# token = \"...\"
# session_file = \"~/.config/countdown/session.toml\"

# Display (\"random\" or \"stable\"; days_left is \"server\" or \"local\"):
# [display]
# colors = \"random\"
# emoji_fallback = \"random\"
# days_left = \"server\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CountdownError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CountdownError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
