//! Bearer-token lookup for the authenticated store variant.
//!
//! The store asks its `SessionProvider` for the current state before every
//! request. Anonymous deployments send no header at all; authenticated ones
//! must produce a non-empty token or the request is refused.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{CountdownError, CountdownResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The store does not require authentication.
    Anonymous,
    Authenticated(String),
    /// Authentication is required but there is no usable token.
    NotAuthenticated,
}

pub trait SessionProvider {
    fn session(&self) -> SessionState;
}

/// Provider for deployments without authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionProvider for Anonymous {
    fn session(&self) -> SessionState {
        SessionState::Anonymous
    }
}

/// A token fixed at startup (from config or the environment).
#[derive(Debug, Clone)]
pub struct StaticSession(Option<String>);

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        StaticSession(token)
    }
}

impl SessionProvider for StaticSession {
    fn session(&self) -> SessionState {
        match &self.0 {
            Some(token) => SessionState::Authenticated(token.clone()),
            None => SessionState::NotAuthenticated,
        }
    }
}

/// Contents of the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// A token persisted in a TOML file, re-read on every request so a
/// `countdown auth login` in another terminal takes effect immediately.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSession { path: path.into() }
    }

    /// `~/.config/countdown/session.toml`
    pub fn default_path() -> CountdownResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CountdownError::Config("Could not determine config directory".into()))?
            .join("countdown");

        Ok(config_dir.join("session.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, `None` if no file exists.
    pub fn load(&self) -> CountdownResult<Option<SessionData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let data = toml::from_str(&content)
            .map_err(|e| CountdownError::Session(format!("{}: {e}", self.path.display())))?;

        Ok(Some(data))
    }

    pub fn save(&self, data: &SessionData) -> CountdownResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(data).map_err(|e| CountdownError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;

        tracing::info!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Remove the session file. Returns whether one existed.
    pub fn clear(&self) -> CountdownResult<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionProvider for FileSession {
    fn session(&self) -> SessionState {
        match self.load() {
            Ok(Some(data)) if !data.is_expired() => SessionState::Authenticated(data.access_token),
            Ok(Some(_)) => {
                tracing::warn!(path = %self.path.display(), "session expired");
                SessionState::NotAuthenticated
            }
            Ok(None) => SessionState::NotAuthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session");
                SessionState::NotAuthenticated
            }
        }
    }
}

/// The provider selected by the `[auth]` config section.
#[derive(Debug, Clone)]
pub enum ConfiguredSession {
    Anonymous(Anonymous),
    Static(StaticSession),
    File(FileSession),
}

impl ConfiguredSession {
    /// Auth disabled → anonymous; a configured token wins over the session file.
    pub fn from_config(auth: &AuthConfig) -> CountdownResult<Self> {
        if !auth.enabled {
            return Ok(ConfiguredSession::Anonymous(Anonymous));
        }

        if let Some(token) = &auth.token {
            return Ok(ConfiguredSession::Static(StaticSession::new(Some(token.clone()))));
        }

        Ok(ConfiguredSession::File(FileSession::new(auth.session_path()?)))
    }
}

impl SessionProvider for ConfiguredSession {
    fn session(&self) -> SessionState {
        match self {
            ConfiguredSession::Anonymous(p) => p.session(),
            ConfiguredSession::Static(p) => p.session(),
            ConfiguredSession::File(p) => p.session(),
        }
    }
}
