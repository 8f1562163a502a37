//! Client configuration: API root, access token and user agent.
//!
//! The token is fixed for the lifetime of a `MootaClient`; create a new client
//! to switch accounts.

use crate::error::{MootaError, Result};

pub const DEFAULT_BASE_URL: &str = "https://app.moota.co/api";
pub const DEFAULT_USER_AGENT: &str = "Moota/2.0";

pub const ENV_ACCESS_TOKEN: &str = "MOOTA_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "MOOTA_BASE_URL";
pub const ENV_USER_AGENT: &str = "MOOTA_USER_AGENT";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    access_token: String,
    user_agent: String,
}

// Keep the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    /// Build a config around an explicit token.
    ///
    /// The token is not validated here: an empty one is sent as is and the
    /// server answers 401 with `Unauthenticated.`. [`Config::from_env`] is
    /// stricter because an unset or blank variable is a deployment mistake
    /// that should fail before any request goes out.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read `MOOTA_ACCESS_TOKEN` (required), `MOOTA_BASE_URL` and
    /// `MOOTA_USER_AGENT` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_ACCESS_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| MootaError::Config(format!("{ENV_ACCESS_TOKEN} is not set")))?;

        let mut config = Config::new(token);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            config = config.with_base_url(&base_url);
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT).filter(|v| !v.is_empty()) {
            config = config.with_user_agent(user_agent);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
