//! Provider configuration
//!
//! Connection settings for the GitLab API, loaded from a YAML or JSON file
//! and overlaid with environment variables.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";

/// Header GitLab reads personal access tokens from
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Connection settings for the GitLab API
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API root, including the `/api/v4/` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal, project or group access token
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://gitlab.com/api/v4/".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("gitlab-variable-provider/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl ProviderConfig {
    /// Parse a config document. YAML is a superset of JSON so both work.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Overlay `GITLAB_TOKEN` and `GITLAB_BASE_URL` from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary environment lookup
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Check that the config can be used to talk to GitLab
    pub fn validate(&self) -> Result<()> {
        if self.token.as_deref().map_or(true, str::is_empty) {
            return Err(Error::missing_config_field("token"));
        }
        url::Url::parse(&self.base_url)?;
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than zero"));
        }
        Ok(())
    }

    /// Build the HTTP client configuration for these settings
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        self.validate()?;
        let token = self
            .token
            .clone()
            .ok_or_else(|| Error::missing_config_field("token"))?;

        Ok(HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(&self.user_agent)
            .header(TOKEN_HEADER, token)
            .build())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
