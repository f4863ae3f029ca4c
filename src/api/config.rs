use std::env;
use std::time::Duration;

use log::warn;
use url::Url;

use crate::api::error::{Error, Result};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// REST API version sent with every request
pub const API_VERSION: &str = "2022-11-28";

const DEFAULT_USER_AGENT: &str = concat!("gh-enterprise-api/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) base_url: Url,
    pub(crate) token: Option<String>,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Creates the default configuration (public GitHub, anonymous)
    pub fn new() -> Self {
        Config::default()
    }

    /// Reads `GITHUB_API_URL` and `GITHUB_TOKEN` from the environment
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Ok(url) = env::var("GITHUB_API_URL") {
            config = config.base_url(&url)?;
        }
        match env::var("GITHUB_TOKEN") {
            Ok(token) if !token.is_empty() => config.token = Some(token),
            _ => warn!("GITHUB_TOKEN not set, requests will be anonymous"),
        }
        Ok(config)
    }

    /// Sets the API base URL
    ///
    /// A missing trailing slash is added, so that relative paths resolve
    /// below the given prefix (e.g. `https://ghe.example.com/api/v3`).
    pub fn base_url(mut self, url: &str) -> Result<Self> {
        let mut parsed =
            Url::parse(url).map_err(|e| Error::RequestConstruction(format!("{}: {}", url, e)))?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        self.base_url = parsed;
        Ok(self)
    }

    /// Sets the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a transport-level timeout applied to every request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured base URL
    pub fn get_base_url(&self) -> &Url {
        &self.base_url
    }
}
