use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder, RequestBuilder};

use crate::api::config::Config;
use crate::api::error::{Error, Result};

/// Module holding the API types
pub mod types;

/// Client configuration
pub mod config;

/// Error type
pub mod error;

/// Cancellation and deadlines
pub mod context;

/// Path and query string building
pub mod options;

/// Response metadata
pub mod response;

/// Request construction
pub mod request;

/// Request execution
pub mod executor;

/// Enterprise Methods
pub mod enterprise;

#[derive(Debug, Clone)]
pub(crate) struct GitHubAPI {
    client: Client,
    pub(crate) config: Config,
}

impl GitHubAPI {
    pub fn new(config: Config) -> Result<Self> {
        let client = GitHubAPI::build_client(&config)
            .build()
            .map_err(|e| Error::RequestConstruction(format!("unable to build HTTP client: {}", e)))?;
        Ok(GitHubAPI { client, config })
    }

    fn build_client(config: &Config) -> ClientBuilder {
        let builder = reqwest::Client::builder();
        match config.timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    }

    fn set_authorization_header(&self, rb: RequestBuilder) -> Result<RequestBuilder> {
        let token = match &self.config.token {
            None => return Ok(rb),
            Some(t) => t,
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::RequestConstruction("token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(rb.header(AUTHORIZATION, value))
    }
}
