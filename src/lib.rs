#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

//! # GitHub Enterprise API
//!
//! A minimal asynchronous interface to the GitHub Enterprise license API
//!
//! ## Current functionality
//!  - List consumed licenses of an enterprise
//!  - Rate limit and pagination metadata on every response
//!  - Cancellation and deadlines through [`Context`]

use log::debug;

use crate::api::GitHubAPI;

pub use crate::api::config::Config;
pub use crate::api::context::Context;
pub use crate::api::error::{ApiError, Error, ErrorResponse, Result, TransportCause};
pub use crate::api::options::ListOptions;
pub use crate::api::response::{Rate, Response};
pub use crate::api::types::license::{EnterpriseConsumedLicense, EnterpriseConsumedLicenseUser};

/// Module for authenticated API communication
pub mod api;

/// Struct to manage the communication with the GitHub API
///
/// Cheap to clone, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GitHub {
    gh: GitHubAPI,
}

impl GitHub {
    /// Creates a client from `config`
    pub fn new(config: Config) -> Result<Self> {
        debug!("Using GitHub API at {}", config.get_base_url());
        Ok(GitHub {
            gh: GitHubAPI::new(config)?,
        })
    }

    /// Creates a client configured from `GITHUB_API_URL` and `GITHUB_TOKEN`
    pub fn from_env() -> Result<Self> {
        GitHub::new(Config::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.gh.config
    }

    /// Lists license consumption for all users of `enterprise`, connected servers included
    ///
    /// `opts` selects the page, absent fields are not sent.
    pub async fn list_consumed_licenses(
        &self,
        ctx: &Context,
        enterprise: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(EnterpriseConsumedLicense, Response)> {
        self.gh.list_consumed_licenses(ctx, enterprise, opts).await
    }
}
