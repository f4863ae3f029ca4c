use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request};
use serde::Serialize;

use crate::api::config::API_VERSION;
use crate::api::error::{Error, Result};
use crate::api::GitHubAPI;

const MEDIA_TYPE: &str = "application/vnd.github+json";
const HEADER_API_VERSION: &str = "x-github-api-version";

impl GitHubAPI {
    /// Builds a request for `url`, relative to the configured base URL
    ///
    /// `body`, when given, is sent as JSON. Nothing is sent over the network.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let base = &self.config.base_url;
        if !base.path().ends_with('/') {
            return Err(Error::RequestConstruction(format!(
                "base URL must have a trailing slash, but {:?} does not",
                base.as_str()
            )));
        }
        if url.chars().any(char::is_control) {
            return Err(Error::RequestConstruction(format!(
                "{:?} contains a control character",
                url
            )));
        }
        let resolved = base
            .join(url)
            .map_err(|e| Error::RequestConstruction(format!("{}: {}", url, e)))?;

        let mut rb = self
            .client
            .request(method, resolved)
            .header(ACCEPT, MEDIA_TYPE)
            .header(HEADER_API_VERSION, API_VERSION)
            .header(USER_AGENT, self.config.user_agent.as_str());
        rb = self.set_authorization_header(rb)?;

        if let Some(body) = body {
            let data = serde_json::to_vec(body)
                .map_err(|e| Error::RequestConstruction(format!("unable to encode body: {}", e)))?;
            rb = rb.header(CONTENT_TYPE, "application/json").body(data);
        }

        rb.build()
            .map_err(|e| Error::RequestConstruction(e.to_string()))
    }
}
