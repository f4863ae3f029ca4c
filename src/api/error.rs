use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::response::Response;

/// Result alias used across the client
pub type Result<T> = std::result::Result<T, Error>;

/// Error enum for the GitHub API
#[derive(Debug, Error)]
pub enum Error {
    /// Query options or path parameters could not be encoded
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// The request could not be built (bad base URL, bad path, unserializable body)
    #[error("Request construction error: {0}")]
    RequestConstruction(String),
    /// Nothing was received from the server
    #[error("Transport error: {0}")]
    Transport(#[from] TransportCause),
    /// Headers arrived but the body could not be read
    #[error("Body read error: {cause}")]
    Body {
        /// Why the read stopped
        #[source]
        cause: TransportCause,
        /// The response the headers came with
        response: Box<Response>,
    },
    /// The server answered with a non-2xx status
    #[error(transparent)]
    Api(Box<ApiError>),
    /// A 2xx response whose body is not the expected JSON
    #[error("Decode error: {source}")]
    Decode {
        /// Underlying JSON error
        source: serde_json::Error,
        /// The response the body came with
        response: Box<Response>,
    },
}

impl Error {
    /// Response metadata, if headers were received before the failure
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api(e) => Some(&e.response),
            Error::Decode { response, .. } => Some(response),
            Error::Body { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }
}

/// Why nothing, or only the headers, arrived from the server
#[derive(Debug, Error)]
pub enum TransportCause {
    /// The context was cancelled
    #[error("context cancelled")]
    Cancelled,
    /// The context deadline passed
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    /// reqwest failed to connect, send or read
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// A non-2xx answer from the API
#[derive(Debug)]
pub struct ApiError {
    /// Response metadata (status, headers, rate limit)
    pub response: Response,
    /// Parsed error payload, when the body was JSON
    pub error: Option<ErrorResponse>,
    /// Raw body when it could not be parsed
    pub body: String,
}

impl ApiError {
    /// Status code of the failed response
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Message reported by the API, falling back to the raw body
    pub fn message(&self) -> &str {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .unwrap_or(&self.body)
    }

    /// True when GitHub refused the request because the rate limit is used up
    pub fn is_rate_limited(&self) -> bool {
        let status = self.response.status;
        (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
            && self
                .response
                .rate
                .as_ref()
                .map(|r| r.remaining == 0)
                .unwrap_or(false)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "API Error: {} {}", self.response.status, self.message())
    }
}

impl std::error::Error for ApiError {}

/// Error payload returned by GitHub on failed requests
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    pub documentation_url: Option<String>,
}

/// Single entry of [`ErrorResponse::errors`]
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub resource: Option<String>,
    pub field: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}
