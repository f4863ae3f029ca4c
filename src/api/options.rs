use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::api::error::{Error, Result};

/// Characters kept verbatim inside a path segment (RFC 3986 unreserved)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Paging options shared by list endpoints
///
/// Unset fields are left out of the query string.
#[skip_serializing_none]
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Page of results to fetch (1-based)
    pub page: Option<u32>,
    /// Number of results per page
    pub per_page: Option<u32>,
}

impl ListOptions {
    /// Options for a single page
    pub fn new(page: u32, per_page: u32) -> Self {
        ListOptions {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

/// Encodes a value for use as one path segment
///
/// Control characters (newlines and the like) are refused instead of being
/// escaped, they never belong in a resource name. So are empty, `.` and `..`
/// values, which URL resolution would collapse into a different path.
pub fn path_param(value: &str) -> Result<String> {
    if matches!(value, "" | "." | "..") {
        return Err(Error::InvalidOption(format!(
            "path parameter {:?} is not a valid path segment",
            value
        )));
    }
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        return Err(Error::InvalidOption(format!(
            "path parameter {:?} contains control character {:?}",
            value, c
        )));
    }
    Ok(utf8_percent_encode(value, PATH_SEGMENT).to_string())
}

/// Appends `opts` to `path` as a query string
pub fn add_options<O: Serialize + ?Sized>(path: &str, opts: Option<&O>) -> Result<String> {
    let opts = match opts {
        None => return Ok(path.to_string()),
        Some(o) => o,
    };
    let query = serde_urlencoded::to_string(opts).map_err(|e| Error::InvalidOption(e.to_string()))?;
    if query.is_empty() {
        return Ok(path.to_string());
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", path, separator, query))
}
