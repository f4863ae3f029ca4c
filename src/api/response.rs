use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use reqwest::header::{HeaderMap, LINK};
use reqwest::StatusCode;
use url::Url;

const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RATE_USED: &str = "x-ratelimit-used";
const HEADER_RATE_RESET: &str = "x-ratelimit-reset";
const HEADER_RATE_RESOURCE: &str = "x-ratelimit-resource";

/// Metadata of a received response
///
/// Returned alongside every decoded result and carried by errors raised after
/// the headers arrived, so callers can always inspect rate limits and paging.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status
    pub status: StatusCode,
    /// Raw response headers
    pub headers: HeaderMap,
    /// Rate limit state reported by the server
    pub rate: Option<Rate>,
    /// Page number of the `next` link
    pub next_page: Option<u32>,
    /// Page number of the `prev` link
    pub prev_page: Option<u32>,
    /// Page number of the `first` link
    pub first_page: Option<u32>,
    /// Page number of the `last` link
    pub last_page: Option<u32>,
}

/// Rate limit information from the `X-RateLimit-*` headers
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub limit: u64,
    pub remaining: u64,
    pub used: u64,
    pub reset: Option<DateTime<Utc>>,
    pub resource: Option<String>,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap) -> Self {
        let rate = parse_rate(&headers);
        let mut response = Response {
            status,
            headers,
            rate,
            next_page: None,
            prev_page: None,
            first_page: None,
            last_page: None,
        };
        response.populate_page_values();
        response
    }

    fn populate_page_values(&mut self) {
        let links = match self.headers.get(LINK).and_then(|v| v.to_str().ok()) {
            Some(l) => l.to_string(),
            None => return,
        };
        for link in links.split(',') {
            let mut segments = link.split(';');
            let target = match segments.next() {
                Some(t) => t.trim(),
                None => continue,
            };
            if !target.starts_with('<') || !target.ends_with('>') {
                continue;
            }
            let page = match page_of(&target[1..target.len() - 1]) {
                Some(p) => p,
                None => continue,
            };
            for segment in segments {
                match segment.trim() {
                    "rel=\"next\"" => self.next_page = Some(page),
                    "rel=\"prev\"" => self.prev_page = Some(page),
                    "rel=\"first\"" => self.first_page = Some(page),
                    "rel=\"last\"" => self.last_page = Some(page),
                    _ => {}
                }
            }
        }
    }
}

fn page_of(target: &str) -> Option<u32> {
    let url = match Url::parse(target) {
        Ok(u) => u,
        Err(e) => {
            debug!("Ignoring unparsable link {}: {}", target, e);
            return None;
        }
    };
    url.query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
}

fn header_num(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn parse_rate(headers: &HeaderMap) -> Option<Rate> {
    let limit = header_num(headers, HEADER_RATE_LIMIT)?;
    let remaining = header_num(headers, HEADER_RATE_REMAINING)?;
    Some(Rate {
        limit,
        remaining,
        used: header_num(headers, HEADER_RATE_USED).unwrap_or(limit.saturating_sub(remaining)),
        reset: header_num(headers, HEADER_RATE_RESET)
            .and_then(|s| i64::try_from(s).ok())
            .and_then(|s| Utc.timestamp_opt(s, 0).single()),
        resource: headers
            .get(HEADER_RATE_RESOURCE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
    })
}
