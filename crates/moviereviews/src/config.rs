use std::{env, time::Duration};

use moviereviews_core::reviews::YearMatch;

/// Application configuration loaded from environment variables.
///
/// Read once at start-up and never reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the reviews table (default: "MovieReviews")
    pub table_name: String,
    /// Region of the store (default: "eu-west-1")
    pub region: String,
    /// Custom store endpoint, e.g. a local DynamoDB (default: unset)
    pub endpoint_url: Option<String>,
    /// Secondary index keyed on reviewer name (default: "reviewerIndex")
    pub reviewer_index_name: String,
    /// Upper bound for the store calls of one request, in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Use strongly consistent reads on the base table (default: false)
    pub consistent_reads: bool,
    /// Year filter mode (default: contains)
    pub year_match: YearMatch,
    /// Reject creates for an existing review key with 409 (default: false)
    pub reject_duplicate_reviews: bool,
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Reviews table name (default: "MovieReviews")
    /// - `REGION`, falling back to `AWS_REGION` - Store region (default: "eu-west-1")
    /// - `AWS_ENDPOINT_URL` - Custom store endpoint (default: unset)
    /// - `REVIEWER_INDEX_NAME` - Reviewer index name (default: "reviewerIndex")
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request store bound (default: 10)
    /// - `CONSISTENT_READS` - Strongly consistent base-table reads (default: false)
    /// - `YEAR_FILTER` - `contains` or `prefix` (default: "contains")
    /// - `REJECT_DUPLICATE_REVIEWS` - Conditional create (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup("TABLE_NAME").unwrap_or_else(|| "MovieReviews".to_string()),
            region: lookup("REGION")
                .or_else(|| lookup("AWS_REGION"))
                .unwrap_or_else(|| "eu-west-1".to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty()),
            reviewer_index_name: lookup("REVIEWER_INDEX_NAME")
                .unwrap_or_else(|| "reviewerIndex".to_string()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
            consistent_reads: lookup("CONSISTENT_READS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
            year_match: lookup("YEAR_FILTER")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            reject_duplicate_reviews: lookup("REJECT_DUPLICATE_REVIEWS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
