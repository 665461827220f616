//! Error types for fetching, issue resolution and latest-issue discovery.
//!
//! Per-issue failures ([`IssueError`]) are collected into a batch report;
//! discovery failures ([`DiscoveryError`]) are fatal to the operation that
//! needed the latest issue number.

use std::path::PathBuf;
use thiserror::Error;

/// A single HTTP GET that did not produce a usable response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl reported an error (DNS, connect, timeout, aborted write...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The server answered with a status the caller does not accept.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u32 },
}

impl FetchError {
    /// HTTP status code, if the failure was a status rejection.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { .. } => None,
        }
    }
}

/// Why one issue could not be resolved or saved.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Landing page has no link under the download prefix (issue not released).
    #[error("issue {issue}: download not available (no link starting with {prefix:?})")]
    MissingDownloadLink { issue: u32, prefix: String },

    /// Landing page answered with a redirect; the publisher uses this for
    /// issues that are not out yet.
    #[error("issue {issue}: not yet published (landing page redirects to {location:?})")]
    NotYetPublished { issue: u32, location: String },

    #[error("issue {issue}: {source}")]
    Fetch {
        issue: u32,
        #[source]
        source: FetchError,
    },

    #[error("issue {issue}: invalid download link {href:?}: {source}")]
    InvalidLink {
        issue: u32,
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("issue {issue}: cannot write {}: {source}", .path.display())]
    Storage {
        issue: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid selector: {0}")]
    Selector(String),
}

impl IssueError {
    /// Short machine-friendly label used in logs and the batch summary.
    pub fn kind(&self) -> &'static str {
        match self {
            IssueError::MissingDownloadLink { .. } => "missing-link",
            IssueError::NotYetPublished { .. } => "not-published",
            IssueError::Fetch { .. } => "fetch",
            IssueError::InvalidLink { .. } => "invalid-link",
            IssueError::Storage { .. } => "storage",
            IssueError::Selector(_) => "selector",
        }
    }
}

/// Failure to derive the latest issue number from the listing page.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("listing page: {0}")]
    Fetch(#[from] FetchError),

    #[error("no heading containing {marker:?} on the listing page (site layout changed?)")]
    HeadingNotFound { marker: String },

    #[error("heading {text:?} has no issue link")]
    LinkNotFound { text: String },

    #[error("cannot read an issue number from link {href:?}")]
    BadIssueLink { href: String },

    #[error("invalid selector: {0}")]
    Selector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_status_code() {
        let e = FetchError::Status {
            url: "https://example.com/x".to_string(),
            status: 503,
        };
        assert_eq!(e.status(), Some(503));
        assert_eq!(e.to_string(), "GET https://example.com/x returned HTTP 503");
    }

    #[test]
    fn issue_error_messages_name_the_issue() {
        let missing = IssueError::MissingDownloadLink {
            issue: 7,
            prefix: "/downloads".to_string(),
        };
        assert!(missing.to_string().starts_with("issue 7:"));
        assert_eq!(missing.kind(), "missing-link");

        let redirect = IssueError::NotYetPublished {
            issue: 200,
            location: "/issues".to_string(),
        };
        assert!(redirect.to_string().contains("not yet published"));
        assert_eq!(redirect.kind(), "not-published");
    }

    #[test]
    fn discovery_error_from_fetch() {
        let e: DiscoveryError = FetchError::Status {
            url: "https://example.com/issues".to_string(),
            status: 404,
        }
        .into();
        assert!(matches!(e, DiscoveryError::Fetch(_)));
        assert!(e.to_string().contains("HTTP 404"));
    }
}
