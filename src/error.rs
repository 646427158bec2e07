//! Error type for page transport and adapter configuration.
//!
//! "Not found" is never an error here: extraction and detection report
//! absence as `None`/`false`. These variants cover the exceptional paths the
//! orchestrator downgrades to a status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("page handle error: {0}")]
    Page(String),
}

impl ScrapeError {
    /// True when the failure should be reported as `TIMEOUT` rather than
    /// `FAIL_SELECTOR`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timeout() {
        assert!(ScrapeError::Timeout { elapsed_ms: 20_000 }.is_timeout());
        assert!(!ScrapeError::Page("closed".to_string()).is_timeout());
    }

    #[test]
    fn test_display() {
        let err = ScrapeError::UnexpectedStatus { status: 403, url: "https://x".to_string() };
        assert_eq!(err.to_string(), "unexpected HTTP status 403 from https://x");
    }
}
