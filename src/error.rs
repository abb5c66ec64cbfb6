//! Error types for hnsearch
//!
//! Every fetch problem ends up as a single "fetch failed" state in the UI;
//! the variants here keep the cause around for logs and the CLI.

use thiserror::Error;

/// Main error type for hnsearch operations
#[derive(Error, Debug)]
pub enum HnSearchError {
    #[error("HTTP request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file '{path}' is not a JSON object")]
    StorageFormat { path: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Fetch worker disconnected")]
    WorkerDisconnected,

    #[error("Timed out waiting for search results")]
    WaitTimeout,

    #[error("{}", crate::FETCH_ERROR_MESSAGE)]
    FetchFailed,

    #[error("Nothing to search for; pass a term or run `hnsearch store set <TERM>`")]
    EmptyTerm,
}

/// Result type alias for hnsearch operations
pub type Result<T> = std::result::Result<T, HnSearchError>;

impl HnSearchError {
    /// Whether this error came from talking to the search API.
    ///
    /// These are the errors the UI collapses into the generic
    /// "something went wrong" state.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            HnSearchError::Http { .. }
                | HnSearchError::Status { .. }
                | HnSearchError::Decode(_)
                | HnSearchError::FetchFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_decode_are_fetch_failures() {
        let status = HnSearchError::Status {
            url: "https://example.test".to_string(),
            status: 503,
        };
        assert!(status.is_fetch_failure());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(HnSearchError::Decode(decode).is_fetch_failure());
    }

    #[test]
    fn gui_error_is_prefixed_once() {
        let e = HnSearchError::Gui("no display".to_string());
        assert_eq!(e.to_string(), "GUI error: no display");
    }

    #[test]
    fn fetch_failed_shows_only_generic_message() {
        let e = HnSearchError::FetchFailed;
        assert!(e.is_fetch_failure());
        assert_eq!(e.to_string(), crate::FETCH_ERROR_MESSAGE);
    }

    #[test]
    fn local_errors_are_not_fetch_failures() {
        assert!(!HnSearchError::WaitTimeout.is_fetch_failure());
        assert!(!HnSearchError::EmptyTerm.is_fetch_failure());
        assert!(!HnSearchError::StorageFormat {
            path: "storage.json".to_string()
        }
        .is_fetch_failure());
    }
}
