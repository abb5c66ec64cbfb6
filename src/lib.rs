//! hnsearch - Hacker News story search
//!
//! Queries the Algolia HN search API, keeps the results in a small reducer
//! driven state machine, and remembers the last search term between runs.
//!
//! # Features
//!
//! - **Submit-only fetching**: typing updates the persisted term, only an
//!   explicit submit changes the query URL and hits the network
//! - **Ordered results**: every request carries a sequence number and stale
//!   responses are dropped
//! - **Dismissable results**: remove stories from the current list
//! - **Three front-ends**: terminal UI, desktop GUI and a one-shot CLI
//!
//! # Example
//!
//! ```no_run
//! use hnsearch::{AppConfig, HnClient, MemoryStore, SearchSession};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> hnsearch::Result<()> {
//!     let config = AppConfig::default();
//!     let store = MemoryStore::new();
//!     let client = Arc::new(HnClient::new()?);
//!
//!     let mut session = SearchSession::new(&store, &config, client);
//!     session.set_term("Rust");
//!     session.submit();
//!     session.wait(Duration::from_secs(30))?;
//!
//!     for story in &session.stories().data {
//!         println!("{} ({} points)", story.title, story.points);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod fetch;
pub mod gui;
pub mod logging;
pub mod search;
pub mod session;
pub mod sort;
pub mod stories;
pub mod storage;
pub mod story;
pub mod tui;

// Re-export main types
pub use client::{query_url, HnClient, HttpConfig, StorySource, API_ENDPOINT};
pub use error::{HnSearchError, Result};
pub use fetch::{FetchController, FetchOutcome};
pub use search::{SearchState, DEFAULT_TERM, SEARCH_KEY};
pub use session::SearchSession;
pub use sort::{sorted_indices, SortColumn, SortOrder, SortState};
pub use stories::{reduce, Phase, StoriesAction, StoriesState, StoriesStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistedValue};
pub use story::{SearchResponse, Story};

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generic message shown for any failed fetch
pub const FETCH_ERROR_MESSAGE: &str = "Something went wrong ...";

/// Format a story timestamp as a short relative age ("3h", "12d")
pub fn format_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return String::new();
    };

    let secs = (now - created_at).num_seconds().max(0);
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        86_400..=31_535_999 => format!("{}d", secs / 86_400),
        _ => format!("{}y", secs / 31_536_000),
    }
}

/// Format a count with thousands separators
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Query URL prefix; the search term is appended to it
    pub endpoint: String,
    /// Storage key holding the last search term
    pub storage_key: String,
    /// Term used when nothing is stored
    pub default_term: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Location of the persisted key/value file
    pub store_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: API_ENDPOINT.to_string(),
            storage_key: SEARCH_KEY.to_string(),
            default_term: DEFAULT_TERM.to_string(),
            request_timeout: HttpConfig::default().request_timeout,
            store_path: FileStore::default_path(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `HNSEARCH_ENDPOINT` and `HNSEARCH_STORE`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var("HNSEARCH_ENDPOINT") {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }
        if let Some(path) = std::env::var_os("HNSEARCH_STORE") {
            config.store_path = PathBuf::from(path);
        }
        config
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            request_timeout: self.request_timeout,
            ..HttpConfig::default()
        }
    }

    /// Open the file store and build a live HTTP client
    pub fn open(&self) -> Result<(FileStore, std::sync::Arc<HnClient>)> {
        let store = FileStore::open(&self.store_path)?;
        let client = HnClient::with_config(self.http_config())?;
        Ok((store, std::sync::Arc::new(client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn format_age_picks_largest_unit() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(format_age(None, now), "");
        assert_eq!(format_age(Some(now - chrono::Duration::seconds(5)), now), "5s");
        assert_eq!(format_age(Some(now - chrono::Duration::minutes(7)), now), "7m");
        assert_eq!(format_age(Some(now - chrono::Duration::hours(3)), now), "3h");
        assert_eq!(format_age(Some(now - chrono::Duration::days(9)), now), "9d");
        assert_eq!(format_age(Some(now - chrono::Duration::days(800)), now), "2y");
    }

    #[test]
    fn default_config_uses_algolia_and_search_key() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, API_ENDPOINT);
        assert_eq!(config.storage_key, "search");
        assert_eq!(config.default_term, "React");
    }
}
