//! HTTP access to the story search API

use crate::error::{HnSearchError, Result};
use crate::story::{SearchResponse, Story};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// Default search endpoint. The query URL is this string followed by the
/// search term.
pub const API_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

/// Anything that can turn a query URL into a list of stories.
///
/// Implementations are called from a background thread.
pub trait StorySource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<Story>>;
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("hnsearch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking reqwest client for the Algolia HN API
pub struct HnClient {
    inner: Client,
}

impl HnClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self> {
        let inner = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(HnSearchError::ClientBuild)?;
        Ok(Self { inner })
    }

    /// GET `url` and decode the full response body
    pub fn search(&self, url: &str) -> Result<SearchResponse> {
        tracing::debug!("GET {}", url);

        let response = self.inner.get(url).send().map_err(|source| HnSearchError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        tracing::debug!("GET response: {} {}", status, url);
        if !status.is_success() {
            return Err(HnSearchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| HnSearchError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl StorySource for HnClient {
    fn fetch(&self, url: &str) -> Result<Vec<Story>> {
        let response = self.search(url)?;
        tracing::info!(
            hits = response.hits.len(),
            total = response.total_hits,
            took_ms = response.processing_time_ms,
            "search complete"
        );
        Ok(response.hits)
    }
}

/// Query URL for a term: the endpoint with the term appended verbatim.
pub fn query_url(endpoint: &str, term: &str) -> String {
    format!("{endpoint}{term}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchController;
    use crate::stories::StoriesStore;
    use mockito::{Matcher, Server, ServerGuard};
    use std::sync::Arc;

    const HITS_BODY: &str = r#"{
        "hits": [
            {
                "objectID": "8863",
                "title": "My YC app: Dropbox",
                "url": "http://www.getdropbox.com/u/2/screencast.html",
                "author": "dhouston",
                "num_comments": 71,
                "points": 111,
                "created_at": "2007-04-04T19:16:40.000Z"
            }
        ],
        "nbHits": 1,
        "processingTimeMS": 1
    }"#;

    fn serve(server: &mut ServerGuard, status: usize, body: &str) -> mockito::Mock {
        server
            .mock("GET", Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    fn endpoint(server: &ServerGuard) -> String {
        format!("{}/api/v1/search?query=", server.url())
    }

    #[test]
    fn hits_are_extracted_from_response() {
        let mut server = Server::new();
        let mock = serve(&mut server, 200, HITS_BODY);

        let client = HnClient::new().unwrap();
        let stories = client.fetch(&query_url(&endpoint(&server), "dropbox")).unwrap();

        mock.assert();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].object_id, "8863");
        assert_eq!(stories[0].points, 111);
    }

    #[test]
    fn error_status_maps_to_status_error() {
        let mut server = Server::new();
        let _mock = serve(&mut server, 500, r#"{"message": "boom"}"#);

        let url = query_url(&endpoint(&server), "rust");
        let err = HnClient::new().unwrap().fetch(&url).unwrap_err();

        assert!(matches!(err, HnSearchError::Status { status: 500, .. }));
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn malformed_body_maps_to_decode_error() {
        let mut server = Server::new();
        let _mock = serve(&mut server, 200, "<html>not json</html>");

        let url = query_url(&endpoint(&server), "rust");
        let err = HnClient::new().unwrap().fetch(&url).unwrap_err();

        assert!(matches!(err, HnSearchError::Decode(_)));
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn server_error_after_success_keeps_previous_stories() {
        let mut good = Server::new();
        let _ok = serve(&mut good, 200, HITS_BODY);
        let mut bad = Server::new();
        let _fail = serve(&mut bad, 503, "");

        let mut controller = FetchController::new(Arc::new(HnClient::new().unwrap()));
        let mut store = StoriesStore::new();
        let wait = Duration::from_secs(10);

        controller.start(&query_url(&endpoint(&good), "dropbox"), &mut store);
        controller.wait(&mut store, wait).unwrap();
        assert_eq!(store.state().data.len(), 1);

        controller.start(&query_url(&endpoint(&bad), "dropbox"), &mut store);
        controller.wait(&mut store, wait).unwrap();

        let state = store.state();
        assert!(state.is_error);
        assert!(!state.is_loading);
        assert_eq!(state.data.len(), 1);
        assert_eq!(state.data[0].object_id, "8863");
    }

    #[test]
    fn query_url_appends_term_to_endpoint() {
        assert_eq!(
            query_url(API_ENDPOINT, "React"),
            "https://hn.algolia.com/api/v1/search?query=React"
        );
    }

    #[test]
    fn client_builds_with_default_config() {
        assert!(HnClient::new().is_ok());
    }
}
