//! Story records as returned by the Algolia Hacker News search API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One search hit.
///
/// The API sends `null` for `title`, `url`, `num_comments` and `points` on
/// some items (mostly comments and polls that slip into story searches), so
/// every field decodes to its default instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Link to the HN discussion page for this story
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.object_id)
    }

    /// Story link, falling back to the discussion page for text posts
    pub fn link(&self) -> String {
        if self.url.is_empty() {
            self.discussion_url()
        } else {
            self.url.clone()
        }
    }

    /// Host part of the story URL, without a leading `www.`
    pub fn domain(&self) -> Option<&str> {
        let rest = self.url.split_once("://").map(|(_, r)| r)?;
        let host = rest.split(['/', '?', '#']).next()?;
        let host = host.strip_prefix("www.").unwrap_or(host);
        (!host.is_empty()).then_some(host)
    }
}

/// Top-level search response. Only `hits` is needed; paging fields are kept
/// for the status line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Story>,
    #[serde(default, rename = "nbHits")]
    pub total_hits: u64,
    #[serde(default, rename = "processingTimeMS")]
    pub processing_time_ms: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn story(id: &str, title: &str) -> Story {
    Story {
        object_id: id.to_string(),
        title: title.to_string(),
        url: format!("https://example.com/{id}"),
        author: "pg".to_string(),
        num_comments: 0,
        points: 0,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hits_with_null_fields() {
        let body = r#"{
            "hits": [
                {
                    "objectID": "1",
                    "title": "Rust 1.0",
                    "url": "https://blog.rust-lang.org/",
                    "author": "steveklabnik",
                    "num_comments": 200,
                    "points": 900,
                    "created_at": "2015-05-15T16:00:00.000Z"
                },
                {
                    "objectID": "2",
                    "title": null,
                    "url": null,
                    "author": "dang",
                    "num_comments": null,
                    "points": null
                }
            ],
            "nbHits": 2,
            "processingTimeMS": 3
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.total_hits, 2);

        let first = &response.hits[0];
        assert_eq!(first.object_id, "1");
        assert_eq!(first.points, 900);
        assert!(first.created_at.is_some());

        let second = &response.hits[1];
        assert_eq!(second.title, "");
        assert_eq!(second.url, "");
        assert_eq!(second.num_comments, 0);
        assert_eq!(second.created_at, None);
    }

    #[test]
    fn missing_hits_is_an_empty_list() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.hits.is_empty());
    }

    #[test]
    fn link_falls_back_to_discussion_page() {
        let mut s = story("42", "Ask HN");
        s.url.clear();
        assert_eq!(s.link(), "https://news.ycombinator.com/item?id=42");
        assert_eq!(s.domain(), None);
    }

    #[test]
    fn domain_strips_scheme_and_www() {
        let mut s = story("1", "x");
        s.url = "https://www.rust-lang.org/learn?x=1".to_string();
        assert_eq!(s.domain(), Some("rust-lang.org"));
    }
}
