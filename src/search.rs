//! Search input state
//!
//! The term changes on every keystroke and is persisted each time. The query
//! URL only changes on [`SearchState::submit`], so typing never triggers a
//! request.

use crate::client::query_url;
use crate::storage::{KeyValueStore, PersistedValue};

/// Storage key for the last search term
pub const SEARCH_KEY: &str = "search";

/// Term used when nothing is stored yet
pub const DEFAULT_TERM: &str = "React";

pub struct SearchState<S> {
    term: PersistedValue<S>,
    endpoint: String,
    url: String,
}

impl<S: KeyValueStore> SearchState<S> {
    /// Load the term from `store` (or the default) and derive the initial URL
    pub fn new(store: S, endpoint: &str) -> Self {
        Self::with_key(store, endpoint, SEARCH_KEY, DEFAULT_TERM)
    }

    pub fn with_key(store: S, endpoint: &str, key: &str, default_term: &str) -> Self {
        let term = PersistedValue::new(store, key, default_term);
        let url = query_url(endpoint, term.get());
        Self {
            term,
            endpoint: endpoint.to_string(),
            url,
        }
    }

    pub fn term(&self) -> &str {
        self.term.get()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term.set(term);
    }

    /// Edit the term in place; the result is persisted
    pub fn edit_term(&mut self, f: impl FnOnce(&mut String)) {
        self.term.update(f);
    }

    /// Submitting is disabled for an empty term
    pub fn can_submit(&self) -> bool {
        !self.term.get().is_empty()
    }

    /// Recompute the query URL from the current term.
    ///
    /// Returns `None` without touching the URL when the term is empty.
    pub fn submit(&mut self) -> Option<&str> {
        if !self.can_submit() {
            return None;
        }
        self.url = query_url(&self.endpoint, self.term.get());
        Some(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::API_ENDPOINT;
    use crate::storage::MemoryStore;

    #[test]
    fn stored_term_wins_over_default() {
        let store = MemoryStore::with_entry(SEARCH_KEY, "Rust");
        let search = SearchState::new(&store, API_ENDPOINT);
        assert_eq!(search.term(), "Rust");
        assert!(search.url().ends_with("query=Rust"));
    }

    #[test]
    fn default_term_without_stored_value() {
        let store = MemoryStore::new();
        let search = SearchState::new(&store, API_ENDPOINT);
        assert_eq!(search.term(), "React");
        assert_eq!(search.url(), format!("{API_ENDPOINT}React"));
    }

    #[test]
    fn typing_persists_but_does_not_change_url() {
        let store = MemoryStore::new();
        let mut search = SearchState::new(&store, API_ENDPOINT);
        let initial = search.url().to_string();

        search.set_term("Ru");
        search.edit_term(|t| t.push_str("st"));

        assert_eq!(store.get(SEARCH_KEY).as_deref(), Some("Rust"));
        assert_eq!(search.url(), initial);

        assert_eq!(search.submit(), Some(format!("{API_ENDPOINT}Rust").as_str()));
        assert_eq!(search.url(), format!("{API_ENDPOINT}Rust"));
    }

    #[test]
    fn empty_term_cannot_be_submitted() {
        let store = MemoryStore::new();
        let mut search = SearchState::new(&store, API_ENDPOINT);
        let before = search.url().to_string();

        search.set_term("");
        assert!(!search.can_submit());
        assert_eq!(search.submit(), None);
        assert_eq!(search.url(), before);
    }
}
