//! One search session: persisted input, stories state and fetching wired
//! together. Front-ends only talk to [`SearchSession`].

use crate::client::StorySource;
use crate::fetch::FetchController;
use crate::search::SearchState;
use crate::stories::{StoriesAction, StoriesState, StoriesStore};
use crate::storage::KeyValueStore;
use crate::{AppConfig, Result};
use std::sync::Arc;
use std::time::Duration;

pub struct SearchSession<S> {
    search: SearchState<S>,
    stories: StoriesStore,
    fetch: FetchController,
}

impl<S: KeyValueStore> SearchSession<S> {
    pub fn new(store: S, config: &AppConfig, source: Arc<dyn StorySource>) -> Self {
        Self {
            search: SearchState::with_key(
                store,
                &config.endpoint,
                &config.storage_key,
                &config.default_term,
            ),
            stories: StoriesStore::new(),
            fetch: FetchController::new(source),
        }
    }

    /// Fetch the URL derived from the initial term. Does nothing for an
    /// empty term.
    pub fn start(&mut self) -> Option<u64> {
        if !self.search.can_submit() {
            tracing::info!("initial term is empty, not fetching");
            return None;
        }
        let url = self.search.url().to_string();
        Some(self.fetch.start(&url, &mut self.stories))
    }

    pub fn term(&self) -> &str {
        self.search.term()
    }

    pub fn url(&self) -> &str {
        self.search.url()
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.search.set_term(term);
    }

    pub fn edit_term(&mut self, f: impl FnOnce(&mut String)) {
        self.search.edit_term(f);
    }

    pub fn can_submit(&self) -> bool {
        self.search.can_submit()
    }

    /// Recompute the URL and fetch it. Returns the request's sequence
    /// number, or `None` when the term is empty.
    pub fn submit(&mut self) -> Option<u64> {
        let url = self.search.submit()?.to_string();
        Some(self.fetch.start(&url, &mut self.stories))
    }

    /// Apply finished fetches. Returns true if the stories state changed.
    pub fn poll(&mut self) -> bool {
        self.fetch.poll(&mut self.stories)
    }

    /// Block until the latest fetch is applied
    pub fn wait(&mut self, timeout: Duration) -> Result<()> {
        self.fetch.wait(&mut self.stories, timeout)
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch.is_pending()
    }

    pub fn dismiss(&mut self, object_id: &str) {
        tracing::debug!(object_id, "dismissing story");
        self.stories
            .dispatch(StoriesAction::RemoveItem(object_id.to_string()));
    }

    pub fn stories(&self) -> &StoriesState {
        self.stories.state()
    }
}
