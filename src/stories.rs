//! Stories state machine
//!
//! The result list, its loading flag and its error flag only change through
//! [`reduce`]. [`StoriesStore`] owns one state value and is the single writer.

use crate::story::Story;

/// Result list plus fetch lifecycle flags.
///
/// `is_loading` and `is_error` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoriesAction {
    FetchInit,
    FetchSuccess(Vec<Story>),
    FetchFailure,
    RemoveItem(String),
}

impl StoriesAction {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            StoriesAction::FetchInit => "FETCH_INIT",
            StoriesAction::FetchSuccess(_) => "FETCH_SUCCESS",
            StoriesAction::FetchFailure => "FETCH_FAILURE",
            StoriesAction::RemoveItem(_) => "REMOVE_ITEM",
        }
    }
}

/// Coarse lifecycle phase derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

impl StoriesState {
    pub fn phase(&self) -> Phase {
        match (self.is_loading, self.is_error) {
            (true, _) => Phase::Loading,
            (false, true) => Phase::Failure,
            (false, false) if self.data.is_empty() => Phase::Idle,
            (false, false) => Phase::Success,
        }
    }
}

/// Pure state transition.
///
/// The match is exhaustive: an action kind this function does not handle
/// cannot be constructed.
pub fn reduce(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess(data) => StoriesState {
            data,
            is_loading: false,
            is_error: false,
        },
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::RemoveItem(object_id) => {
            let StoriesState {
                mut data,
                is_loading,
                is_error,
            } = state;
            data.retain(|story| story.object_id != object_id);
            StoriesState {
                data,
                is_loading,
                is_error,
            }
        }
    }
}

/// Owner of the stories state. All mutation goes through [`dispatch`].
///
/// [`dispatch`]: StoriesStore::dispatch
#[derive(Debug, Default)]
pub struct StoriesStore {
    state: StoriesState,
}

impl StoriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StoriesState {
        &self.state
    }

    pub fn dispatch(&mut self, action: StoriesAction) {
        let name = action.name();
        let before = self.state.data.len();
        self.state = reduce(std::mem::take(&mut self.state), action);
        tracing::debug!(
            action = name,
            stories_before = before,
            stories_after = self.state.data.len(),
            is_loading = self.state.is_loading,
            is_error = self.state.is_error,
            "dispatched"
        );
    }
}
