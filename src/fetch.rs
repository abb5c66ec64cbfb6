//! Fetch orchestration
//!
//! Each [`FetchController::start`] dispatches `FetchInit`, tags the request
//! with the next sequence number and runs it on a worker thread. Outcomes come
//! back over a channel and are applied on the caller's thread by
//! [`FetchController::poll`] or [`FetchController::wait`]. Only the outcome
//! of the most recent request is applied; anything older is dropped, so a slow
//! early response can never overwrite a newer result.

use crate::client::StorySource;
use crate::error::{HnSearchError, Result};
use crate::stories::{StoriesAction, StoriesStore};
use crate::story::Story;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of one request, as sent back by the worker
pub struct FetchOutcome {
    pub seq: u64,
    pub url: String,
    pub result: Result<Vec<Story>>,
}

pub struct FetchController {
    source: Arc<dyn StorySource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    next_seq: u64,
    /// Sequence number of the latest request, while it is unresolved
    pending: Option<u64>,
    discarded: u64,
}

impl FetchController {
    pub fn new(source: Arc<dyn StorySource>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source,
            tx,
            rx,
            next_seq: 0,
            pending: None,
            discarded: 0,
        }
    }

    /// Issue a request for `url`. Returns its sequence number.
    pub fn start(&mut self, url: &str, store: &mut StoriesStore) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending = Some(seq);
        store.dispatch(StoriesAction::FetchInit);

        tracing::info!(seq, url, "fetch started");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let url_owned = url.to_string();

        let spawned = thread::Builder::new()
            .name(format!("hnsearch-fetch-{seq}"))
            .spawn(move || {
                let result = source.fetch(&url_owned);
                let _ = tx.send(FetchOutcome {
                    seq,
                    url: url_owned,
                    result,
                });
            });

        if let Err(e) = spawned {
            tracing::error!(seq, error = %e, "failed to spawn fetch worker");
            self.apply(
                FetchOutcome {
                    seq,
                    url: url.to_string(),
                    result: Err(e.into()),
                },
                store,
            );
        }

        seq
    }

    /// Apply every outcome that has already arrived. Returns true if the
    /// stories state changed.
    pub fn poll(&mut self, store: &mut StoriesStore) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply(outcome, store);
        }
        changed
    }

    /// Block until the latest request has been applied or `timeout` passes.
    pub fn wait(&mut self, store: &mut StoriesStore, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while self.pending.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    self.apply(outcome, store);
                }
                Err(RecvTimeoutError::Timeout) => return Err(HnSearchError::WaitTimeout),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(HnSearchError::WorkerDisconnected)
                }
            }
        }
        Ok(())
    }

    /// Whether the latest request is still unresolved
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of outcomes dropped because a newer request had been issued
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    fn apply(&mut self, outcome: FetchOutcome, store: &mut StoriesStore) -> bool {
        if self.pending != Some(outcome.seq) {
            self.discarded += 1;
            tracing::debug!(
                seq = outcome.seq,
                latest = self.next_seq,
                url = %outcome.url,
                "discarding stale fetch outcome"
            );
            return false;
        }
        self.pending = None;

        match outcome.result {
            Ok(stories) => {
                tracing::info!(seq = outcome.seq, count = stories.len(), "fetch succeeded");
                store.dispatch(StoriesAction::FetchSuccess(stories));
            }
            Err(e) => {
                tracing::warn!(
                    seq = outcome.seq,
                    url = %outcome.url,
                    error = %e,
                    fetch_failure = e.is_fetch_failure(),
                    "fetch failed"
                );
                store.dispatch(StoriesAction::FetchFailure);
            }
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::story::story;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Source that answers with one story titled after the URL, or fails for
    /// URLs containing "fail". URLs can be gated so the test decides when the
    /// response is released.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        gates: Mutex<HashMap<String, Receiver<()>>>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub(crate) fn gate(&self, url: &str) -> Sender<()> {
            let (tx, rx) = unbounded();
            self.gates.lock().insert(url.to_string(), rx);
            tx
        }
    }

    impl StorySource for FakeSource {
        fn fetch(&self, url: &str) -> Result<Vec<Story>> {
            self.calls.lock().push(url.to_string());
            let gate = self.gates.lock().remove(url);
            if let Some(gate) = gate {
                let _ = gate.recv();
            }
            if url.contains("fail") {
                return Err(HnSearchError::Status {
                    url: url.to_string(),
                    status: 500,
                });
            }
            Ok(vec![story(url, url)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    fn titles(store: &StoriesStore) -> Vec<String> {
        store.state().data.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn success_is_applied_after_init() {
        let source = Arc::new(FakeSource::default());
        let mut controller = FetchController::new(source);
        let mut store = StoriesStore::new();

        controller.start("a", &mut store);
        assert!(store.state().is_loading);
        assert!(controller.is_pending());

        controller.wait(&mut store, WAIT).unwrap();
        assert!(!store.state().is_loading);
        assert_eq!(titles(&store), ["a"]);
    }

    #[test]
    fn failure_keeps_previous_data() {
        let source = Arc::new(FakeSource::default());
        let mut controller = FetchController::new(source);
        let mut store = StoriesStore::new();

        controller.start("a", &mut store);
        controller.wait(&mut store, WAIT).unwrap();
        controller.start("fail", &mut store);
        controller.wait(&mut store, WAIT).unwrap();

        assert!(store.state().is_error);
        assert_eq!(titles(&store), ["a"]);
    }

    #[test]
    fn stale_response_is_discarded() {
        let source = Arc::new(FakeSource::default());
        let release_old = source.gate("old");
        let mut controller = FetchController::new(source.clone());
        let mut store = StoriesStore::new();

        let old = controller.start("old", &mut store);
        let new = controller.start("new", &mut store);
        assert!(new > old);

        controller.wait(&mut store, WAIT).unwrap();
        assert_eq!(titles(&store), ["new"]);

        release_old.send(()).unwrap();
        let deadline = Instant::now() + WAIT;
        while controller.discarded() == 0 && Instant::now() < deadline {
            controller.poll(&mut store);
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(controller.discarded(), 1);
        assert_eq!(titles(&store), ["new"]);
        assert!(!store.state().is_loading);
        assert_eq!(source.calls.lock().len(), 2);
    }

    #[test]
    fn wait_times_out_while_gated() {
        let source = Arc::new(FakeSource::default());
        let release = source.gate("slow");
        let mut controller = FetchController::new(source);
        let mut store = StoriesStore::new();

        controller.start("slow", &mut store);
        let err = controller
            .wait(&mut store, Duration::from_millis(20))
            .unwrap_err();
        assert!(matches!(err, HnSearchError::WaitTimeout));
        assert!(store.state().is_loading);

        release.send(()).unwrap();
        controller.wait(&mut store, WAIT).unwrap();
        assert_eq!(titles(&store), ["slow"]);
    }
}
