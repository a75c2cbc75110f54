//! Running a search on a worker thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::error::SearchError;
use crate::game_state::GameState;
use crate::minimax::{search_until, SearchConfig, SearchResult};

/// A search running in the background on its own copy of a position.
///
/// Poll with [`try_result`](Self::try_result), block with
/// [`wait`](Self::wait), or ask it to stop early with
/// [`cancel`](Self::cancel). A cancelled search still produces a legal move.
pub struct SearchTask {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<SearchResult, SearchError>>>,
    result: Option<Result<SearchResult, SearchError>>,
}

impl SearchTask {
    /// Start searching `state` with the time budget from `config`.
    pub fn spawn(state: GameState, config: SearchConfig) -> Self {
        let deadline = Instant::now() + config.time_budget();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            search_until(&state, Some(deadline), &config, Some(flag.as_ref()))
        });
        Self {
            cancel,
            handle: Some(handle),
            result: None,
        }
    }

    /// Ask the search to stop at its next check.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        match &self.handle {
            Some(handle) => handle.is_finished(),
            None => true,
        }
    }

    /// The result if the search is done, without blocking.
    pub fn try_result(&mut self) -> Option<Result<SearchResult, SearchError>> {
        if self.result.is_none() && self.is_finished() {
            self.collect();
        }
        self.result
    }

    /// Block until the search finishes.
    pub fn wait(mut self) -> Result<SearchResult, SearchError> {
        self.collect();
        self.result.unwrap_or(Err(SearchError::WorkerLost))
    }

    fn collect(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.result = Some(handle.join().unwrap_or(Err(SearchError::WorkerLost)));
        }
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        // Don't leave an abandoned search burning a core until its deadline
        self.cancel();
    }
}
