//! Debounced, cancellable address suggestion fetcher.
//!
//! [`SuggestionFetcher`] turns a stream of query edits (one per keystroke)
//! into a published list of suggestions. Every edit supersedes the previous
//! one: the pending fetch is cancelled through its [`CancellationToken`] and
//! the shared generation counter moves forward, so a result produced for an
//! older edit is dropped even if it arrives late.
//!
//! Results are published on a [`tokio::sync::watch`] channel. Call
//! [`SuggestionFetcher::subscribe`] to receive them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_RESULTS, DEFAULT_MIN_QUERY_CHARS};
use crate::lookup::{AddressLookup, AddressQuery};

/// Tunable parameters for the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Quiet period after the latest edit before a request is sent.
    pub debounce: Duration,
    /// Trimmed queries shorter than this clear the list without a request.
    pub min_query_chars: usize,
    /// Candidates requested per lookup.
    pub max_results: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing pending; the published list is final for the latest query.
    Idle,
    /// Waiting out the debounce window.
    Debouncing,
    /// Request sent, waiting for the response.
    InFlight,
}

/// How a single fetch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Suggestions were published.
    Resolved { count: usize },
    /// The lookup failed; an empty list was published.
    Failed,
    /// A newer query took over (or the fetcher was torn down); nothing was
    /// published.
    Superseded,
}

/// State shared between the fetcher and its spawned task.
#[derive(Debug)]
struct Shared {
    generation: AtomicU64,
    results: watch::Sender<Vec<String>>,
    phase: watch::Sender<FetchPhase>,
    outcome: watch::Sender<Option<FetchOutcome>>,
}

impl Shared {
    fn new() -> Self {
        let (results, _) = watch::channel(Vec::new());
        let (phase, _) = watch::channel(FetchPhase::Idle);
        let (outcome, _) = watch::channel(None);
        Self {
            generation: AtomicU64::new(0),
            results,
            phase,
            outcome,
        }
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new generation and return it.
    fn advance(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish `items` only if `generation` is still current.
    ///
    /// The check runs while the channel's write lock is held, so a newer
    /// query either has not started yet (and will overwrite this result) or
    /// has already bumped the generation (and this result is dropped).
    fn publish_if_current(&self, generation: u64, items: Vec<String>) -> bool {
        self.results.send_if_modified(|current| {
            if self.current_generation() != generation {
                return false;
            }
            *current = items;
            true
        })
    }

    fn record_outcome_if_current(&self, generation: u64, outcome: FetchOutcome) {
        self.outcome.send_if_modified(|current| {
            if self.current_generation() != generation {
                return false;
            }
            *current = Some(outcome);
            true
        });
    }

    fn set_phase_if_current(&self, generation: u64, phase: FetchPhase) {
        self.phase.send_if_modified(|current| {
            if self.current_generation() != generation || *current == phase {
                return false;
            }
            *current = phase;
            true
        });
    }
}

/// Bookkeeping for the one fetch that may be outstanding.
#[derive(Debug)]
struct PendingFetch {
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<FetchOutcome>,
}

/// Debounced address suggestion fetcher.
///
/// Owned by a single screen controller; edits arrive through
/// [`query`](Self::query) in order. At most one fetch is outstanding at any
/// time. Dropping the fetcher cancels it.
pub struct SuggestionFetcher {
    lookup: Arc<dyn AddressLookup>,
    config: FetcherConfig,
    shared: Arc<Shared>,
    pending: Option<PendingFetch>,
}

impl SuggestionFetcher {
    pub fn new(lookup: Arc<dyn AddressLookup>, config: FetcherConfig) -> Self {
        Self {
            lookup,
            config,
            shared: Arc::new(Shared::new()),
            pending: None,
        }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Subscribe to published suggestion lists.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.shared.results.subscribe()
    }

    /// Subscribe to phase changes.
    pub fn subscribe_phase(&self) -> watch::Receiver<FetchPhase> {
        self.shared.phase.subscribe()
    }

    /// The most recently published list.
    pub fn suggestions(&self) -> Vec<String> {
        self.shared.results.borrow().clone()
    }

    pub fn phase(&self) -> FetchPhase {
        *self.shared.phase.borrow()
    }

    /// How the fetch for the latest query ended.
    ///
    /// `None` while that fetch is still pending, and for queries too short
    /// to be fetched. After [`shutdown`](Self::shutdown) cancels a pending
    /// fetch this is [`FetchOutcome::Superseded`].
    pub fn last_outcome(&self) -> Option<FetchOutcome> {
        self.shared.outcome.borrow().clone()
    }

    /// Generation of the latest query; increases with every edit.
    pub fn generation(&self) -> u64 {
        self.shared.current_generation()
    }

    /// Feed the latest text of the query field.
    ///
    /// Cancels whatever is pending. Short queries clear the list right away;
    /// anything else is fetched once the debounce window passes without
    /// another edit.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime, like [`tokio::spawn`].
    pub fn query(&mut self, text: &str) {
        let generation = self.shared.advance();
        self.cancel_pending();
        self.shared.outcome.send_replace(None);

        let trimmed = text.trim();
        if trimmed.chars().count() < self.config.min_query_chars {
            tracing::trace!(generation, "Query too short, clearing suggestions");
            self.shared.phase.send_replace(FetchPhase::Idle);
            self.shared.results.send_replace(Vec::new());
            return;
        }

        self.shared.phase.send_replace(FetchPhase::Debouncing);

        let request = AddressQuery {
            query: trimmed.to_string(),
            count: self.config.max_results,
        };
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_fetch(
            Arc::clone(&self.lookup),
            Arc::clone(&self.shared),
            request,
            generation,
            self.config.debounce,
            cancel.clone(),
        ));

        self.pending = Some(PendingFetch {
            generation,
            cancel,
            task,
        });
    }

    /// Cancel anything pending and wait for the task to exit.
    ///
    /// Nothing is published after this returns.
    pub async fn shutdown(&mut self) {
        self.shared.advance();
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            match pending.task.await {
                Ok(FetchOutcome::Superseded) => {
                    self.shared.outcome.send_replace(Some(FetchOutcome::Superseded));
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Suggestion fetch task failed"),
            }
        }
        self.shared.phase.send_replace(FetchPhase::Idle);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::trace!(generation = pending.generation, "Cancelling superseded fetch");
            pending.cancel.cancel();
        }
    }
}

impl Drop for SuggestionFetcher {
    fn drop(&mut self) {
        self.shared.advance();
        self.cancel_pending();
    }
}

/// Wait out the debounce window, perform the lookup, publish the result.
async fn run_fetch(
    lookup: Arc<dyn AddressLookup>,
    shared: Arc<Shared>,
    request: AddressQuery,
    generation: u64,
    debounce: Duration,
    cancel: CancellationToken,
) -> FetchOutcome {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => return FetchOutcome::Superseded,
        _ = tokio::time::sleep(debounce) => {}
    }

    shared.set_phase_if_current(generation, FetchPhase::InFlight);
    tracing::debug!(generation, query = %request.query, count = request.count, "Fetching address suggestions");

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => return FetchOutcome::Superseded,
        result = lookup.suggest(&request) => result,
    };

    let (items, outcome) = match result {
        Ok(suggestions) => {
            let items: Vec<String> = suggestions.into_iter().map(|s| s.value).collect();
            let count = items.len();
            (items, FetchOutcome::Resolved { count })
        }
        Err(e) => {
            tracing::warn!(generation, query = %request.query, error = %e, "Address lookup failed");
            (Vec::new(), FetchOutcome::Failed)
        }
    };

    if cancel.is_cancelled() || !shared.publish_if_current(generation, items) {
        tracing::debug!(generation, "Dropping result of superseded fetch");
        return FetchOutcome::Superseded;
    }
    shared.record_outcome_if_current(generation, outcome.clone());
    shared.set_phase_if_current(generation, FetchPhase::Idle);

    tracing::debug!(generation, ?outcome, "Address suggestions published");
    outcome
}
