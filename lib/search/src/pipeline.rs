//! Live search pipeline
//!
//! Turns a stream of raw query text and a stream of collection snapshots
//! into a stream of ranked result lists.
//!
//! ```text
//!   set_query ──> debounce ──┐
//!                            ├──> ranking pass (blocking pool, rayon) ──> SearchState
//!   observe_all ─────────────┘
//! ```
//!
//! Query edits wait out the debounce window; collection changes re-rank
//! immediately with the last settled query. Every new pass bumps the shared
//! generation, which cancels whatever pass was still running.

use crate::config::SearchConfig;
use crate::ranking::{Generation, RankedList, RankingPass};
use crate::state::{SearchHit, SearchResults, SearchState};
use crate::stats::{PipelineCounters, PipelineStats};
use rolodex_core::{ContactSource, Error, Result, SnapshotUpdate};
use rolodex_similarity::ContactMatcher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Handle to a running search pipeline.
///
/// Dropping the handle stops the event loop and cancels any pass in flight.
pub struct SearchPipeline {
    query_tx: watch::Sender<String>,
    results_rx: watch::Receiver<SearchState>,
    generation: Generation,
    counters: Arc<PipelineCounters>,
    task: JoinHandle<()>,
}

impl SearchPipeline {
    /// Start a pipeline over `source`. Must be called from within a Tokio
    /// runtime.
    ///
    /// The initial state (revision 0) lists the whole collection, as if the
    /// empty query had already settled.
    pub fn spawn<S: ContactSource + ?Sized>(source: &S, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::Runtime(format!("search pipeline needs a Tokio runtime: {e}")))?;

        let snapshots = source.observe_all();
        let latest = snapshots.borrow().clone();
        let initial = settle_without_scoring(0, String::new(), &latest);

        let counters = Arc::new(PipelineCounters::new());
        counters.emitted();

        let (query_tx, query_rx) = watch::channel(String::new());
        let (results_tx, results_rx) = watch::channel(initial);
        let generation = Generation::new();

        let event_loop = EventLoop {
            results: results_tx,
            matcher: ContactMatcher::new(config.matcher.clone()),
            debounce: config.debounce(),
            chunk_size: config.chunk_size,
            generation: generation.clone(),
            counters: counters.clone(),
            settled_query: String::new(),
            latest,
            revision: 0,
        };
        let task = runtime.spawn(event_loop.run(query_rx, snapshots));

        debug!(debounce_ms = config.debounce_ms, "Search pipeline started");

        Ok(Self {
            query_tx,
            results_rx,
            generation,
            counters,
            task,
        })
    }

    /// Feed the latest raw query text. Cheap; call it on every keystroke.
    pub fn set_query(&self, text: impl Into<String>) {
        self.query_tx.send_replace(text.into());
    }

    /// Subscribe to result states. The receiver starts at the current state.
    pub fn observe_results(&self) -> watch::Receiver<SearchState> {
        self.results_rx.clone()
    }

    pub fn current(&self) -> SearchState {
        self.results_rx.borrow().clone()
    }

    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    /// Submit a query and wait for the state that answers it
    pub async fn search(&self, query: impl Into<String>) -> Result<SearchState> {
        let query = query.into();
        let mut rx = self.observe_results();
        let after = rx.borrow_and_update().revision();
        self.set_query(query.clone());

        let state = rx
            .wait_for(|state| state.revision() > after && state.query() == query)
            .await
            .map_err(|_| Error::Runtime("search pipeline stopped".to_string()))?;
        Ok(state.clone())
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.generation.advance();
        self.task.abort();
    }
}

/// Empty queries and source failures need no pass
fn settle_without_scoring(revision: u64, query: String, latest: &SnapshotUpdate) -> SearchState {
    match latest {
        Ok(snapshot) => SearchState::Ready(SearchResults::listing(revision, query, snapshot)),
        Err(e) => SearchState::Degraded {
            revision,
            query,
            reason: e.reason.clone(),
        },
    }
}

struct EventLoop {
    results: watch::Sender<SearchState>,
    matcher: ContactMatcher,
    debounce: Duration,
    chunk_size: usize,
    generation: Generation,
    counters: Arc<PipelineCounters>,
    settled_query: String,
    latest: SnapshotUpdate,
    revision: u64,
}

impl EventLoop {
    async fn run(
        mut self,
        mut queries: watch::Receiver<String>,
        mut snapshots: watch::Receiver<SnapshotUpdate>,
    ) {
        let (pass_tx, mut pass_rx) = mpsc::unbounded_channel::<RankedList>();
        let mut deadline: Option<Instant> = None;
        // The edit the deadline belongs to. A newer edit not yet seen by the
        // query branch must wait for its own window.
        let mut pending_query = String::new();
        let mut source_open = true;

        loop {
            tokio::select! {
                changed = queries.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    pending_query = queries.borrow_and_update().clone();
                    // A pending edit makes any running pass moot
                    self.generation.advance();
                    deadline = Some(Instant::now() + self.debounce);
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.settled_query = std::mem::take(&mut pending_query);
                    self.evaluate(&pass_tx);
                }
                changed = snapshots.changed(), if source_open => {
                    if changed.is_err() {
                        warn!("Contact source closed, keeping last known collection");
                        source_open = false;
                        continue;
                    }
                    self.latest = snapshots.borrow_and_update().clone();
                    self.evaluate(&pass_tx);
                }
                Some(list) = pass_rx.recv() => self.accept(list),
            }
        }

        debug!("Search pipeline stopped");
    }

    /// Settle the current query against the latest collection
    fn evaluate(&mut self, pass_tx: &mpsc::UnboundedSender<RankedList>) {
        let generation = self.generation.advance();

        let snapshot = match &self.latest {
            Ok(snapshot) if !self.settled_query.trim().is_empty() => snapshot.clone(),
            latest => {
                let state =
                    settle_without_scoring(self.revision + 1, self.settled_query.clone(), latest);
                self.publish(state);
                return;
            }
        };

        debug!(
            generation,
            query = %self.settled_query,
            contacts = snapshot.len(),
            "Starting ranking pass"
        );
        self.counters.pass_started();

        let pass = RankingPass::new(
            self.generation.clone(),
            generation,
            self.settled_query.clone(),
            snapshot,
            self.matcher.clone(),
            self.chunk_size,
            self.counters.clone(),
        );
        let tx = pass_tx.clone();
        tokio::task::spawn_blocking(move || {
            if let Some(list) = pass.run() {
                let _ = tx.send(list);
            }
        });
    }

    /// Publish a finished pass unless a newer one has started since
    fn accept(&mut self, list: RankedList) {
        if self.generation.is_current(list.generation) {
            self.counters.pass_completed();
            self.emit_ranked(list);
        } else {
            debug!(generation = list.generation, "Discarding superseded ranking pass");
            self.counters.pass_superseded();
        }
    }

    fn emit_ranked(&mut self, list: RankedList) {
        let hits = list
            .ranked
            .into_iter()
            .map(|ranked| SearchHit {
                contact: ranked.contact,
                score: Some(ranked.score),
            })
            .collect();

        let state = SearchState::Ready(SearchResults {
            revision: self.revision + 1,
            query: list.query,
            snapshot_version: list.snapshot_version,
            hits,
        });
        self.publish(state);
    }

    fn publish(&mut self, state: SearchState) {
        self.revision = state.revision();
        if let SearchState::Degraded { reason, .. } = &state {
            warn!(%reason, "Search degraded, contact source unavailable");
        }
        self.counters.emitted();
        self.results.send_replace(state);
    }
}
