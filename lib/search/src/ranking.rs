//! A single ranking pass over a snapshot.
//!
//! Passes run on the blocking pool and fan the snapshot out over rayon in
//! fixed-size chunks. Before each chunk the pass compares its generation
//! with the shared counter and gives up as soon as a newer pass exists, so
//! a superseded pass stops burning CPU and never produces output.

use crate::stats::PipelineCounters;
use rayon::prelude::*;
use rolodex_core::ContactSnapshot;
use rolodex_similarity::{sort_ranked, ContactMatcher, RankedContact};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic pass counter. Bumping it invalidates every older pass.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Start a new generation and return it
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Output of a pass that ran to completion
#[derive(Debug, Clone)]
pub struct RankedList {
    pub generation: u64,
    pub query: String,
    pub snapshot_version: u64,
    pub ranked: Vec<RankedContact>,
}

pub struct RankingPass {
    generation: u64,
    token: Generation,
    query: String,
    snapshot: ContactSnapshot,
    matcher: ContactMatcher,
    chunk_size: usize,
    counters: Arc<PipelineCounters>,
}

impl RankingPass {
    pub fn new(
        token: Generation,
        generation: u64,
        query: impl Into<String>,
        snapshot: ContactSnapshot,
        matcher: ContactMatcher,
        chunk_size: usize,
        counters: Arc<PipelineCounters>,
    ) -> Self {
        Self {
            generation,
            token,
            query: query.into(),
            snapshot,
            matcher,
            chunk_size: chunk_size.max(1),
            counters,
        }
    }

    #[inline]
    fn is_stale(&self) -> bool {
        !self.token.is_current(self.generation)
    }

    /// Score, filter and sort the snapshot. Returns `None` if a newer pass
    /// started before this one finished.
    pub fn run(self) -> Option<RankedList> {
        let chunks: Option<Vec<Vec<RankedContact>>> = self
            .snapshot
            .contacts()
            .par_chunks(self.chunk_size)
            .map(|chunk| {
                if self.is_stale() {
                    return None;
                }
                self.counters.scored(chunk.len());
                Some(
                    chunk
                        .iter()
                        .filter_map(|contact| {
                            self.matcher
                                .evaluate(contact, &self.query)
                                .map(|score| RankedContact {
                                    contact: contact.clone(),
                                    score,
                                })
                        })
                        .collect(),
                )
            })
            .collect();

        let Some(chunks) = chunks else {
            self.counters.pass_superseded();
            return None;
        };

        let mut ranked: Vec<RankedContact> = chunks.into_iter().flatten().collect();
        if self.is_stale() {
            self.counters.pass_superseded();
            return None;
        }
        sort_ranked(&mut ranked);

        Some(RankedList {
            generation: self.generation,
            query: self.query,
            snapshot_version: self.snapshot.version(),
            ranked,
        })
    }
}
