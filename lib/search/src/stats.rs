use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub passes_started: u64,
    pub passes_completed: u64,
    pub passes_superseded: u64,
    pub contacts_scored: u64,
    pub emitted: u64,
}

/// Live counters shared between the event loop and ranking passes
#[derive(Debug, Default)]
pub struct PipelineCounters {
    passes_started: AtomicU64,
    passes_completed: AtomicU64,
    passes_superseded: AtomicU64,
    contacts_scored: AtomicU64,
    emitted: AtomicU64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pass_started(&self) {
        self.passes_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pass_completed(&self) {
        self.passes_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pass_superseded(&self) {
        self.passes_superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn scored(&self, n: usize) {
        self.contacts_scored.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub(crate) fn emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            passes_started: self.passes_started.load(Ordering::Relaxed),
            passes_completed: self.passes_completed.load(Ordering::Relaxed),
            passes_superseded: self.passes_superseded.load(Ordering::Relaxed),
            contacts_scored: self.contacts_scored.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
        }
    }
}
