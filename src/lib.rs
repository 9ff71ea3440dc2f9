//! # Rolodex
//!
//! A contact book with typo-tolerant live search.
//!
//! Rolodex ranks contacts against a query with a composite string
//! similarity (edit distance, longest common substring and Jaro-Winkler),
//! and keeps the ranked list up to date as the user types and as the
//! collection changes.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install rolodex
//! rolodex --seed list
//! rolodex search "kimberle turlingtn"
//! rolodex interactive
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use rolodex::prelude::*;
//!
//! # async fn demo() -> Result<()> {
//! let store = ContactStore::new();
//! store.insert(Contact::new("Jon Snow", "+1 555 1234"))?;
//!
//! let pipeline = SearchPipeline::spawn(&store, SearchConfig::default())?;
//! let mut results = pipeline.observe_results();
//!
//! pipeline.set_query("j");
//! pipeline.set_query("jo");
//! pipeline.set_query("jon sn");
//! results.changed().await.ok();
//! if let Some(results) = results.borrow().results() {
//!     println!("{:?}", results.names());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`rolodex-core`](https://docs.rs/rolodex-core) - Contact records, snapshots, the observable store
//! - [`rolodex-similarity`](https://docs.rs/rolodex-similarity) - Similarity scorer and contact matcher
//! - [`rolodex-search`](https://docs.rs/rolodex-search) - Debounced, cancellable ranking pipeline
//! - [`rolodex-storage`](https://docs.rs/rolodex-storage) - WAL, dump and backups

pub mod seed;

// Re-export core types
pub use rolodex_core::{
    Contact, ContactId, ContactSnapshot, ContactSource, ContactStore, Error, Result,
    SnapshotUpdate, SourceError,
};

// Re-export matching
pub use rolodex_similarity::{
    similarity, ContactMatcher, FieldScores, MatchMode, MatcherConfig, RankedContact,
    ScoreWeights,
};

// Re-export search
pub use rolodex_search::{
    PipelineStats, SearchConfig, SearchHit, SearchPipeline, SearchResults, SearchState,
};

// Re-export storage
pub use rolodex_storage::{BackupDescription, StorageManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Contact, ContactId, ContactMatcher, ContactSnapshot, ContactSource, ContactStore, Error,
        MatchMode, MatcherConfig, Result, SearchConfig, SearchPipeline, SearchState,
        StorageManager,
    };
}

/// The individual similarity metrics
pub mod scoring {
    pub use rolodex_similarity::distance::{
        distance_score, jaro, jaro_winkler_score, levenshtein_distance, longest_common_substring,
        similarity, substring_score, weighted_similarity,
    };
}
