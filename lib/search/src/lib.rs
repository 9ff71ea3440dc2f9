//! # Rolodex Search
//!
//! Live, typo-tolerant contact search.
//!
//! A [`SearchPipeline`] observes a [`ContactSource`](rolodex_core::ContactSource)
//! and a stream of raw query text, and publishes a [`SearchState`] each time
//! a query settles or the collection changes.
//!
//! - Query edits are debounced (300 ms by default)
//! - Collection changes re-rank immediately with the last settled query
//! - Superseded ranking passes are cancelled and never emitted
//! - Source failures surface as [`SearchState::Degraded`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolodex_core::{Contact, ContactStore};
//! use rolodex_search::{SearchConfig, SearchPipeline};
//!
//! # async fn demo() -> rolodex_core::Result<()> {
//! let store = ContactStore::new();
//! store.insert(Contact::new("Jon Snow", "+1 555 1234"))?;
//!
//! let pipeline = SearchPipeline::spawn(&store, SearchConfig::default())?;
//! let state = pipeline.search("jon snwo").await?;
//! assert_eq!(state.results().unwrap().names(), vec!["Jon Snow"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pipeline;
pub mod ranking;
pub mod state;
pub mod stats;

pub use config::{SearchConfig, DEFAULT_CHUNK_SIZE, DEFAULT_DEBOUNCE_MS};
pub use pipeline::SearchPipeline;
pub use ranking::{Generation, RankedList, RankingPass};
pub use state::{SearchHit, SearchResults, SearchState};
pub use stats::{PipelineCounters, PipelineStats};
