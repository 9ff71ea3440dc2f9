//! # Rolodex Similarity
//!
//! Typo-tolerant string similarity and contact matching.
//!
//! ## Features
//!
//! - **Composite scorer**: mean of Levenshtein, longest-common-substring and
//!   Jaro-Winkler similarity, all case-insensitive and defined for empty input
//! - **Contact matcher**: separate name and phone thresholds, max-of-fields
//!   rank score, stable descending ranking
//! - **Literal mode**: case-insensitive containment over name/phone combinations
//!
//! ## Example
//!
//! ```rust
//! use rolodex_core::Contact;
//! use rolodex_similarity::{similarity, ContactMatcher, MatcherConfig};
//!
//! assert_eq!(similarity("Jon Snow", "jon snow"), 1.0);
//!
//! let matcher = ContactMatcher::try_new(MatcherConfig::default()).unwrap();
//! let jon = Contact::new("Jon Snow", "+1 555 1234");
//! assert!(matcher.is_match(&jon, "jon"));
//! assert!(!matcher.is_match(&jon, "xyz123"));
//! ```
//!
//! ## Scoring
//!
//! ```text
//!   query ──┬──> edit distance ──────────┐
//!           ├──> longest common substring ├──> weighted mean ──> field score
//!   field ──┴──> jaro-winkler ───────────┘
//!
//!   max(name score, phone score) ──> rank score
//! ```

pub mod config;
pub mod distance;
pub mod matcher;

pub use config::{
    ConfigError, MatchMode, MatcherConfig, ScoreWeights, DEFAULT_NAME_THRESHOLD,
    DEFAULT_PHONE_THRESHOLD,
};
pub use distance::{
    distance_score, jaro, jaro_winkler_score, levenshtein_distance, longest_common_substring,
    similarity, substring_score, weighted_similarity,
};
pub use matcher::{contains_query, sort_ranked, ContactMatcher, FieldScores, RankedContact};
