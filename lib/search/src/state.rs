//! What the pipeline publishes to its observers.

use rolodex_core::{Contact, ContactSnapshot};

/// One row of a result list
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub contact: Contact,
    /// Rank score of a fuzzy match. `None` for the unfiltered listing.
    pub score: Option<f32>,
}

/// A settled, ordered result list
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub revision: u64,
    pub query: String,
    pub snapshot_version: u64,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// The whole collection in source order, unscored
    pub fn listing(revision: u64, query: impl Into<String>, snapshot: &ContactSnapshot) -> Self {
        Self {
            revision,
            query: query.into(),
            snapshot_version: snapshot.version(),
            hits: snapshot
                .iter()
                .map(|contact| SearchHit {
                    contact: contact.clone(),
                    score: None,
                })
                .collect(),
        }
    }

    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.hits.iter().map(|hit| &hit.contact)
    }

    pub fn names(&self) -> Vec<&str> {
        self.contacts().map(|c| c.name.as_str()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Latest state of a search pipeline.
///
/// Every published state carries a revision one higher than the previous
/// one, so observers can tell a re-emission of identical results apart from
/// no emission at all.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Ready(SearchResults),
    /// The contact source failed. Replaces the list until the source recovers.
    Degraded {
        revision: u64,
        query: String,
        reason: String,
    },
}

impl SearchState {
    pub fn revision(&self) -> u64 {
        match self {
            SearchState::Ready(results) => results.revision,
            SearchState::Degraded { revision, .. } => *revision,
        }
    }

    /// The settled query this state answers
    pub fn query(&self) -> &str {
        match self {
            SearchState::Ready(results) => &results.query,
            SearchState::Degraded { query, .. } => query,
        }
    }

    pub fn results(&self) -> Option<&SearchResults> {
        match self {
            SearchState::Ready(results) => Some(results),
            SearchState::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchState::Degraded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keeps_source_order() {
        let snapshot = ContactSnapshot::new(
            7,
            vec![
                Contact::new("Arya", "1").with_id(2),
                Contact::new("Jon", "2").with_id(1),
            ],
        );
        let results = SearchResults::listing(3, "", &snapshot);
        assert_eq!(results.names(), vec!["Arya", "Jon"]);
        assert_eq!(results.snapshot_version, 7);
        assert!(results.hits.iter().all(|h| h.score.is_none()));
    }

    #[test]
    fn test_state_accessors() {
        let degraded = SearchState::Degraded {
            revision: 4,
            query: "jon".into(),
            reason: "disk gone".into(),
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.revision(), 4);
        assert_eq!(degraded.query(), "jon");
        assert!(degraded.results().is_none());

        let ready = SearchState::Ready(SearchResults::listing(5, "", &ContactSnapshot::empty()));
        assert!(!ready.is_degraded());
        assert_eq!(ready.revision(), 5);
        assert!(ready.results().unwrap().is_empty());
    }
}
