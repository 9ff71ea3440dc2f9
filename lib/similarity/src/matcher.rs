//! Contact matcher
//!
//! Applies the composite similarity to a contact's searchable fields (name
//! and phone number) and turns the field scores into a match decision and a
//! rank score.

use crate::config::{ConfigError, MatchMode, MatcherConfig};
use crate::distance::{fold_case, weighted_similarity};
use rolodex_core::Contact;

/// Per-field similarity of a contact against a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScores {
    pub name: f32,
    pub phone: f32,
}

impl FieldScores {
    /// The better of the two field scores
    #[inline]
    pub fn best(&self) -> f32 {
        self.name.max(self.phone)
    }
}

/// A contact that passed the matcher, with its rank score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedContact {
    pub contact: Contact,
    pub score: f32,
}

/// Matches contacts against queries using configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct ContactMatcher {
    config: MatcherConfig,
}

impl ContactMatcher {
    /// Create a matcher without validating the configuration
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Create a matcher, rejecting out-of-range thresholds and unusable weights
    pub fn try_new(config: MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Similarity of the query to the contact's name and phone number
    pub fn score(&self, contact: &Contact, query: &str) -> FieldScores {
        let query = query.trim();
        match self.config.mode {
            MatchMode::Fuzzy => FieldScores {
                name: weighted_similarity(query, &contact.name, &self.config.weights),
                phone: weighted_similarity(query, &contact.phone_number, &self.config.weights),
            },
            MatchMode::Substring => {
                let hit = if contains_query(contact, query) { 1.0 } else { 0.0 };
                FieldScores {
                    name: hit,
                    phone: hit,
                }
            }
        }
    }

    /// Whether the contact should appear in the results for this query.
    /// A blank query matches nothing.
    pub fn is_match(&self, contact: &Contact, query: &str) -> bool {
        self.evaluate(contact, query).is_some()
    }

    /// Sort key: the better of the name and phone scores, thresholds ignored
    pub fn rank_score(&self, contact: &Contact, query: &str) -> f32 {
        self.score(contact, query).best()
    }

    /// Score the contact once and return its rank score if it matches
    pub fn evaluate(&self, contact: &Contact, query: &str) -> Option<f32> {
        if query.trim().is_empty() {
            return None;
        }

        let scores = self.score(contact, query);
        let matched = match self.config.mode {
            MatchMode::Fuzzy => {
                scores.name > self.config.name_threshold
                    || scores.phone > self.config.phone_threshold
            }
            MatchMode::Substring => scores.best() > 0.0,
        };

        matched.then(|| scores.best())
    }

    /// Filter the contacts down to matches and order them by rank score
    pub fn rank(&self, query: &str, contacts: &[Contact]) -> Vec<RankedContact> {
        let mut ranked: Vec<RankedContact> = contacts
            .iter()
            .filter_map(|contact| {
                self.evaluate(contact, query).map(|score| RankedContact {
                    contact: contact.clone(),
                    score,
                })
            })
            .collect();
        sort_ranked(&mut ranked);
        ranked
    }
}

/// Sort by score descending. The sort is stable, so equal scores keep the
/// order the contacts had in the collection.
pub fn sort_ranked(ranked: &mut [RankedContact]) {
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Literal matching: the query must appear, ignoring case, in the name and
/// phone number written together with or without a separating space, with
/// the name's spaces kept or removed.
pub fn contains_query(contact: &Contact, query: &str) -> bool {
    let query = fold_case(query);
    let name = fold_case(&contact.name);
    let phone = fold_case(&contact.phone_number);
    let compact_name = name.replace(' ', "");

    [
        format!("{}{}", name, phone),
        format!("{} {}", name, phone),
        format!("{}{}", compact_name, phone),
        format!("{} {}", compact_name, phone),
    ]
    .iter()
    .any(|combination| combination.contains(&query))
}
