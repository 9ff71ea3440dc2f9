//! Matcher configuration
//!
//! Thresholds and sub-score weights are tunable. The defaults (0.55 for
//! names, 0.65 for phone numbers, equal weights) preserve the behaviour the
//! contact list has always had; they are not known to be optimal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum name similarity for a contact to match
pub const DEFAULT_NAME_THRESHOLD: f32 = 0.55;

/// Default minimum phone similarity for a contact to match.
/// Stricter than names: transposed digits look alike but dial someone else.
pub const DEFAULT_PHONE_THRESHOLD: f32 = 0.65;

/// Weights of the three sub-scores in the composite similarity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    #[serde(default = "default_weight")]
    pub edit_distance: f32,
    #[serde(default = "default_weight")]
    pub substring: f32,
    #[serde(default = "default_weight")]
    pub jaro_winkler: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl ScoreWeights {
    #[inline]
    pub fn total(&self) -> f32 {
        self.edit_distance + self.substring + self.jaro_winkler
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [
            ("edit_distance", self.edit_distance),
            ("substring", self.substring),
            ("jaro_winkler", self.jaro_winkler),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { field: name, value: weight });
            }
        }

        if self.total() <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            edit_distance: 1.0,
            substring: 1.0,
            jaro_winkler: 1.0,
        }
    }
}

/// How a query is compared against a contact
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Thresholded composite similarity, ranked by score
    #[default]
    Fuzzy,
    /// Case-insensitive containment in the name/phone combinations
    Substring,
}

impl std::str::FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fuzzy" => Ok(MatchMode::Fuzzy),
            "substring" => Ok(MatchMode::Substring),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    #[serde(default = "default_name_threshold")]
    pub name_threshold: f32,

    #[serde(default = "default_phone_threshold")]
    pub phone_threshold: f32,

    #[serde(default)]
    pub weights: ScoreWeights,

    #[serde(default)]
    pub mode: MatchMode,
}

fn default_name_threshold() -> f32 {
    DEFAULT_NAME_THRESHOLD
}

fn default_phone_threshold() -> f32 {
    DEFAULT_PHONE_THRESHOLD
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            name_threshold: DEFAULT_NAME_THRESHOLD,
            phone_threshold: DEFAULT_PHONE_THRESHOLD,
            weights: ScoreWeights::default(),
            mode: MatchMode::Fuzzy,
        }
    }
}

impl MatcherConfig {
    /// Check thresholds lie in [0, 1] and the weights are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("name_threshold", self.name_threshold),
            ("phone_threshold", self.phone_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        self.weights.validate()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f32 },

    #[error("Weight '{field}' must be finite and not negative, got {value}")]
    InvalidWeight { field: &'static str, value: f32 },

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Unknown match mode '{0}' (expected 'fuzzy' or 'substring')")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MatcherConfig::default();
        assert_eq!(config.name_threshold, 0.55);
        assert_eq!(config.phone_threshold, 0.65);
        assert_eq!(config.weights.total(), 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = MatcherConfig {
            phone_threshold: 1.5,
            ..MatcherConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                field: "phone_threshold",
                value: 1.5
            })
        );

        let config = MatcherConfig {
            name_threshold: f32::NAN,
            ..MatcherConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_weight_validation() {
        let negative = ScoreWeights {
            substring: -0.5,
            ..ScoreWeights::default()
        };
        assert_eq!(
            negative.validate(),
            Err(ConfigError::InvalidWeight {
                field: "substring",
                value: -0.5
            })
        );

        let infinite = ScoreWeights {
            jaro_winkler: f32::INFINITY,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            infinite.validate(),
            Err(ConfigError::InvalidWeight {
                field: "jaro_winkler",
                ..
            })
        ));

        let nan = ScoreWeights {
            edit_distance: f32::NAN,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigError::InvalidWeight {
                field: "edit_distance",
                ..
            })
        ));

        let zero = ScoreWeights {
            edit_distance: 0.0,
            substring: 0.0,
            jaro_winkler: 0.0,
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTotalWeight));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: MatcherConfig =
            serde_json::from_str(r#"{"name_threshold": 0.4, "mode": "substring"}"#).unwrap();
        assert_eq!(config.name_threshold, 0.4);
        assert_eq!(config.phone_threshold, DEFAULT_PHONE_THRESHOLD);
        assert_eq!(config.mode, MatchMode::Substring);
        assert_eq!(config.weights, ScoreWeights::default());
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("Fuzzy".parse::<MatchMode>(), Ok(MatchMode::Fuzzy));
        assert_eq!("substring".parse::<MatchMode>(), Ok(MatchMode::Substring));
        assert!("regex".parse::<MatchMode>().is_err());
    }
}
