//! Grading configuration
//!
//! Every weight is drawn from a closed set, so an unrecognized value is rejected
//! while the configuration is parsed rather than silently defaulted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::MistakeKind;

/// Penalty applied to one mistake of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Weight {
    /// Mistake is reported but not penalized
    Zero,
    /// Half mistake (0.5)
    Half,
    /// Full mistake (1.0)
    Full,
}

impl Weight {
    pub fn value(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }

    pub fn all() -> &'static [Weight] {
        &[Weight::Zero, Weight::Half, Weight::Full]
    }
}

impl TryFrom<f64> for Weight {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if value == 0.0 {
            Ok(Self::Zero)
        } else if value == 0.5 {
            Ok(Self::Half)
        } else if value == 1.0 {
            Ok(Self::Full)
        } else {
            Err(Error::Config(format!(
                "weight must be one of 0, 0.5 or 1, got {value}"
            )))
        }
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.value()
    }
}

/// Which punctuation mismatches are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunctuationMode {
    /// Any trailing punctuation mismatch counts
    #[default]
    #[serde(rename = "all")]
    All,
    /// Only mismatches where exactly one side ends with a full stop count
    #[serde(rename = "fullstop-only")]
    FullStopOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationConfig {
    pub weight: Weight,
    #[serde(default)]
    pub mode: PunctuationMode,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            weight: Weight::Half,
            mode: PunctuationMode::All,
        }
    }
}

/// Per-kind mistake weights used when scoring an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ComparisonConfig {
    pub addition_weight: Weight,
    pub omission_weight: Weight,
    pub spelling_weight: Weight,
    pub capitalization_weight: Weight,
    pub punctuation: PunctuationConfig,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            addition_weight: Weight::Full,
            omission_weight: Weight::Full,
            spelling_weight: Weight::Half,
            capitalization_weight: Weight::Half,
            punctuation: PunctuationConfig::default(),
        }
    }
}

impl ComparisonConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Weight applied to a single mistake of the given kind
    pub fn weight_for(&self, kind: MistakeKind) -> Weight {
        match kind {
            MistakeKind::Correct => Weight::Zero,
            MistakeKind::Omission => self.omission_weight,
            MistakeKind::Extra => self.addition_weight,
            MistakeKind::Spelling => self.spelling_weight,
            MistakeKind::Capitalization => self.capitalization_weight,
            MistakeKind::Punctuation => self.punctuation.weight,
        }
    }

    /// Return a copy with one kind's weight replaced
    pub fn with_weight(mut self, kind: MistakeKind, weight: Weight) -> Self {
        match kind {
            MistakeKind::Correct => {}
            MistakeKind::Omission => self.omission_weight = weight,
            MistakeKind::Extra => self.addition_weight = weight,
            MistakeKind::Spelling => self.spelling_weight = weight,
            MistakeKind::Capitalization => self.capitalization_weight = weight,
            MistakeKind::Punctuation => self.punctuation.weight = weight,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComparisonConfig::default();
        assert_eq!(config.addition_weight, Weight::Full);
        assert_eq!(config.omission_weight, Weight::Full);
        assert_eq!(config.spelling_weight, Weight::Half);
        assert_eq!(config.capitalization_weight, Weight::Half);
        assert_eq!(config.punctuation.weight, Weight::Half);
        assert_eq!(config.punctuation.mode, PunctuationMode::All);
    }

    #[test]
    fn test_weight_from_f64() {
        assert_eq!(Weight::try_from(0.0).unwrap(), Weight::Zero);
        assert_eq!(Weight::try_from(0.5).unwrap(), Weight::Half);
        assert_eq!(Weight::try_from(1.0).unwrap(), Weight::Full);
        assert!(Weight::try_from(0.25).is_err());
        assert!(Weight::try_from(2.0).is_err());
        assert!(Weight::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "additionWeight": 1,
            "omissionWeight": 1,
            "spellingWeight": 0.5,
            "capitalizationWeight": 0,
            "punctuation": { "weight": 0.5, "mode": "fullstop-only" }
        }"#;
        let config = ComparisonConfig::from_json(json).unwrap();
        assert_eq!(config.capitalization_weight, Weight::Zero);
        assert_eq!(config.punctuation.mode, PunctuationMode::FullStopOnly);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = ComparisonConfig::from_json(r#"{ "spellingWeight": 1 }"#).unwrap();
        assert_eq!(config.spelling_weight, Weight::Full);
        assert_eq!(config.omission_weight, Weight::Full);
        assert_eq!(config.capitalization_weight, Weight::Half);
    }

    #[test]
    fn test_from_json_rejects_unknown_weight() {
        let err = ComparisonConfig::from_json(r#"{ "spellingWeight": 0.75 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let json = r#"{ "punctuation": { "weight": 1, "mode": "commas" } }"#;
        assert!(matches!(
            ComparisonConfig::from_json(json),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(ComparisonConfig::from_json(r#"{ "typoWeight": 1 }"#).is_err());
    }

    #[test]
    fn test_serialize_round_values() {
        let json = serde_json::to_value(ComparisonConfig::default()).unwrap();
        assert_eq!(json["spellingWeight"], 0.5);
        assert_eq!(json["punctuation"]["mode"], "all");
    }

    #[test]
    fn test_weight_for_and_with_weight() {
        let config = ComparisonConfig::default().with_weight(MistakeKind::Extra, Weight::Zero);
        assert_eq!(config.weight_for(MistakeKind::Extra), Weight::Zero);
        assert_eq!(config.weight_for(MistakeKind::Correct), Weight::Zero);
        assert_eq!(config.weight_for(MistakeKind::Omission), Weight::Full);
    }
}
