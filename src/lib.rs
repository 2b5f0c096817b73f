//! Steno - Dictation transcript grading engine
//!
//! Compares a typed transcription against a reference passage and reports every
//! omission, extra word, misspelling, capitalization and punctuation slip.
//! Spelled-out numbers, digit numerals and common abbreviations are collapsed
//! into equivalent comparison items before a word-level alignment, so "25" and
//! "twenty five" or "Mr." and "Mister" are not counted against the typist.

pub mod alignment;
pub mod collapse;
pub mod config;
pub mod error;
pub mod grader;
pub mod normalize;
pub mod numbers;
pub mod progress;
pub mod scoring;
pub mod synonyms;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Re-export the main engine components for convenience
pub use alignment::{Side, align, clean_text};
pub use collapse::Collapser;
pub use config::{ComparisonConfig, PunctuationConfig, PunctuationMode, Weight};
pub use grader::{ComparisonRequest, Grader, compare, compare_json};
pub use progress::{MistakeLibrary, OverallStats};
pub use scoring::edit_vector;
pub use synonyms::{SynonymGroup, SynonymIndex};
