//! Grading entry points
//!
//! A [`Grader`] owns a validated configuration and a synonym index built once
//! from the built-in and caller-supplied groups. Each call to [`Grader::grade`]
//! keeps its matrix, steps and tallies local, so one grader can serve many
//! comparisons, including from several threads.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alignment::align_steps;
use crate::collapse::Collapser;
use crate::config::ComparisonConfig;
use crate::error::{Error, Result};
use crate::normalize::{clean_word, tokenize};
use crate::scoring::{Classifier, summarize};
use crate::synonyms::{SynonymGroup, SynonymIndex};
use crate::types::ComparisonResult;

/// Compares typed attempts against reference passages
#[derive(Debug, Clone)]
pub struct Grader {
    config: ComparisonConfig,
    index: SynonymIndex,
    known_corrections: HashSet<String>,
}

impl Grader {
    /// Create a grader; the built-in synonym groups are always included
    pub fn new(config: ComparisonConfig, groups: &[SynonymGroup]) -> Self {
        Self {
            config,
            index: SynonymIndex::with_builtins(groups),
            known_corrections: HashSet::new(),
        }
    }

    /// Words the student has corrected before; matching spelling mistakes are flagged
    pub fn with_known_corrections<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.known_corrections.extend(
            words
                .into_iter()
                .map(|w| clean_word(w.as_ref()))
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn synonym_index(&self) -> &SynonymIndex {
        &self.index
    }

    /// Grade one attempt
    ///
    /// Empty text on either side is not an error; it simply yields an alignment
    /// made only of omissions or extra words.
    pub fn grade(
        &self,
        reference: &str,
        typed: &str,
        elapsed_seconds: f64,
    ) -> Result<ComparisonResult> {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return Err(Error::InvalidInput(format!(
                "elapsed seconds must be a non-negative number, got {elapsed_seconds}"
            )));
        }

        let reference_tokens = tokenize(reference);
        let typed_tokens = tokenize(typed);

        let collapser = Collapser::new(&self.index);
        let reference_items = collapser.collapse(&reference_tokens);
        let typed_items = collapser.collapse(&typed_tokens);

        debug!(
            "Collapsed {} reference tokens into {} items, {} typed tokens into {} items",
            reference_tokens.len(),
            reference_items.len(),
            typed_tokens.len(),
            typed_items.len()
        );

        let steps = align_steps(&reference_items, &typed_items);
        let records = Classifier::new(&self.config, &self.known_corrections).classify(
            &reference_items,
            &typed_items,
            &steps,
        );
        let result = summarize(
            records,
            reference_tokens.len(),
            typed_tokens.len(),
            elapsed_seconds,
        );

        debug!(
            "Graded attempt: {} mistakes, score {}, accuracy {}%",
            result.counts.total_mistakes(),
            result.mistake_score,
            result.accuracy
        );

        Ok(result)
    }
}

/// One self-contained comparison, as received at the message boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub reference_text: String,
    pub typed_text: String,
    #[serde(default)]
    pub elapsed_seconds: f64,
    #[serde(default)]
    pub config: ComparisonConfig,
    #[serde(default)]
    pub synonym_groups: Vec<SynonymGroup>,
    #[serde(default)]
    pub known_corrections: Vec<String>,
}

/// Grade a request with a grader built just for it
pub fn compare(request: &ComparisonRequest) -> Result<ComparisonResult> {
    Grader::new(request.config, &request.synonym_groups)
        .with_known_corrections(&request.known_corrections)
        .grade(
            &request.reference_text,
            &request.typed_text,
            request.elapsed_seconds,
        )
}

/// JSON in, JSON out
///
/// A request that fails to parse (including an unknown weight or mode) is a
/// configuration error and no comparison is attempted.
pub fn compare_json(request_json: &str) -> Result<String> {
    let request: ComparisonRequest = serde_json::from_str(request_json)
        .map_err(|e| Error::Config(format!("invalid comparison request: {e}")))?;
    let result = compare(&request)?;
    Ok(serde_json::to_string(&result)?)
}
