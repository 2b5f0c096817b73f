//! Mistake classification and scoring
//!
//! Aligned steps are classified into mistake kinds, weighted from the
//! configuration and folded into a per-call [`Tally`]. A companion pass then
//! collects the concrete word pairs behind spelling and capitalization
//! mistakes, plus omission/insertion pairs read as replacements.

use std::collections::HashSet;

use strsim::levenshtein;

use crate::alignment::{Step, items_equal, to_op};
use crate::config::{ComparisonConfig, PunctuationMode};
use crate::normalize::{clean_word, last_punctuation, punctuation_core, strip_punctuation};
use crate::types::{
    AlignmentOp, ComparisonItem, ComparisonResult, MistakeCounts, MistakeKind, MistakeRecord,
    Replacement, StudentMistakes, WordPair,
};

/// Words this short never count as spelling near-misses
const SPELLING_MIN_LEN: usize = 4;

/// Largest edit distance still read as a misspelling
const SPELLING_MAX_DISTANCE: usize = 2;

/// True when two words differ by a small misspelling
///
/// Both punctuation-stripped forms must be at least four characters long and
/// within one or two edits of each other, ignoring case.
pub fn is_spelling_diff(a: &str, b: &str) -> bool {
    let a = strip_punctuation(a).to_lowercase();
    let b = strip_punctuation(b).to_lowercase();
    if a.chars().count() < SPELLING_MIN_LEN || b.chars().count() < SPELLING_MIN_LEN {
        return false;
    }
    (1..=SPELLING_MAX_DISTANCE).contains(&levenshtein(&a, &b))
}

/// Classifies aligned steps under one configuration
pub struct Classifier<'a> {
    config: &'a ComparisonConfig,
    known_corrections: &'a HashSet<String>,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ComparisonConfig, known_corrections: &'a HashSet<String>) -> Self {
        Self {
            config,
            known_corrections,
        }
    }

    fn punctuation_kind(&self, reference: &str, typed: &str) -> MistakeKind {
        match self.config.punctuation.mode {
            PunctuationMode::All => MistakeKind::Punctuation,
            PunctuationMode::FullStopOnly => {
                let r = last_punctuation(reference) == Some('.');
                let t = last_punctuation(typed) == Some('.');
                if r != t {
                    MistakeKind::Punctuation
                } else {
                    MistakeKind::Correct
                }
            }
        }
    }

    /// Punctuation, then case, then a near-miss spelling
    fn local_kind(&self, reference: &str, typed: &str) -> Option<MistakeKind> {
        let r = punctuation_core(reference);
        let t = punctuation_core(typed);
        if r == t {
            Some(self.punctuation_kind(reference, typed))
        } else if r.to_lowercase() == t.to_lowercase() {
            Some(MistakeKind::Capitalization)
        } else if is_spelling_diff(reference, typed) {
            Some(MistakeKind::Spelling)
        } else {
            None
        }
    }

    /// Kind of mistake for two items paired on the diagonal
    pub fn classify_pair(&self, reference: &ComparisonItem, typed: &ComparisonItem) -> MistakeKind {
        let (r, t) = (reference.display.as_str(), typed.display.as_str());

        if items_equal(reference, typed) {
            if r == t {
                return MistakeKind::Correct;
            }
            let one_to_one = reference.is_synonym_span
                && typed.is_synonym_span
                && reference.is_single_token()
                && typed.is_single_token();
            return match self.local_kind(r, t) {
                Some(MistakeKind::Spelling) if !one_to_one => MistakeKind::Correct,
                Some(kind) => kind,
                // numeral or synonym equivalence
                None => MistakeKind::Correct,
            };
        }

        let local = (!reference.is_synonym_span && !typed.is_synonym_span)
            || (reference.is_single_token() && typed.is_single_token());
        if local {
            self.local_kind(r, t).unwrap_or(MistakeKind::Spelling)
        } else {
            MistakeKind::Spelling
        }
    }

    fn record(&self, op: AlignmentOp, kind: MistakeKind) -> MistakeRecord {
        let previously_corrected = kind == MistakeKind::Spelling
            && op
                .reference()
                .is_some_and(|word| self.known_corrections.contains(&clean_word(&word.text)));
        MistakeRecord {
            op,
            kind,
            weight: self.config.weight_for(kind).value(),
            previously_corrected,
        }
    }

    /// Classify every step of an alignment, in order
    pub fn classify(
        &self,
        reference: &[ComparisonItem],
        typed: &[ComparisonItem],
        steps: &[Step],
    ) -> Vec<MistakeRecord> {
        steps
            .iter()
            .map(|&step| {
                let kind = match step {
                    Step::Pair {
                        reference: i,
                        typed: j,
                    } => self.classify_pair(&reference[i], &typed[j]),
                    Step::Insert { .. } => MistakeKind::Extra,
                    Step::Delete { .. } => MistakeKind::Omission,
                };
                self.record(to_op(step, reference, typed), kind)
            })
            .collect()
    }
}

/// Running totals for one comparison
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub counts: MistakeCounts,
    pub mistake_score: f64,
    pub full_mistakes: u32,
    pub half_mistakes: u32,
}

impl Tally {
    pub fn add(&mut self, record: &MistakeRecord) {
        self.counts.increment(record.kind);
        self.mistake_score += record.weight;
        if record.weight == 1.0 {
            self.full_mistakes += 1;
        } else if record.weight == 0.5 {
            self.half_mistakes += 1;
        }
    }

    pub fn from_records(records: &[MistakeRecord]) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.add(record);
        }
        tally
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mistake percentage against the reference length, capped at 100
pub fn mistake_percent(mistake_score: f64, reference_word_count: usize) -> f64 {
    let denominator = reference_word_count.max(1) as f64;
    (mistake_score / denominator * 100.0).min(100.0)
}

/// Accuracy percentage in `[0, 100]`
pub fn accuracy(mistake_score: f64, reference_word_count: usize) -> f64 {
    (100.0 - mistake_percent(mistake_score, reference_word_count)).clamp(0.0, 100.0)
}

/// Typed words per minute, or 0 when no time elapsed
pub fn typing_speed(typed_word_count: usize, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds > 0.0 {
        typed_word_count as f64 / (elapsed_seconds / 60.0)
    } else {
        0.0
    }
}

/// Concrete word pairs behind the mistakes, for downstream aggregation
pub fn collect_student_mistakes(records: &[MistakeRecord]) -> StudentMistakes {
    let mut mistakes = StudentMistakes::default();
    let mut i = 0;

    while i < records.len() {
        let next = records.get(i + 1).map(|r| &r.op);
        match (&records[i].op, next) {
            (AlignmentOp::Delete { reference }, Some(AlignmentOp::Insert { typed }))
            | (AlignmentOp::Insert { typed }, Some(AlignmentOp::Delete { reference })) => {
                mistakes.replacements.push(Replacement {
                    omitted: reference.text.clone(),
                    added: typed.text.clone(),
                });
                i += 2;
                continue;
            }
            _ => {}
        }

        let record = &records[i];
        if let (Some(reference), Some(typed)) = (record.op.reference(), record.op.typed()) {
            let pair = WordPair {
                correct: reference.text.clone(),
                wrong: typed.text.clone(),
            };
            match record.kind {
                MistakeKind::Spelling => mistakes.spelling.push(pair),
                MistakeKind::Capitalization => mistakes.capitalization.push(pair),
                _ => {}
            }
        }
        i += 1;
    }

    mistakes
}

/// Compact one-character-per-step trace of a classification
pub fn edit_vector(records: &[MistakeRecord]) -> String {
    records.iter().map(|r| r.kind.as_char()).collect()
}

/// Fold classified records into the final result
pub fn summarize(
    operations: Vec<MistakeRecord>,
    reference_word_count: usize,
    typed_word_count: usize,
    elapsed_seconds: f64,
) -> ComparisonResult {
    let tally = Tally::from_records(&operations);
    let student_mistakes = collect_student_mistakes(&operations);

    ComparisonResult {
        counts: tally.counts,
        reference_word_count,
        typed_word_count,
        elapsed_seconds,
        accuracy: round2(accuracy(tally.mistake_score, reference_word_count)),
        typing_speed_wpm: round2(typing_speed(typed_word_count, elapsed_seconds)),
        mistake_score: tally.mistake_score,
        mistake_percent: round2(mistake_percent(tally.mistake_score, reference_word_count)),
        full_mistakes: tally.full_mistakes,
        half_mistakes: tally.half_mistakes,
        student_mistakes,
        operations,
    }
}
