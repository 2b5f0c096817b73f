//! Core types used throughout Steno

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized form of a token (or token run) used for equality during alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ComparisonKey {
    /// Lower-cased, punctuation-trimmed word
    Literal(String),
    /// Canonical decimal value of a numeral
    Number(String),
    /// Synonym group without a shared numeric value
    Group(String),
}

impl ComparisonKey {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.write_str(s),
            Self::Number(v) => write!(f, "NUM:{v}"),
            Self::Group(id) => write!(f, "GROUP:{id}"),
        }
    }
}

/// Half-open range of raw token indices consumed by one comparison item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One unit of comparison produced by the collapser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub key: ComparisonKey,
    /// Original tokens joined by a single space
    pub display: String,
    pub span: TokenSpan,
    pub is_synonym_span: bool,
}

impl ComparisonItem {
    /// A synonym span covering exactly one raw token
    pub fn is_single_token(&self) -> bool {
        self.span.len() == 1 && !self.display.contains(char::is_whitespace)
    }
}

/// One side of an aligned pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub span: TokenSpan,
}

impl From<&ComparisonItem> for Word {
    fn from(item: &ComparisonItem) -> Self {
        Self {
            text: item.display.clone(),
            span: item.span,
        }
    }
}

/// A single step of the reference/typed alignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AlignmentOp {
    /// Comparison keys are equal
    Match { reference: Word, typed: Word },
    /// Keys differ but the items were paired
    Substitute { reference: Word, typed: Word },
    /// Word typed that is absent from the reference
    Insert { typed: Word },
    /// Reference word the typist omitted
    Delete { reference: Word },
}

impl AlignmentOp {
    pub fn reference(&self) -> Option<&Word> {
        match self {
            Self::Match { reference, .. }
            | Self::Substitute { reference, .. }
            | Self::Delete { reference } => Some(reference),
            Self::Insert { .. } => None,
        }
    }

    pub fn typed(&self) -> Option<&Word> {
        match self {
            Self::Match { typed, .. } | Self::Substitute { typed, .. } | Self::Insert { typed } => {
                Some(typed)
            }
            Self::Delete { .. } => None,
        }
    }
}

/// Mistake taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    Correct,
    Omission,
    Extra,
    Spelling,
    Capitalization,
    Punctuation,
}

impl MistakeKind {
    /// Single-character code used in edit vectors
    pub fn as_char(&self) -> char {
        match self {
            Self::Correct => 'C',
            Self::Omission => 'O',
            Self::Extra => 'E',
            Self::Spelling => 'S',
            Self::Capitalization => 'K',
            Self::Punctuation => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::Correct),
            'O' => Some(Self::Omission),
            'E' => Some(Self::Extra),
            'S' => Some(Self::Spelling),
            'K' => Some(Self::Capitalization),
            'P' => Some(Self::Punctuation),
            _ => None,
        }
    }

    pub fn all() -> &'static [MistakeKind] {
        &[
            MistakeKind::Correct,
            MistakeKind::Omission,
            MistakeKind::Extra,
            MistakeKind::Spelling,
            MistakeKind::Capitalization,
            MistakeKind::Punctuation,
        ]
    }

    pub fn is_mistake(&self) -> bool {
        !matches!(self, Self::Correct)
    }
}

/// An alignment step annotated with its mistake classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakeRecord {
    pub op: AlignmentOp,
    pub kind: MistakeKind,
    /// Penalty applied to this record (0, 0.5 or 1)
    pub weight: f64,
    /// Reference word appears in the caller's previously corrected list
    #[serde(default)]
    pub previously_corrected: bool,
}

/// Tallies per mistake kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCounts {
    pub correct: u32,
    pub omission: u32,
    pub extra: u32,
    pub spelling: u32,
    pub capitalization: u32,
    pub punctuation: u32,
}

impl MistakeCounts {
    pub fn increment(&mut self, kind: MistakeKind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: MistakeKind) -> u32 {
        match kind {
            MistakeKind::Correct => self.correct,
            MistakeKind::Omission => self.omission,
            MistakeKind::Extra => self.extra,
            MistakeKind::Spelling => self.spelling,
            MistakeKind::Capitalization => self.capitalization,
            MistakeKind::Punctuation => self.punctuation,
        }
    }

    /// Number of records that are mistakes of any kind
    pub fn total_mistakes(&self) -> u32 {
        self.omission + self.extra + self.spelling + self.capitalization + self.punctuation
    }

    fn slot(&mut self, kind: MistakeKind) -> &mut u32 {
        match kind {
            MistakeKind::Correct => &mut self.correct,
            MistakeKind::Omission => &mut self.omission,
            MistakeKind::Extra => &mut self.extra,
            MistakeKind::Spelling => &mut self.spelling,
            MistakeKind::Capitalization => &mut self.capitalization,
            MistakeKind::Punctuation => &mut self.punctuation,
        }
    }
}

/// Correct/wrong pair collected for downstream aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub correct: String,
    pub wrong: String,
}

/// Omission immediately paired with an insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub omitted: String,
    pub added: String,
}

/// Concrete mistakes collected alongside the score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentMistakes {
    pub spelling: Vec<WordPair>,
    pub capitalization: Vec<WordPair>,
    pub replacements: Vec<Replacement>,
}

/// Complete outcome of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub operations: Vec<MistakeRecord>,
    pub counts: MistakeCounts,
    pub reference_word_count: usize,
    pub typed_word_count: usize,
    pub elapsed_seconds: f64,
    /// Percentage, rounded to 2 decimals
    pub accuracy: f64,
    /// Words per minute, rounded to 2 decimals
    pub typing_speed_wpm: f64,
    pub mistake_score: f64,
    /// Percentage, rounded to 2 decimals
    pub mistake_percent: f64,
    pub full_mistakes: u32,
    pub half_mistakes: u32,
    pub student_mistakes: StudentMistakes,
}
