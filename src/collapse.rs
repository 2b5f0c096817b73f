//! Collapsing raw tokens into comparison items
//!
//! A single left-to-right pass with no backtracking. At each position a synonym
//! span wins over a digit numeral, which wins over a spelled-out number run; any
//! other token becomes a literal item on its own.

use crate::normalize::{is_digit_token, normalize};
use crate::numbers::{number_value, parse_number_words_at};
use crate::synonyms::SynonymIndex;
use crate::types::{ComparisonItem, ComparisonKey, TokenSpan};

pub struct Collapser<'a> {
    index: &'a SynonymIndex,
}

impl<'a> Collapser<'a> {
    pub fn new(index: &'a SynonymIndex) -> Self {
        Self { index }
    }

    pub fn collapse<S: AsRef<str>>(&self, raw: &[S]) -> Vec<ComparisonItem> {
        let norm: Vec<String> = raw.iter().map(|t| normalize(t.as_ref())).collect();
        let mut items = Vec::with_capacity(norm.len());
        let mut i = 0;

        while i < norm.len() {
            let item = if let Some(m) = self.index.match_at(&norm, i) {
                let span = TokenSpan::new(i, i + m.len);
                let numeric = number_value(&norm[span.start..span.end])
                    .or_else(|| m.group_number.map(str::to_string));
                ComparisonItem {
                    key: match numeric {
                        Some(value) => ComparisonKey::Number(value),
                        None => ComparisonKey::Group(m.group_id.to_string()),
                    },
                    display: join_display(raw, span),
                    span,
                    is_synonym_span: true,
                }
            } else if is_digit_token(&norm[i]) {
                literal_item(raw, i, ComparisonKey::Number(norm[i].clone()))
            } else if let Some(run) = parse_number_words_at(&norm, i) {
                let span = TokenSpan::new(i, i + run.len);
                ComparisonItem {
                    key: ComparisonKey::Number(run.value),
                    display: join_display(raw, span),
                    span,
                    is_synonym_span: false,
                }
            } else {
                literal_item(raw, i, ComparisonKey::Literal(norm[i].clone()))
            };

            i = item.span.end;
            items.push(item);
        }

        items
    }
}

fn literal_item<S: AsRef<str>>(raw: &[S], i: usize, key: ComparisonKey) -> ComparisonItem {
    ComparisonItem {
        key,
        display: raw[i].as_ref().to_string(),
        span: TokenSpan::new(i, i + 1),
        is_synonym_span: false,
    }
}

fn join_display<S: AsRef<str>>(raw: &[S], span: TokenSpan) -> String {
    raw[span.start..span.end]
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}
