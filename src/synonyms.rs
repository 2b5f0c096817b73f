//! Synonym and equivalence index
//!
//! Groups of interchangeable phrases (abbreviations, symbols, honorifics,
//! ordinals) are tokenized and normalized once, then looked up by their first
//! normalized token. A second index keyed by the first character of the joined
//! variant catches spans that only agree once their tokens are concatenated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::normalize::{normalize, tokenize};
use crate::numbers::{number_value, recognize_at};

/// Built-in groups shipped regardless of caller configuration
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("AND", &["and", "&"]),
    ("PERCENT", &["percent", "%", "per cent", "per-cent"]),
    (
        "HONOURABLE",
        &["honourable", "honorable", "honble", "hon'ble", "hon"],
    ),
    ("DR", &["doctor", "dr"]),
    ("MR", &["mister", "mr"]),
    ("MRS", &["misses", "mrs"]),
    ("GOVT", &["government", "govt"]),
    ("GOVTS", &["governments", "govts"]),
    ("SPL", &["special", "spl"]),
    ("THRU", &["through", "thru"]),
    ("DEPT", &["department", "dept"]),
    ("ASSOC", &["association", "assoc"]),
    ("FIRST", &["first", "1st"]),
    ("SECOND", &["second", "2nd"]),
    ("THIRD", &["third", "3rd"]),
    ("RUPEE", &["rupee", "re"]),
    ("RUPEES", &["rupees", "rs", "\u{20B9}"]),
    ("ADVT", &["advertisement", "advt"]),
    ("ADDL", &["additional", "addl"]),
    ("SECY", &["secretary", "secy"]),
    ("VS", &["versus", "vs"]),
    ("LTD", &["limited", "ltd"]),
    ("PVT", &["private", "pvt"]),
    ("NO", &["number", "no"]),
    ("MAAM", &["madam", "ma'am"]),
];

/// A set of interchangeable phrase variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    #[serde(alias = "group", alias = "group_key")]
    pub id: String,
    #[serde(alias = "variant_list")]
    pub variants: Vec<String>,
}

impl SynonymGroup {
    pub fn new(id: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            id: id.into(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// The fixed fallback set
pub fn builtin_groups() -> Vec<SynonymGroup> {
    BUILTIN_GROUPS
        .iter()
        .map(|(id, variants)| SynonymGroup::new(*id, variants))
        .collect()
}

#[derive(Debug, Clone)]
struct Variant {
    group: usize,
    tokens: Vec<String>,
    flat: String,
    value: Option<String>,
}

/// A synonym span recognized in a token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymMatch<'a> {
    pub group_id: &'a str,
    /// Raw tokens consumed
    pub len: usize,
    /// Shared numeric value of the group, if it has a consistent one
    pub group_number: Option<&'a str>,
}

/// Read-only lookup over all synonym groups of one comparison
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    group_ids: Vec<String>,
    group_numbers: Vec<Option<String>>,
    by_first: HashMap<String, Vec<Variant>>,
    by_flat_char: HashMap<char, Vec<Variant>>,
    numeric: Vec<Variant>,
}

impl SynonymIndex {
    /// Build an index over exactly the given groups
    ///
    /// Groups sharing an id are merged. A group whose variants resolve to
    /// different numbers is kept, but without a shared numeric value.
    pub fn build(groups: &[SynonymGroup]) -> Self {
        let mut index = Self::default();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut merged: Vec<Vec<&str>> = Vec::new();

        for group in groups {
            let id = group.id.trim();
            if id.is_empty() {
                warn!("Skipping synonym group with empty id");
                continue;
            }
            let slot = *positions.entry(id.to_string()).or_insert_with(|| {
                index.group_ids.push(id.to_string());
                merged.push(Vec::new());
                merged.len() - 1
            });
            merged[slot].extend(group.variants.iter().map(String::as_str));
        }

        for (slot, variants) in merged.iter().enumerate() {
            let mut seen_value: Option<String> = None;
            let mut conflict = false;

            for raw in variants {
                let tokens: Vec<String> = tokenize(raw).into_iter().map(normalize).collect();
                let Some(first) = tokens.first().cloned() else {
                    continue;
                };
                let value = number_value(&tokens);
                if let Some(v) = &value {
                    match &seen_value {
                        None => seen_value = Some(v.clone()),
                        Some(seen) if seen != v => conflict = true,
                        Some(_) => {}
                    }
                }

                let variant = Variant {
                    group: slot,
                    flat: tokens.concat(),
                    tokens,
                    value,
                };
                if let Some(c) = variant.flat.chars().next() {
                    index.by_flat_char.entry(c).or_default().push(variant.clone());
                }
                if variant.value.is_some() {
                    index.numeric.push(variant.clone());
                }
                index.by_first.entry(first).or_default().push(variant);
            }

            if conflict {
                warn!(
                    "Synonym group {} has conflicting numeric variants, treating as non-numeric",
                    index.group_ids[slot]
                );
                index.group_numbers.push(None);
            } else {
                index.group_numbers.push(seen_value);
            }
        }

        // longest variant first; the sort is stable so ties keep table order
        for bucket in index.by_first.values_mut() {
            bucket.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        }
        for bucket in index.by_flat_char.values_mut() {
            bucket.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        }
        index
            .numeric
            .sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));

        debug!(
            "Built synonym index with {} groups",
            index.group_ids.len()
        );

        index
    }

    /// Built-in groups merged with caller-supplied groups
    pub fn with_builtins(groups: &[SynonymGroup]) -> Self {
        let mut all = builtin_groups();
        all.extend(groups.iter().cloned());
        Self::build(&all)
    }

    pub fn group_count(&self) -> usize {
        self.group_ids.len()
    }

    /// Shared numeric value of a group, if any
    pub fn group_number(&self, id: &str) -> Option<&str> {
        let slot = self.group_ids.iter().position(|g| g == id)?;
        self.group_numbers[slot].as_deref()
    }

    fn to_match(&self, variant: &Variant, len: usize) -> SynonymMatch<'_> {
        SynonymMatch {
            group_id: &self.group_ids[variant.group],
            len,
            group_number: self.group_numbers[variant.group].as_deref(),
        }
    }

    /// Find the synonym span starting at `pos` in a normalized token sequence
    ///
    /// Tries, in order: an exact token-sequence match against variants sharing
    /// the first token, a numeral-value match against numeric variants, and a
    /// match on the concatenation of consecutive tokens.
    pub fn match_at<S: AsRef<str>>(&self, tokens: &[S], pos: usize) -> Option<SynonymMatch<'_>> {
        let first = tokens.get(pos)?.as_ref();
        let rest = &tokens[pos..];

        if let Some(bucket) = self.by_first.get(first) {
            let exact = bucket.iter().find(|v| {
                v.tokens.len() <= rest.len()
                    && v.tokens.iter().zip(rest).all(|(a, b)| a == b.as_ref())
            });
            if let Some(variant) = exact {
                return Some(self.to_match(variant, variant.tokens.len()));
            }
        }

        // the variant must cover the whole numeral, so runs are never split;
        // ordinal variants carry their suffix and never equal a cardinal
        if let Some(numeral) = recognize_at(tokens, pos) {
            let numeric = self.numeric.iter().find(|v| {
                v.tokens.len() == numeral.len && v.value.as_deref() == Some(numeral.value.as_str())
            });
            if let Some(variant) = numeric {
                return Some(self.to_match(variant, variant.tokens.len()));
            }
        }

        let first_char = first.chars().next()?;
        for variant in self.by_flat_char.get(&first_char).into_iter().flatten() {
            let mut joined = String::new();
            for (k, token) in rest.iter().enumerate() {
                joined.push_str(token.as_ref());
                if joined.len() > variant.flat.len() {
                    break;
                }
                if joined == variant.flat {
                    return Some(self.to_match(variant, k + 1));
                }
            }
        }

        None
    }
}
