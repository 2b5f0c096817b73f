//! Spelled-out number recognition
//!
//! Converts runs of normalized tokens such as `twenty five`, `one hundred and six`
//! or `nineteen eighty four` into a canonical decimal value. Hyphenated compounds
//! are split before recognition, and slightly misspelled number words are mapped
//! to their canonical form by a length-filtered nearest-neighbour search.

use strsim::levenshtein;

use crate::normalize::is_digit_token;

const ONES: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fourty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const SCALES: &[(&str, u64)] = &[
    ("hundred", 100),
    ("hundreds", 100),
    ("thousand", 1_000),
    ("thousands", 1_000),
    ("lakh", 100_000),
    ("lakhs", 100_000),
    ("million", 1_000_000),
    ("millions", 1_000_000),
    ("crore", 10_000_000),
    ("crores", 10_000_000),
    ("billion", 1_000_000_000),
    ("billions", 1_000_000_000),
];

const CONNECTOR: &str = "and";

/// Shortest word eligible for fuzzy number-word correction
const FUZZY_MIN_LEN: usize = 5;

/// Real words within one edit of a number word that must stay literal
const FUZZY_CONFUSIONS: &[&str] = &[
    "bight", "bullion", "chore", "crone", "eighth", "elven", "fifth", "fight", "forte", "forth",
    "forts", "fourth", "height", "lakes", "light", "might", "mullion", "nifty", "night", "ninth",
    "pillion", "right", "sever", "seventh", "sight", "silty", "sixth", "steven", "tenth",
    "thirsty", "threw", "throe", "tight", "weight", "weighty", "wight",
];

/// Role of a recognized number word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberWord {
    /// zero through nineteen
    Ones(u64),
    /// twenty, thirty, ...
    Tens(u64),
    /// hundred, thousand, lakh, crore, million, billion
    Scale(u64),
    /// the connector "and"
    And,
}

/// A recognized numeral and the number of tokens it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMatch {
    pub value: String,
    pub len: usize,
}

fn lookup(word: &str) -> Option<NumberWord> {
    if word == CONNECTOR {
        return Some(NumberWord::And);
    }
    let find = |table: &[(&str, u64)]| table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v);
    find(ONES)
        .map(NumberWord::Ones)
        .or_else(|| find(TENS).map(NumberWord::Tens))
        .or_else(|| find(SCALES).map(NumberWord::Scale))
}

/// Map a word to its canonical number word, tolerating one edit on longer words
pub fn canonical_number_word(word: &str) -> Option<&'static str> {
    if word == CONNECTOR {
        return Some(CONNECTOR);
    }
    let exact = ONES
        .iter()
        .chain(TENS)
        .chain(SCALES)
        .find(|(w, _)| *w == word)
        .map(|(w, _)| *w);
    if exact.is_some() {
        return exact;
    }

    let len = word.chars().count();
    if len < FUZZY_MIN_LEN
        || !word.chars().all(|c| c.is_alphabetic())
        || FUZZY_CONFUSIONS.contains(&word)
    {
        return None;
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (candidate, _) in ONES.iter().chain(TENS).chain(SCALES) {
        if candidate.chars().count().abs_diff(len) > 1 {
            continue;
        }
        let distance = levenshtein(word, candidate);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.filter(|(_, d)| *d <= 1).map(|(w, _)| w)
}

/// Classify a single word (no hyphens) as a number word
pub fn number_word(word: &str) -> Option<NumberWord> {
    canonical_number_word(word).and_then(lookup)
}

fn split_parts(token: &str) -> Vec<&str> {
    token.split('-').collect()
}

fn is_teen(word: Option<NumberWord>) -> Option<u64> {
    match word {
        Some(NumberWord::Ones(n)) if (10..=19).contains(&n) => Some(n),
        _ => None,
    }
}

fn single_digit(word: Option<NumberWord>) -> Option<u64> {
    match word {
        Some(NumberWord::Ones(n)) if n < 10 => Some(n),
        _ => None,
    }
}

/// Recognize a spoken year: `nineteen <teen|tens [ones]>` or `twenty <teen|tens [ones]>`
pub fn parse_year_at<S: AsRef<str>>(tokens: &[S], pos: usize) -> Option<NumberMatch> {
    let base = match number_word(tokens.get(pos)?.as_ref())? {
        NumberWord::Ones(19) => 1900,
        NumberWord::Tens(20) => 2000,
        _ => return None,
    };
    let second: Vec<Option<NumberWord>> = split_parts(tokens.get(pos + 1)?.as_ref())
        .into_iter()
        .map(number_word)
        .collect();

    let year = |offset: u64, len: usize| {
        Some(NumberMatch {
            value: (base + offset).to_string(),
            len,
        })
    };

    match second.as_slice() {
        [only] => {
            if let Some(teen) = is_teen(*only) {
                return year(teen, 2);
            }
            if let Some(NumberWord::Tens(tens)) = only {
                let third = tokens
                    .get(pos + 2)
                    .map(|t| split_parts(t.as_ref()))
                    .filter(|parts| parts.len() == 1)
                    .and_then(|parts| single_digit(number_word(parts[0])));
                return match third {
                    Some(ones) => year(tens + ones, 3),
                    None => year(*tens, 2),
                };
            }
            None
        }
        [Some(NumberWord::Tens(tens)), ones] => {
            let ones = single_digit(*ones)?;
            year(tens + ones, 2)
        }
        _ => None,
    }
}

/// Greedily recognize a run of cardinal number words starting at `pos`
///
/// Scale words multiply the running group and flush it into the total, except
/// `hundred` which only multiplies the current group. The connector `and` is only
/// accepted between number words, so a trailing `and` is left unconsumed.
pub fn parse_cardinal_at<S: AsRef<str>>(tokens: &[S], pos: usize) -> Option<NumberMatch> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut touched = false;
    let mut consumed = 0;
    let mut best: Option<NumberMatch> = None;

    for token in tokens.iter().skip(pos) {
        let (mut t, mut c, mut seen) = (total, current, touched);
        let mut has_number = false;
        let mut ok = true;

        for part in split_parts(token.as_ref()) {
            match number_word(part) {
                Some(NumberWord::And) if seen => {}
                Some(NumberWord::Ones(n)) | Some(NumberWord::Tens(n)) => {
                    c = c.saturating_add(n);
                    seen = true;
                    has_number = true;
                }
                Some(NumberWord::Scale(100)) => {
                    c = c.max(1).saturating_mul(100);
                    seen = true;
                    has_number = true;
                }
                Some(NumberWord::Scale(scale)) => {
                    t = t.saturating_add(c.max(1).saturating_mul(scale));
                    c = 0;
                    seen = true;
                    has_number = true;
                }
                _ => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            break;
        }

        (total, current, touched) = (t, c, seen);
        consumed += 1;
        if has_number {
            best = Some(NumberMatch {
                value: total.saturating_add(current).to_string(),
                len: consumed,
            });
        }
    }

    best
}

/// Year pattern first, then a general cardinal run
pub fn parse_number_words_at<S: AsRef<str>>(tokens: &[S], pos: usize) -> Option<NumberMatch> {
    parse_year_at(tokens, pos).or_else(|| parse_cardinal_at(tokens, pos))
}

/// Recognize a numeral starting at `pos`: a digit token, a year or a cardinal run
pub fn recognize_at<S: AsRef<str>>(tokens: &[S], pos: usize) -> Option<NumberMatch> {
    let first = tokens.get(pos)?.as_ref();
    if is_digit_token(first) {
        return Some(NumberMatch {
            value: first.to_string(),
            len: 1,
        });
    }
    parse_number_words_at(tokens, pos)
}

/// Value of a whole token span, only when every token belongs to the numeral
pub fn number_value<S: AsRef<str>>(tokens: &[S]) -> Option<String> {
    recognize_at(tokens, 0)
        .filter(|m| m.len == tokens.len())
        .map(|m| m.value)
}
