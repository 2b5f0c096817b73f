//! Tokenization and comparison-key normalization
//!
//! Normalization is a single pass over a priority-ordered rule table: typographic
//! characters are folded first, numerals are canonicalized next, and only then is
//! punctuation trimmed and the word lower-cased.

use std::sync::LazyLock;

use regex::Regex;

/// Characters folded to a single canonical form before any comparison
struct CharRule {
    from: &'static [char],
    to: char,
}

const CHAR_RULES: &[CharRule] = &[
    // typographic apostrophes and primes
    CharRule {
        from: &['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{2032}', '\u{2035}'],
        to: '\'',
    },
    // typographic double quotes
    CharRule {
        from: &['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2033}'],
        to: '"',
    },
    // en/em dashes and the minus sign
    CharRule {
        from: &['\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'],
        to: '-',
    },
];

/// Punctuation trimmed from both ends of a token when building its key
const TRIM_PUNCTUATION: &[char] = &[
    '.', '\u{2026}', ',', ';', ':', '!', '?', '\u{203D}', '\'', '"', '(', ')', '[', ']', '{', '}',
    '/', '\\', '|', '@', '#', '$', '%', '^', '&', '*', '_', '+', '=', '<', '>', '~', '`', '-',
];

/// Punctuation that may close a word and is checked for punctuation mistakes
const TRAILING_MARKS: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Characters wrapping a numeral that are not part of its value
const NUMERAL_WRAPPERS: &[char] = &['(', ')', '[', ']', '"', '\'', '`'];

/// Sentence punctuation (and stray hyphens) that may follow a numeral
const NUMERAL_TRAILERS: &[char] = &[',', '.', ';', ':', '!', '?', '\u{2026}', '-'];

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([+-]?)([0-9]{1,3}(?:[, ][0-9]{2,3})+|[0-9]+)(?:\.([0-9]+))?(st|nd|rd|th)?$")
        .expect("valid numeral regex")
});

static CURRENCY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:rs\.?|\u{20B9})\s*").expect("valid currency regex"));

/// Split text into raw tokens on runs of whitespace
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Fold typographic quotes and dashes and collapse internal whitespace
pub fn canonicalize(token: &str) -> String {
    let folded: String = token
        .chars()
        .map(|c| {
            CHAR_RULES
                .iter()
                .find(|rule| rule.from.contains(&c))
                .map_or(c, |rule| rule.to)
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_trim_punctuation(c: char) -> bool {
    TRIM_PUNCTUATION.contains(&c)
}

/// Canonical decimal string of a token written with ASCII digits, if it is one
///
/// Currency prefixes, wrapping brackets, a trailing `/-` and trailing sentence
/// punctuation are ignored. Grouping separators and leading zeros are dropped
/// and trailing fractional zeros are trimmed. An ordinal suffix is kept in lower
/// case (`3RD` gives `3rd`), so an ordinal never equals the cardinal `3`.
pub fn numeric_value(token: &str) -> Option<String> {
    let canon = canonicalize(token);
    let mut s = CURRENCY_PREFIX.replace(&canon, "").into_owned();

    loop {
        let before = s.len();
        s = s
            .trim_start_matches(NUMERAL_WRAPPERS)
            .trim_end_matches(NUMERAL_WRAPPERS)
            .to_string();
        if let Some(stripped) = s.strip_suffix("/-") {
            s = stripped.trim_end().to_string();
        }
        s = s.trim_end_matches(NUMERAL_TRAILERS).to_string();
        if s.len() == before {
            break;
        }
    }

    let caps = NUMERAL.captures(&s)?;
    let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
    let int_digits: String = caps[2].chars().filter(char::is_ascii_digit).collect();
    let int_part = match int_digits.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let frac_part = caps
        .get(3)
        .map(|m| m.as_str().trim_end_matches('0'))
        .unwrap_or("");

    let mut value = String::new();
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        value.push('-');
    }
    value.push_str(int_part);
    if !frac_part.is_empty() {
        value.push('.');
        value.push_str(frac_part);
    }
    if let Some(suffix) = caps.get(4) {
        value.push_str(&suffix.as_str().to_lowercase());
    }
    Some(value)
}

/// True when the (already normalized) token is a decimal numeral, ordinals included
pub fn is_digit_token(token: &str) -> bool {
    let cardinal = ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| token.strip_suffix(*suffix))
        .unwrap_or(token);
    let unsigned = cardinal.strip_prefix('-').unwrap_or(cardinal);
    let mut parts = unsigned.splitn(2, '.');
    let int_ok = parts
        .next()
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    let frac_ok = parts
        .next()
        .is_none_or(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    int_ok && frac_ok
}

/// Comparison-key candidate for a single raw token
pub fn normalize(token: &str) -> String {
    if let Some(value) = numeric_value(token) {
        return value;
    }
    let canon = canonicalize(token);
    let trimmed = canon.trim_matches(is_trim_punctuation);
    if trimmed.is_empty() {
        // symbol-only tokens such as "%" or "&" keep their form
        canon.to_lowercase()
    } else {
        trimmed.to_lowercase()
    }
}

/// Remove all punctuation, keeping alphanumerics and whitespace
pub fn strip_punctuation(s: &str) -> String {
    canonicalize(s)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Sentence mark closing the word, if any
pub fn last_punctuation(s: &str) -> Option<char> {
    s.chars().last().filter(|c| TRAILING_MARKS.contains(c))
}

/// Trim sentence punctuation from both ends, keeping case and inner marks
pub fn punctuation_core(s: &str) -> String {
    canonicalize(s).trim_matches(is_trim_punctuation).to_string()
}

/// Lower-cased word with a trailing full stop or comma removed
pub fn clean_word(s: &str) -> String {
    s.trim().trim_end_matches(['.', ',']).to_lowercase()
}

/// Whether the word carries a hyphen (after dash folding)
pub fn has_hyphen(s: &str) -> bool {
    canonicalize(s).contains('-')
}
