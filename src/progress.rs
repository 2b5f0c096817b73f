//! Progress tracking across attempts
//!
//! Keeps a running library of the student's spelling mistakes and overall
//! attempt statistics. Everything here is in memory; callers persist the
//! serialized stats if they need to.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::clean_word;
use crate::types::ComparisonResult;

/// A misspelling and how often it was made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub original: String,
    pub typed: String,
    pub count: u32,
}

/// Thread-safe tally of (original, typed) spelling pairs
#[derive(Debug, Default)]
pub struct MistakeLibrary {
    entries: RwLock<HashMap<(String, String), u32>>,
}

impl MistakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every spelling pair of an attempt; returns how many were recorded
    pub fn record(&self, result: &ComparisonResult) -> usize {
        let mut entries = self.entries.write();
        let mut recorded = 0;

        for pair in &result.student_mistakes.spelling {
            let original = clean_word(&pair.correct);
            let typed = clean_word(&pair.wrong);
            if original.is_empty() || typed.is_empty() || original == typed {
                continue;
            }
            *entries.entry((original, typed)).or_insert(0) += 1;
            recorded += 1;
        }

        debug!(
            "Recorded {} spelling mistakes, library now holds {} pairs",
            recorded,
            entries.len()
        );
        recorded
    }

    /// How often `typed` was written for `original`
    pub fn count(&self, original: &str, typed: &str) -> u32 {
        self.entries
            .read()
            .get(&(clean_word(original), clean_word(typed)))
            .copied()
            .unwrap_or(0)
    }

    /// The `n` most frequent pairs, ties broken alphabetically
    pub fn most_frequent(&self, n: usize) -> Vec<LibraryEntry> {
        let mut entries: Vec<LibraryEntry> = self
            .entries
            .read()
            .iter()
            .map(|((original, typed), count)| LibraryEntry {
                original: original.clone(),
                typed: typed.clone(),
                count: *count,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.original.cmp(&b.original))
                .then_with(|| a.typed.cmp(&b.typed))
        });
        entries.truncate(n);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Aggregate statistics over all graded attempts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub attempts: u32,
    pub average_accuracy: f64,
    pub best_accuracy: f64,
    pub average_wpm: f64,
    pub best_wpm: f64,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl OverallStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one attempt into the running averages and bests
    pub fn record(&mut self, result: &ComparisonResult) {
        self.record_at(result, Utc::now());
    }

    pub fn record_at(&mut self, result: &ComparisonResult, at: DateTime<Utc>) {
        let previous = f64::from(self.attempts);
        self.attempts += 1;
        let total = f64::from(self.attempts);

        self.average_accuracy = (self.average_accuracy * previous + result.accuracy) / total;
        self.average_wpm = (self.average_wpm * previous + result.typing_speed_wpm) / total;
        self.best_accuracy = self.best_accuracy.max(result.accuracy);
        self.best_wpm = self.best_wpm.max(result.typing_speed_wpm);
        self.last_attempt_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparisonConfig;
    use crate::grader::Grader;

    fn grade(reference: &str, typed: &str, seconds: f64) -> ComparisonResult {
        Grader::new(ComparisonConfig::default(), &[])
            .grade(reference, typed, seconds)
            .unwrap()
    }

    #[test]
    fn test_library_records_spelling_pairs() {
        let library = MistakeLibrary::new();
        assert!(library.is_empty());

        let recorded = library.record(&grade("Parliament, session", "parliment, sesion", 0.0));
        assert_eq!(recorded, 2);
        assert_eq!(library.count("parliament", "parliment"), 1);
        assert_eq!(library.count("Parliament.", "Parliment,"), 1);

        library.record(&grade("parliament", "parliment", 0.0));
        assert_eq!(library.count("parliament", "parliment"), 2);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_library_skips_non_spelling_mistakes() {
        let library = MistakeLibrary::new();
        assert_eq!(library.record(&grade("india is big", "India is", 0.0)), 0);
        assert!(library.is_empty());
    }

    #[test]
    fn test_most_frequent() {
        let library = MistakeLibrary::new();
        library.record(&grade("receive", "recieve", 0.0));
        library.record(&grade("receive", "recieve", 0.0));
        library.record(&grade("committee", "comittee", 0.0));
        library.record(&grade("address", "adress", 0.0));

        let top = library.most_frequent(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].original, "receive");
        assert_eq!(top[0].count, 2);
        assert_eq!(top[1].original, "address");

        library.clear();
        assert!(library.most_frequent(5).is_empty());
    }

    #[test]
    fn test_overall_stats() {
        let mut stats = OverallStats::new();
        stats.record(&grade("the quick fox", "the quick fox", 30.0));
        stats.record(&grade("the quick fox", "the fox", 30.0));

        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.best_accuracy, 100.0);
        assert_eq!(stats.average_accuracy, (100.0 + 66.67) / 2.0);
        assert_eq!(stats.best_wpm, 6.0);
        assert_eq!(stats.average_wpm, 5.0);
        assert!(stats.last_attempt_at.is_some());
    }

    #[test]
    fn test_overall_stats_serialize() {
        let mut stats = OverallStats::new();
        let at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        stats.record_at(&grade("one", "one", 10.0), at);

        let json = serde_json::to_string(&stats).unwrap();
        let restored: OverallStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
        assert_eq!(restored.last_attempt_at, Some(at));
    }
}
