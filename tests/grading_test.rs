//! End-to-end grading tests
//!
//! These tests drive the public API the way a caller would:
//! - Equivalences that must never count as mistakes
//! - Each mistake kind and its weighting
//! - Configuration validation and the JSON boundary

use steno::alignment::{Side, clean_text};
use steno::{
    AlignmentOp, ComparisonConfig, Error, Grader, MistakeKind, PunctuationConfig,
    PunctuationMode, SynonymGroup, Weight, compare_json, edit_vector,
};

fn grader() -> Grader {
    Grader::new(ComparisonConfig::default(), &[])
}

fn kinds(reference: &str, typed: &str) -> String {
    edit_vector(&grader().grade(reference, typed, 0.0).unwrap().operations)
}

// ============ Determinism and Identity ============

#[test]
fn test_grading_is_idempotent() {
    let reference = "The Hon'ble Minister said 25 per cent of the 1,00,000 rupees was spent.";
    let typed = "The Honble minister said twenty five % of the one lakh rs was spend";
    let grader = grader();

    let first = grader.grade(reference, typed, 95.0).unwrap();
    let second = grader.grade(reference, typed, 95.0).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_identity_has_no_mistakes() {
    let texts = [
        "The quick brown fox jumps over the lazy dog.",
        "In 1984, Dr. Rao paid Rs.500/- to the Govt. department & left.",
        "one hundred and six people, twenty-five of them well-known",
        "\"Quoted,\" she said; (bracketed) text!",
    ];
    for text in texts {
        let result = grader().grade(text, text, 10.0).unwrap();
        assert_eq!(result.counts.total_mistakes(), 0, "text: {text}");
        assert_eq!(result.accuracy, 100.0);
        assert!(
            result
                .operations
                .iter()
                .all(|r| r.kind == MistakeKind::Correct)
        );
    }
}

// ============ Equivalences ============

#[test]
fn test_numeral_equivalence() {
    let result = grader().grade("25", "twenty five", 0.0).unwrap();
    assert_eq!(result.operations.len(), 1);
    assert!(matches!(result.operations[0].op, AlignmentOp::Match { .. }));
    assert_eq!(result.operations[0].kind, MistakeKind::Correct);

    assert_eq!(kinds("1,000", "one thousand"), "C");
    assert_eq!(kinds("1984", "nineteen eighty four"), "C");
    assert_eq!(kinds("106", "one hundred and six"), "C");
    assert_eq!(kinds("2.50", "2.5"), "C");
    assert_eq!(kinds("1st", "first"), "C");
    assert_eq!(kinds("sevan", "7"), "C");
}

#[test]
fn test_ordinals_are_not_cardinals() {
    assert_eq!(kinds("3rd", "third"), "C");
    assert_eq!(kinds("the third day", "the three day"), "CSC");
    assert_eq!(kinds("the 3rd day", "the 3 day"), "CSC");

    let result = grader().grade("the third day", "the three day", 0.0).unwrap();
    assert_eq!(result.counts.spelling, 1);
    assert_eq!(result.student_mistakes.spelling[0].correct, "third");
    assert_eq!(result.student_mistakes.spelling[0].wrong, "three");
}

#[test]
fn test_synonym_equivalence() {
    let result = grader().grade("Mr. Singh", "Mister Singh", 0.0).unwrap();
    assert_eq!(edit_vector(&result.operations), "CC");
    let first = &result.operations[0].op;
    assert_eq!(first.reference().unwrap().text, "Mr.");
    assert_eq!(first.typed().unwrap().text, "Mister");

    assert_eq!(kinds("salt & pepper", "salt and pepper"), "CCC");
    assert_eq!(kinds("5 percent", "five per cent"), "CC");
    assert_eq!(kinds("Govt. of India", "Government of India"), "CCC");
}

#[test]
fn test_custom_synonym_group() {
    let grader = Grader::new(
        ComparisonConfig::default(),
        &[SynonymGroup::new("UN", &["united nations", "u.n."])],
    );
    let result = grader
        .grade("the United Nations met", "the U.N. met", 0.0)
        .unwrap();
    assert_eq!(edit_vector(&result.operations), "CCC");
}

// ============ Mistake Kinds ============

#[test]
fn test_capitalization_weighting() {
    let result = grader().grade("india", "India", 0.0).unwrap();
    assert_eq!(result.counts.capitalization, 1);
    assert_eq!(result.mistake_score, 0.5);
    assert_eq!(result.accuracy, 50.0);
    assert_eq!(result.half_mistakes, 1);
    assert_eq!(result.student_mistakes.capitalization[0].wrong, "India");
}

#[test]
fn test_omission() {
    let result = grader().grade("the quick fox", "the fox", 0.0).unwrap();
    assert_eq!(edit_vector(&result.operations), "COC");
    assert_eq!(result.counts.omission, 1);
    assert_eq!(result.counts.correct, 2);
    assert!(matches!(
        result.operations[1].op,
        AlignmentOp::Delete { .. }
    ));
    assert_eq!(result.operations[1].op.reference().unwrap().text, "quick");
}

#[test]
fn test_spelling_near_miss() {
    let result = grader().grade("parliament", "parliment", 0.0).unwrap();
    assert_eq!(result.counts.spelling, 1);
    assert_eq!(result.counts.omission, 0);
    assert_eq!(result.counts.extra, 0);
    assert_eq!(result.student_mistakes.spelling[0].correct, "parliament");
    assert_eq!(result.student_mistakes.spelling[0].wrong, "parliment");
}

#[test]
fn test_non_ascii_digits_are_words() {
    assert_eq!(kinds("pay \u{096B} rupees", "pay \u{096D} rupees"), "CSC");
    assert_eq!(kinds("pay \u{096B} rupees", "pay 0 rupees"), "CSC");
    assert_eq!(kinds("pay \u{0663} rupees", "pay \u{0663} rupees"), "CCC");
}

#[test]
fn test_real_words_near_number_words() {
    assert_eq!(kinds("gold bullion prices", "gold billion prices"), "CSC");
    assert_eq!(kinds("Steven came", "seven came"), "SC");
    assert_eq!(kinds("old forts", "old 40"), "CS");
}

#[test]
fn test_punctuation_modes() {
    assert_eq!(kinds("It ended.", "It ended"), "CP");
    assert_eq!(kinds("Well, yes", "Well yes"), "PC");

    let config = ComparisonConfig {
        punctuation: PunctuationConfig {
            weight: Weight::Full,
            mode: PunctuationMode::FullStopOnly,
        },
        ..ComparisonConfig::default()
    };
    let grader = Grader::new(config, &[]);
    let result = grader.grade("Well, it ended.", "Well it ended", 0.0).unwrap();
    assert_eq!(edit_vector(&result.operations), "CCP");
    assert_eq!(result.mistake_score, 1.0);
}

#[test]
fn test_hyphen_guard() {
    let result = grader().grade("self- made", "self made", 0.0).unwrap();
    assert!(matches!(
        result.operations[0].op,
        AlignmentOp::Substitute { .. }
    ));
    assert_ne!(result.operations[0].kind, MistakeKind::Correct);

    // numerals are compared by value whatever the hyphenation
    assert_eq!(kinds("twenty-five", "twenty five"), "C");
}

#[test]
fn test_mixed_attempt() {
    let result = grader()
        .grade(
            "The Secretary visited Delhi on 15 August, 1947.",
            "the secretery visited on fifteen August 1947",
            12.0,
        )
        .unwrap();
    assert_eq!(edit_vector(&result.operations), "KSCOCCPP");
    assert_eq!(result.reference_word_count, 8);
    assert_eq!(result.typed_word_count, 7);
    assert_eq!(result.full_mistakes, 1);
    assert_eq!(result.half_mistakes, 4);
    assert_eq!(result.mistake_score, 3.0);
    assert_eq!(result.accuracy, 62.5);
    assert_eq!(result.typing_speed_wpm, 35.0);
}

// ============ Scoring Properties ============

#[test]
fn test_monotonic_weighting() {
    let reference = "The Secretary visited Delhi on 15 August, 1947 and left.";
    let typed = "the secretery visited on fifteen August 1947 and then left";

    for kind in MistakeKind::all().iter().filter(|k| k.is_mistake()) {
        let mut previous = f64::INFINITY;
        for weight in Weight::all() {
            let config = ComparisonConfig::default().with_weight(*kind, *weight);
            let accuracy = Grader::new(config, &[])
                .grade(reference, typed, 30.0)
                .unwrap()
                .accuracy;
            assert!(accuracy <= previous, "{kind:?} at {weight:?}");
            previous = accuracy;
        }
    }
}

#[test]
fn test_empty_texts() {
    let result = grader().grade("", "  \n ", 0.0).unwrap();
    assert!(result.operations.is_empty());
    assert_eq!(result.accuracy, 100.0);

    let result = grader().grade("one small step", "", 5.0).unwrap();
    assert_eq!(result.counts.omission, result.operations.len() as u32);
    assert_eq!(result.typed_word_count, 0);
    assert_eq!(result.typing_speed_wpm, 0.0);
    assert_eq!(result.accuracy, 0.0);
}

#[test]
fn test_clean_text_round_trip() {
    let result = grader()
        .grade("the quick brown fox", "the quik fox jumps", 0.0)
        .unwrap();
    let ops: Vec<AlignmentOp> = result.operations.iter().map(|r| r.op.clone()).collect();
    assert_eq!(clean_text(&ops, Side::Reference), "the quick brown fox");
    assert_eq!(clean_text(&ops, Side::Typed), "the quik fox jumps");
}

// ============ Configuration and JSON ============

#[test]
fn test_config_rejects_unknown_values() {
    assert!(matches!(
        ComparisonConfig::from_json(r#"{"additionWeight": 2}"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        ComparisonConfig::from_json(r#"{"punctuation": {"weight": 0.5, "mode": "commas"}}"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        ComparisonConfig::from_json(r#"{"typoWeight": 1}"#),
        Err(Error::Config(_))
    ));
    assert_eq!(
        ComparisonConfig::from_json("{}").unwrap(),
        ComparisonConfig::default()
    );
}

#[test]
fn test_compare_json_round_trip() {
    let request = serde_json::json!({
        "referenceText": "The Parliament met today.",
        "typedText": "The parliment met today",
        "elapsedSeconds": 6,
        "config": {
            "additionWeight": 1,
            "omissionWeight": 1,
            "spellingWeight": 1,
            "capitalizationWeight": 0.5,
            "punctuation": {"weight": 0, "mode": "all"}
        },
        "synonymGroups": [],
        "knownCorrections": ["parliament"]
    });
    let response = compare_json(&request.to_string()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&response).unwrap();

    assert_eq!(value["counts"]["spelling"], 1);
    assert_eq!(value["counts"]["punctuation"], 1);
    assert_eq!(value["mistake_score"], 1.0);
    assert_eq!(value["accuracy"], 75.0);
    assert_eq!(value["typing_speed_wpm"], 40.0);
    assert_eq!(value["operations"][1]["previously_corrected"], true);
    assert_eq!(value["operations"][1]["kind"], "spelling");
}
