//! Item-level alignment using Needleman-Wunsch with unit costs
//!
//! Insertions and deletions cost 1, substitutions cost 0 when two items are
//! equal and 1 otherwise. The backtrace walks from the bottom-right cell and
//! prefers the diagonal, then an insertion, then a deletion when several
//! predecessors tie.

use serde::{Deserialize, Serialize};

use crate::normalize::has_hyphen;
use crate::types::{AlignmentOp, ComparisonItem, Word};

/// A backtraced step expressed as indices into the two item sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Items paired on the diagonal (equal or substituted)
    Pair { reference: usize, typed: usize },
    /// Typed item with no reference counterpart
    Insert { typed: usize },
    /// Reference item the typist left out
    Delete { reference: usize },
}

/// Which side of an alignment to rebuild text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Reference,
    Typed,
}

/// Equality used by the aligner
///
/// Numerals compare by value. Any other pair needs equal keys, and is still
/// rejected when exactly one of the two displays carries a hyphen.
pub fn items_equal(a: &ComparisonItem, b: &ComparisonItem) -> bool {
    if a.key != b.key {
        return false;
    }
    if a.key.is_number() {
        return true;
    }
    has_hyphen(&a.display) == has_hyphen(&b.display)
}

fn sub_cost(a: &ComparisonItem, b: &ComparisonItem) -> u32 {
    if items_equal(a, b) { 0 } else { 1 }
}

/// Build the edit-distance matrix over two item sequences
pub fn score_matrix(reference: &[ComparisonItem], typed: &[ComparisonItem]) -> Vec<Vec<u32>> {
    let m = reference.len();
    let n = typed.len();

    let mut matrix = vec![vec![0u32; n + 1]; m + 1];

    // first column: deletions
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i as u32;
    }
    // first row: insertions
    for (j, val) in matrix[0].iter_mut().enumerate() {
        *val = j as u32;
    }

    for i in 1..=m {
        for j in 1..=n {
            let diagonal = matrix[i - 1][j - 1] + sub_cost(&reference[i - 1], &typed[j - 1]);
            let insert = matrix[i][j - 1] + 1;
            let delete = matrix[i - 1][j] + 1;
            matrix[i][j] = diagonal.min(insert).min(delete);
        }
    }

    matrix
}

/// Backtrack through the score matrix to recover the minimum-cost path
pub fn backtrack(
    matrix: &[Vec<u32>],
    reference: &[ComparisonItem],
    typed: &[ComparisonItem],
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(reference.len().max(typed.len()));
    let mut i = reference.len();
    let mut j = typed.len();

    while i > 0 || j > 0 {
        if i > 0
            && j > 0
            && matrix[i][j] == matrix[i - 1][j - 1] + sub_cost(&reference[i - 1], &typed[j - 1])
        {
            steps.push(Step::Pair {
                reference: i - 1,
                typed: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || matrix[i][j] == matrix[i][j - 1] + 1) {
            steps.push(Step::Insert { typed: j - 1 });
            j -= 1;
        } else {
            steps.push(Step::Delete { reference: i - 1 });
            i -= 1;
        }
    }

    steps.reverse();
    steps
}

/// Align two item sequences and return index steps
pub fn align_steps(reference: &[ComparisonItem], typed: &[ComparisonItem]) -> Vec<Step> {
    let matrix = score_matrix(reference, typed);
    backtrack(&matrix, reference, typed)
}

/// Turn an index step into an operation carrying the display words
pub fn to_op(step: Step, reference: &[ComparisonItem], typed: &[ComparisonItem]) -> AlignmentOp {
    match step {
        Step::Pair {
            reference: i,
            typed: j,
        } => {
            let (r, t) = (&reference[i], &typed[j]);
            if items_equal(r, t) {
                AlignmentOp::Match {
                    reference: r.into(),
                    typed: t.into(),
                }
            } else {
                AlignmentOp::Substitute {
                    reference: r.into(),
                    typed: t.into(),
                }
            }
        }
        Step::Insert { typed: j } => AlignmentOp::Insert {
            typed: (&typed[j]).into(),
        },
        Step::Delete { reference: i } => AlignmentOp::Delete {
            reference: (&reference[i]).into(),
        },
    }
}

/// Align two item sequences
pub fn align(reference: &[ComparisonItem], typed: &[ComparisonItem]) -> Vec<AlignmentOp> {
    align_steps(reference, typed)
        .into_iter()
        .map(|step| to_op(step, reference, typed))
        .collect()
}

/// Rebuild the text of one side from an operation list
pub fn clean_text(ops: &[AlignmentOp], side: Side) -> String {
    ops.iter()
        .filter_map(|op| match side {
            Side::Reference => op.reference(),
            Side::Typed => op.typed(),
        })
        .map(|word: &Word| word.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
