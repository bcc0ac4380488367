//! Confidence scoring and thresholding of raw candidates.

use crate::tensor::MatrixView;
use crate::util::{GridBoxError, GridBoxResult};

/// A candidate that survived the confidence threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScoredCandidate {
    /// Index into the original candidate list (row of the input tensors).
    pub index: usize,
    /// objectness * winning class probability.
    pub score: f32,
    /// Winning class index.
    pub class_idx: usize,
}

/// Scores every candidate and keeps those at or above `threshold`.
///
/// The winning class is a stable argmax over the probability row: ties go
/// to the lowest class index. Survivors keep their original relative order
/// so that downstream suppression can sort them deterministically.
///
/// Zero survivors is a valid outcome, returned as an empty vector.
pub fn score_filter(
    objectness: &[f32],
    class_probs: &MatrixView<'_>,
    threshold: f32,
) -> GridBoxResult<Vec<ScoredCandidate>> {
    if objectness.len() != class_probs.rows() {
        return Err(GridBoxError::ShapeMismatch {
            expected: class_probs.rows(),
            got: objectness.len(),
            context: "objectness",
        });
    }

    let mut kept = Vec::new();
    for (index, &obj) in objectness.iter().enumerate() {
        let row = match class_probs.row(index) {
            Some(row) => row,
            None => break,
        };
        let (class_idx, prob) = stable_argmax(row);
        let score = obj * prob;
        if score >= threshold {
            kept.push(ScoredCandidate {
                index,
                score,
                class_idx,
            });
        }
    }
    Ok(kept)
}

/// Returns the first index holding the maximum value, with its value.
///
/// `>` (not `>=`) on the scan keeps the lowest index on ties. NaN entries
/// never win unless every entry is NaN.
fn stable_argmax(values: &[f32]) -> (usize, f32) {
    let mut best_idx = 0usize;
    let mut best = values[0];
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > best {
            best = value;
            best_idx = idx;
        }
    }
    (best_idx, best)
}
