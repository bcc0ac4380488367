//! Greedy non-maximum suppression over scored boxes.

use crate::geometry::PixelBox;

/// Applies greedy IoU-based non-maximum suppression.
///
/// Candidates are visited in descending score order; each visited survivor
/// suppresses every remaining candidate whose IoU with it is strictly
/// greater than `iou_threshold`. Pairs exactly at the threshold both
/// survive.
///
/// Returns the indices of kept boxes in selection order (descending
/// score). Equal scores are broken by ascending original index, so the
/// output is deterministic for a given input. `boxes` and `scores` must be
/// index-aligned; extra elements of the longer slice are ignored.
///
/// Suppression uses a boolean mask rather than removing elements, so the
/// loop is O(n^2) worst case with no reallocation.
pub fn nms(boxes: &[PixelBox], scores: &[f32], iou_threshold: f32) -> Vec<usize> {
    let n = boxes.len().min(scores.len());
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut keep = Vec::new();
    let mut suppressed = vec![false; n];

    for (pos, &i) in order.iter().enumerate() {
        if suppressed[i] {
            continue;
        }
        keep.push(i);

        for &j in &order[pos + 1..] {
            if suppressed[j] {
                continue;
            }
            if boxes[i].iou(&boxes[j]) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    keep
}
