//! The detection post-processing pipeline.
//!
//! Fixed stage order: decode, score-filter, suppress, clip. The order
//! is part of the contract; in particular, clipping runs last so that
//! suppression geometry is computed in the unclipped coordinate space and
//! is not skewed by clamping artifacts at image borders.

use crate::candidate::filter::score_filter;
use crate::candidate::nms::nms;
use crate::candidate::Detection;
use crate::decode::decode_boxes;
use crate::geometry::clip_boxes;
use crate::tensor::MatrixView;
use crate::trace::{trace_event, trace_span};
use crate::util::{GridBoxError, GridBoxResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// IoU threshold used by the pipeline's suppression stage.
///
/// Fixed and independent of the confidence threshold in [`DetectConfig`].
pub const DEFAULT_NMS_IOU: f32 = 0.3;

/// Per-invocation detector configuration.
///
/// Read-only; the pipeline takes it by reference on every call and retains
/// no state between invocations.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectConfig {
    /// Confidence cutoff applied to `objectness * class probability`.
    pub threshold: f32,
    /// Number of classes in the probability tensor.
    pub num_classes: usize,
    /// Number of anchors per grid cell.
    pub num_anchors: usize,
    /// Anchor `(width, height)` templates in grid-cell units, one per anchor.
    pub anchors: Vec<(f32, f32)>,
    /// Output grid dimensions `(H, W)`.
    pub out_size: (usize, usize),
}

/// Raw network outputs for one image, as flat index-aligned slices.
///
/// `bbox_pred` holds `N * 4` values, `objectness` holds `N`, and
/// `class_probs` holds `N * num_classes`, where `N = H * W * num_anchors`.
#[derive(Copy, Clone, Debug)]
pub struct RawPrediction<'a> {
    /// Flat `(tx, ty, tw, th)` rows.
    pub bbox_pred: &'a [f32],
    /// Objectness score per candidate.
    pub objectness: &'a [f32],
    /// Flat class-probability rows.
    pub class_probs: &'a [f32],
}

/// Runs the full post-processing pipeline for one image.
///
/// Candidate count `N` is `H * W * num_anchors` from `cfg`; all three
/// tensors must agree with it or the call fails with a shape mismatch
/// before any decoding happens. Zero final detections is a valid result,
/// returned as an empty vector.
///
/// Detections come back in suppression selection order, i.e. descending
/// score.
pub fn postprocess(
    pred: RawPrediction<'_>,
    image_height: usize,
    image_width: usize,
    cfg: &DetectConfig,
) -> GridBoxResult<Vec<Detection>> {
    let (grid_h, grid_w) = cfg.out_size;
    let n = grid_h * grid_w * cfg.num_anchors;
    if n == 0 {
        return Err(GridBoxError::InvalidDimensions {
            rows: n,
            cols: cfg.num_classes,
        });
    }

    let _span = trace_span!("postprocess", candidates = n).entered();

    if pred.bbox_pred.len() != n * 4 {
        return Err(GridBoxError::ShapeMismatch {
            expected: n * 4,
            got: pred.bbox_pred.len(),
            context: "bbox_pred",
        });
    }
    if pred.objectness.len() != n {
        return Err(GridBoxError::ShapeMismatch {
            expected: n,
            got: pred.objectness.len(),
            context: "objectness",
        });
    }
    if pred.class_probs.len() != n * cfg.num_classes {
        return Err(GridBoxError::ShapeMismatch {
            expected: n * cfg.num_classes,
            got: pred.class_probs.len(),
            context: "class_probs",
        });
    }
    let bbox_view = MatrixView::new(pred.bbox_pred, n, 4)?;
    let prob_view = MatrixView::new(pred.class_probs, n, cfg.num_classes)?;

    let decoded = decode_boxes(&bbox_view, cfg, image_height, image_width)?;
    let scored = score_filter(pred.objectness, &prob_view, cfg.threshold)?;
    trace_event!("score_filter", kept = scored.len());

    let boxes: Vec<_> = scored.iter().map(|c| decoded[c.index]).collect();
    let scores: Vec<_> = scored.iter().map(|c| c.score).collect();
    let keep = nms(&boxes, &scores, DEFAULT_NMS_IOU);
    trace_event!("nms", kept = keep.len());

    let mut kept_boxes: Vec<_> = keep.iter().map(|&k| boxes[k]).collect();
    clip_boxes(&mut kept_boxes, image_height, image_width);

    let detections = keep
        .iter()
        .zip(kept_boxes)
        .map(|(&k, bbox)| Detection {
            bbox,
            score: scored[k].score,
            class_idx: scored[k].class_idx,
        })
        .collect();
    Ok(detections)
}

/// Runs [`postprocess`] over a batch of frames sequentially.
///
/// Frames are independent; output order matches input order.
pub fn postprocess_batch(
    preds: &[RawPrediction<'_>],
    image_height: usize,
    image_width: usize,
    cfg: &DetectConfig,
) -> GridBoxResult<Vec<Vec<Detection>>> {
    preds
        .iter()
        .map(|&pred| postprocess(pred, image_height, image_width, cfg))
        .collect()
}

/// Runs [`postprocess`] over a batch of frames in parallel (rayon).
///
/// Invocations share no mutable state, so this is a plain parallel map;
/// output order still matches input order.
#[cfg(feature = "rayon")]
pub fn postprocess_batch_par(
    preds: &[RawPrediction<'_>],
    image_height: usize,
    image_width: usize,
    cfg: &DetectConfig,
) -> GridBoxResult<Vec<Vec<Detection>>> {
    preds
        .par_iter()
        .map(|&pred| postprocess(pred, image_height, image_width, cfg))
        .collect()
}
