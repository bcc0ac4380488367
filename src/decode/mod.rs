//! Anchor-relative box decoding.
//!
//! The network predicts, for every grid cell and anchor, a raw 4-vector
//! `(tx, ty, tw, th)`. The center offsets are sigmoid-squashed into the
//! cell and the extents scale the anchor exponentially; the result is
//! normalized by the grid size, scaled to image pixels, and truncated to
//! integer corners.

use crate::geometry::{NormBox, PixelBox};
use crate::pipeline::DetectConfig;
use crate::tensor::MatrixView;
use crate::util::math::safe_exp;
use crate::util::{GridBoxError, GridBoxResult};

/// Decodes raw box offsets into absolute integer pixel corners.
///
/// `bbox_pred` must have one row of `(tx, ty, tw, th)` per candidate, rows
/// ordered cell-major (`row * W * num_anchors + col * num_anchors + a`).
/// Row count must equal `H * W * num_anchors`; anything else is a fatal
/// shape mismatch, never a silent reshape.
///
/// The exponent in the extent decode is clamped before `exp`, so decoded
/// coordinates are always finite regardless of network output. Corners are
/// not otherwise validated: a decoded box may be inverted or lie outside
/// the image until [`clip_boxes`](crate::geometry::clip_boxes) runs.
pub fn decode_boxes(
    bbox_pred: &MatrixView<'_>,
    cfg: &DetectConfig,
    image_height: usize,
    image_width: usize,
) -> GridBoxResult<Vec<PixelBox>> {
    let (grid_h, grid_w) = cfg.out_size;
    let expected = grid_h * grid_w * cfg.num_anchors;
    if bbox_pred.rows() != expected {
        return Err(GridBoxError::ShapeMismatch {
            expected,
            got: bbox_pred.rows(),
            context: "bbox_pred rows",
        });
    }
    if bbox_pred.cols() != 4 {
        return Err(GridBoxError::ShapeMismatch {
            expected: 4,
            got: bbox_pred.cols(),
            context: "bbox_pred cols",
        });
    }
    if cfg.anchors.len() != cfg.num_anchors {
        return Err(GridBoxError::ShapeMismatch {
            expected: cfg.num_anchors,
            got: cfg.anchors.len(),
            context: "anchors",
        });
    }

    let mut boxes = Vec::with_capacity(expected);
    let mut candidate = 0usize;
    for row in 0..grid_h {
        for col in 0..grid_w {
            for &(anchor_w, anchor_h) in &cfg.anchors {
                let t = bbox_pred.row(candidate).ok_or(GridBoxError::ShapeMismatch {
                    expected,
                    got: candidate,
                    context: "bbox_pred rows",
                })?;
                let w = anchor_w * safe_exp(t[2]) / grid_w as f32;
                let h = anchor_h * safe_exp(t[3]) / grid_h as f32;
                let norm = NormBox::from_cell(t[0], t[1], w, h, row, col, grid_h, grid_w);
                boxes.push(norm.to_pixels(image_height, image_width));
                candidate += 1;
            }
        }
    }
    Ok(boxes)
}
