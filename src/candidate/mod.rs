//! Candidate detections: score filtering and non-maximum suppression.

pub(crate) mod filter;
pub(crate) mod nms;

use crate::geometry::PixelBox;

/// A single detection: box, score, and winning class.
///
/// The score is the product of objectness and the winning class
/// probability. Detections are immutable once produced; the pipeline
/// retains no ownership of its outputs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Detection {
    /// Box corners in image pixels, top-left origin.
    pub bbox: PixelBox,
    /// Combined confidence in `[0, 1]` for well-formed network outputs.
    pub score: f32,
    /// Index of the winning class.
    pub class_idx: usize,
}
