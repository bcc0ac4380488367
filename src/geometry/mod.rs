//! Box geometry: integer pixel boxes, IoU, boundary clipping, remapping.
//!
//! Boxes use corner form `(x1, y1, x2, y2)` with a top-left image origin.
//! Nothing here assumes `x2 >= x1`; decoded boxes can be inverted or lie
//! outside the image, and the area/IoU math treats those as zero-area
//! rather than rejecting them.

use crate::util::math::sigmoid;

/// Axis-aligned box with integer pixel corners, top-left origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelBox {
    /// Left edge (column of the top-left corner).
    pub x1: i32,
    /// Top edge (row of the top-left corner).
    pub y1: i32,
    /// Right edge (column of the bottom-right corner).
    pub x2: i32,
    /// Bottom edge (row of the bottom-right corner).
    pub y2: i32,
}

impl PixelBox {
    /// Creates a box from its corners.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box area; inverted or empty boxes have zero area, never negative.
    pub fn area(&self) -> f32 {
        let w = (self.x2 - self.x1).max(0) as f32;
        let h = (self.y2 - self.y1).max(0) as f32;
        w * h
    }

    /// Intersection over union with another box.
    ///
    /// Disjoint and degenerate pairs yield 0.0. A pair of zero-area boxes
    /// has an empty union and also yields 0.0.
    pub fn iou(&self, other: &PixelBox) -> f32 {
        let iw = (self.x2.min(other.x2) - self.x1.max(other.x1)).max(0) as f32;
        let ih = (self.y2.min(other.y2) - self.y1.max(other.y1)).max(0) as f32;
        let intersection = iw * ih;
        if intersection <= 0.0 {
            return 0.0;
        }
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

/// Clamps every box into the valid image rectangle.
///
/// Coordinates are clamped to `[0, width - 1]` and `[0, height - 1]`; the
/// last addressable pixel, not the exclusive edge. Idempotent, and a no-op
/// on an empty slice.
pub fn clip_boxes(boxes: &mut [PixelBox], height: usize, width: usize) {
    let max_x = width.saturating_sub(1) as i32;
    let max_y = height.saturating_sub(1) as i32;
    for b in boxes.iter_mut() {
        b.x1 = b.x1.clamp(0, max_x);
        b.y1 = b.y1.clamp(0, max_y);
        b.x2 = b.x2.clamp(0, max_x);
        b.y2 = b.y2.clamp(0, max_y);
    }
}

/// Remaps ground-truth boxes through an affine training augmentation.
///
/// Applies the same scale, crop offset and optional horizontal flip that
/// the augmentation applied to the image, then clips to the image bounds so
/// downstream encoding sees in-image coordinates. Matches the inference
/// side's corner convention, so boxes remapped here and boxes decoded by
/// the pipeline live in the same space.
pub fn remap_boxes(
    boxes: &mut [PixelBox],
    height: usize,
    width: usize,
    scale: f32,
    offset: (i32, i32),
    flip: bool,
) {
    for b in boxes.iter_mut() {
        b.x1 = (b.x1 as f32 * scale) as i32 - offset.0;
        b.y1 = (b.y1 as f32 * scale) as i32 - offset.1;
        b.x2 = (b.x2 as f32 * scale) as i32 - offset.0;
        b.y2 = (b.y2 as f32 * scale) as i32 - offset.1;
    }
    clip_boxes(boxes, height, width);
    if flip {
        let w = width as i32;
        for b in boxes.iter_mut() {
            let x1 = b.x1;
            b.x1 = w - b.x2;
            b.x2 = w - x1;
        }
    }
}

/// Decoded box in normalized grid-relative units, prior to image scaling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct NormBox {
    pub(crate) x1: f32,
    pub(crate) y1: f32,
    pub(crate) x2: f32,
    pub(crate) y2: f32,
}

impl NormBox {
    /// Builds the corner box for one cell/anchor prediction.
    ///
    /// `tx`/`ty` are sigmoid-squashed into the cell, `w`/`h` are already
    /// anchor-scaled extents in grid units.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_cell(
        tx: f32,
        ty: f32,
        w: f32,
        h: f32,
        row: usize,
        col: usize,
        grid_h: usize,
        grid_w: usize,
    ) -> Self {
        let cx = (sigmoid(tx) + col as f32) / grid_w as f32;
        let cy = (sigmoid(ty) + row as f32) / grid_h as f32;
        Self {
            x1: cx - w * 0.5,
            y1: cy - h * 0.5,
            x2: cx + w * 0.5,
            y2: cy + h * 0.5,
        }
    }

    /// Scales to pixel units and truncates toward zero.
    ///
    /// Truncation, not rounding, is deliberate: it matches the integer
    /// conversion the rest of the pipeline (and its fixtures) depend on.
    pub(crate) fn to_pixels(self, image_height: usize, image_width: usize) -> PixelBox {
        let fw = image_width as f32;
        let fh = image_height as f32;
        PixelBox {
            x1: (self.x1 * fw) as i32,
            y1: (self.y1 * fh) as i32,
            x2: (self.x2 * fw) as i32,
            y2: (self.y2 * fh) as i32,
        }
    }
}
