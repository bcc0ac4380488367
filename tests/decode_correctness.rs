use gridbox::{decode_boxes, DetectConfig, GridBoxError, MatrixView, PixelBox};

fn config(grid: (usize, usize), anchors: Vec<(f32, f32)>) -> DetectConfig {
    DetectConfig {
        threshold: 0.5,
        num_classes: 1,
        num_anchors: anchors.len(),
        anchors,
        out_size: grid,
    }
}

#[test]
fn zero_offsets_place_center_in_first_cell() {
    // sigmoid(0) = 0.5, so cell (0, 0) of an 8x8 grid puts the normalized
    // center at 0.5 / 8 = 0.0625. With anchor (2, 2) and tw = th = 0 the
    // extent is 2 / 8 = 0.25 on each axis.
    let cfg = config((8, 8), vec![(2.0, 2.0)]);
    let mut pred = vec![0.0f32; 8 * 8 * 4];
    // Make every other candidate easy to tell apart from the first.
    for row in pred.chunks_mut(4).skip(1) {
        row.copy_from_slice(&[0.0, 0.0, -30.0, -30.0]);
    }
    let view = MatrixView::new(&pred, 64, 4).unwrap();

    let boxes = decode_boxes(&view, &cfg, 64, 64).unwrap();
    assert_eq!(boxes.len(), 64);
    // center 0.0625 * 64 = 4, half extent 0.125 * 64 = 8.
    assert_eq!(boxes[0], PixelBox::new(-4, -4, 12, 12));
    let center_x = (boxes[0].x1 + boxes[0].x2) as f32 / 2.0 / 64.0;
    assert!((center_x - 0.0625).abs() < 1e-6);
}

#[test]
fn rows_are_ordered_cell_major_then_anchor() {
    let cfg = config((2, 2), vec![(1.0, 1.0), (3.0, 3.0)]);
    let pred = vec![0.0f32; 2 * 2 * 2 * 4];
    let view = MatrixView::new(&pred, 8, 4).unwrap();

    let boxes = decode_boxes(&view, &cfg, 100, 100).unwrap();
    // Candidate 1 is cell (0, 0), anchor 1: same center as candidate 0 but
    // three times the extent.
    let w0 = boxes[0].x2 - boxes[0].x1;
    let w1 = boxes[1].x2 - boxes[1].x1;
    assert!(w1 > w0);
    // Candidate 2 is cell (0, 1), anchor 0: shifted one cell right.
    assert!(boxes[2].x1 > boxes[0].x1);
    assert_eq!(boxes[2].y1, boxes[0].y1);
    // Candidate 4 is cell (1, 0), anchor 0: shifted one cell down.
    assert!(boxes[4].y1 > boxes[0].y1);
    assert_eq!(boxes[4].x1, boxes[0].x1);
}

#[test]
fn coordinates_truncate_toward_zero() {
    // Single cell, anchor (0.5, 0.5): corners at 0.25 and 0.75 normalized,
    // scaled by 10 gives 2.5 and 7.5, which truncate to 2 and 7.
    let cfg = config((1, 1), vec![(0.5, 0.5)]);
    let pred = [0.0f32; 4];
    let view = MatrixView::new(&pred, 1, 4).unwrap();

    let boxes = decode_boxes(&view, &cfg, 10, 10).unwrap();
    assert_eq!(boxes[0], PixelBox::new(2, 2, 7, 7));
}

#[test]
fn extreme_extents_stay_finite() {
    let cfg = config((2, 2), vec![(2.0, 2.0)]);
    let mut pred = vec![0.0f32; 2 * 2 * 4];
    pred[2] = 1e12; // tw
    pred[3] = f32::INFINITY; // th
    let view = MatrixView::new(&pred, 4, 4).unwrap();

    let boxes = decode_boxes(&view, &cfg, 480, 640).unwrap();
    // The clamp before exp keeps the decode finite; the box is huge but
    // representable, and still ordered.
    assert!(boxes[0].x1 < boxes[0].x2);
    assert!(boxes[0].y1 < boxes[0].y2);
}

#[test]
fn row_count_mismatch_is_fatal() {
    let cfg = config((8, 8), vec![(2.0, 2.0)]);
    let pred = vec![0.0f32; 10 * 4];
    let view = MatrixView::new(&pred, 10, 4).unwrap();

    let err = decode_boxes(&view, &cfg, 64, 64).err().unwrap();
    assert_eq!(
        err,
        GridBoxError::ShapeMismatch {
            expected: 64,
            got: 10,
            context: "bbox_pred rows",
        }
    );
}

#[test]
fn anchor_count_mismatch_is_fatal() {
    let mut cfg = config((2, 2), vec![(2.0, 2.0)]);
    cfg.num_anchors = 2;
    let pred = vec![0.0f32; 2 * 2 * 2 * 4];
    let view = MatrixView::new(&pred, 8, 4).unwrap();

    let err = decode_boxes(&view, &cfg, 64, 64).err().unwrap();
    assert_eq!(
        err,
        GridBoxError::ShapeMismatch {
            expected: 2,
            got: 1,
            context: "anchors",
        }
    );
}
