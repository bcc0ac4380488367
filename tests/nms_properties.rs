use gridbox::{nms, PixelBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_boxes(rng: &mut StdRng, count: usize) -> (Vec<PixelBox>, Vec<f32>) {
    let mut boxes = Vec::with_capacity(count);
    let mut scores = Vec::with_capacity(count);
    for _ in 0..count {
        let x1 = rng.random_range(0..600);
        let y1 = rng.random_range(0..440);
        let w = rng.random_range(1..120);
        let h = rng.random_range(1..120);
        boxes.push(PixelBox::new(x1, y1, x1 + w, y1 + h));
        scores.push(rng.random_range(0.0f32..1.0f32));
    }
    (boxes, scores)
}

#[test]
fn keep_list_is_a_subset_without_duplicates() {
    let mut rng = StdRng::seed_from_u64(0xB0C5);
    for _ in 0..20 {
        let (boxes, scores) = random_boxes(&mut rng, 200);
        let keep = nms(&boxes, &scores, 0.3);

        assert!(keep.len() <= boxes.len());
        let mut seen = vec![false; boxes.len()];
        for &k in &keep {
            assert!(k < boxes.len());
            assert!(!seen[k], "duplicate index {k} in keep list");
            seen[k] = true;
        }
    }
}

#[test]
fn no_two_survivors_overlap_above_threshold() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..20 {
        let (boxes, scores) = random_boxes(&mut rng, 150);
        let keep = nms(&boxes, &scores, 0.3);

        for (a, &i) in keep.iter().enumerate() {
            for &j in &keep[a + 1..] {
                assert!(
                    boxes[i].iou(&boxes[j]) <= 0.3,
                    "kept boxes {i} and {j} overlap above threshold"
                );
            }
        }
    }
}

#[test]
fn keep_list_is_sorted_by_descending_score() {
    let mut rng = StdRng::seed_from_u64(0xACE);
    let (boxes, scores) = random_boxes(&mut rng, 100);
    let keep = nms(&boxes, &scores, 0.3);

    for pair in keep.windows(2) {
        assert!(scores[pair[0]] >= scores[pair[1]]);
    }
}

#[test]
fn suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x1D3);
    let (boxes, scores) = random_boxes(&mut rng, 120);
    let keep = nms(&boxes, &scores, 0.3);

    let kept_boxes: Vec<_> = keep.iter().map(|&k| boxes[k]).collect();
    let kept_scores: Vec<_> = keep.iter().map(|&k| scores[k]).collect();
    let again = nms(&kept_boxes, &kept_scores, 0.3);

    let identity: Vec<usize> = (0..kept_boxes.len()).collect();
    assert_eq!(again, identity);
}

#[test]
fn nested_lower_score_box_is_suppressed() {
    // B sits fully inside A: IoU = 64/100 = 0.64 > 0.3.
    let boxes = [PixelBox::new(0, 0, 10, 10), PixelBox::new(1, 1, 9, 9)];
    let scores = [0.9, 0.5];
    assert_eq!(nms(&boxes, &scores, 0.3), vec![0]);
}

#[test]
fn disjoint_boxes_survive_in_score_order() {
    let boxes = [PixelBox::new(0, 0, 10, 10), PixelBox::new(20, 20, 30, 30)];
    let scores = [0.9, 0.8];
    assert_eq!(nms(&boxes, &scores, 0.99), vec![0, 1]);
}

#[test]
fn tie_break_is_deterministic_across_runs() {
    let boxes = [
        PixelBox::new(0, 0, 10, 10),
        PixelBox::new(100, 100, 110, 110),
        PixelBox::new(200, 200, 210, 210),
    ];
    let scores = [0.5, 0.5, 0.5];

    let first = nms(&boxes, &scores, 0.3);
    for _ in 0..10 {
        assert_eq!(nms(&boxes, &scores, 0.3), first);
    }
    assert_eq!(first, vec![0, 1, 2]);
}

#[test]
fn zero_area_boxes_never_suppress_anything() {
    let boxes = [
        PixelBox::new(5, 5, 5, 5),
        PixelBox::new(0, 0, 10, 10),
        PixelBox::new(9, 9, 1, 1),
    ];
    let scores = [0.9, 0.8, 0.7];
    // The degenerate boxes win nothing; all three survive.
    assert_eq!(nms(&boxes, &scores, 0.0), vec![0, 1, 2]);
}
