//! End-to-end tracing tests over synthetic shapes.

#![allow(clippy::unwrap_used)]

use sumi_trace::{Bitmap, Sign, TraceConfig, TurnPolicy, render_curve, trace};

fn filled_square() -> Bitmap {
    Bitmap::from_fn(10, 10, |_, _| true).unwrap()
}

fn disc(size: u32, radius: f64) -> Bitmap {
    let c = f64::from(size - 1) / 2.0;
    Bitmap::from_fn(size, size, |x, y| {
        let dx = f64::from(x) - c;
        let dy = f64::from(y) - c;
        dx * dx + dy * dy <= radius * radius
    })
    .unwrap()
}

#[test]
fn filled_square_renders_golden_path_data() {
    let paths = trace(filled_square(), &TraceConfig::default()).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].sign(), Sign::Plus);

    let d = render_curve(paths[0].curve(), 1.0);
    assert_eq!(d, "M 5 0 L 0 0 0 5 L 0 10 5 10 L 10 10 10 5 L 10 0 5 0 ");
}

#[test]
fn disc_produces_smooth_segments_inside_its_bounds() {
    let paths = trace(disc(64, 24.0), &TraceConfig::default()).unwrap();
    assert_eq!(paths.len(), 1);

    let curve = paths[0].curve();
    let has_smooth = (0..curve.len()).any(|i| curve.tag(i) == sumi_trace::SegmentTag::Curve);
    assert!(has_smooth, "a disc boundary must smooth into curves");

    // Every control point stays near the disc.
    for i in 0..curve.len() {
        for p in curve.control_points(i) {
            let dx = p.x - 31.5;
            let dy = p.y - 31.5;
            assert!(
                (dx * dx + dy * dy).sqrt() < 30.0,
                "control point {p:?} strays from the disc"
            );
        }
    }
}

#[test]
fn ring_traces_outer_before_inner_with_opposite_signs() {
    let ring = Bitmap::from_fn(40, 40, |x, y| {
        let dx = f64::from(x) - 19.5;
        let dy = f64::from(y) - 19.5;
        let r = (dx * dx + dy * dy).sqrt();
        (6.0..=15.0).contains(&r)
    })
    .unwrap();
    let paths = trace(ring, &TraceConfig::default()).unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].sign(), Sign::Plus);
    assert_eq!(paths[1].sign(), Sign::Minus);
}

#[test]
fn every_turn_policy_traces_a_checkerboard() {
    for policy in [
        TurnPolicy::Black,
        TurnPolicy::White,
        TurnPolicy::Left,
        TurnPolicy::Right,
        TurnPolicy::Minority,
        TurnPolicy::Majority,
    ] {
        let board = Bitmap::from_fn(16, 16, |x, y| (x / 2 + y / 2) % 2 == 0).unwrap();
        let config = TraceConfig {
            turn_policy: policy,
            turd_size: 0,
            ..TraceConfig::default()
        };
        let paths = trace(board, &config).unwrap();
        assert!(!paths.is_empty(), "policy {policy:?} lost the board");
        for path in &paths {
            assert!(!path.curve().is_empty());
        }
    }
}

#[test]
fn rendered_scale_is_linear_across_the_whole_document() {
    let paths = trace(disc(32, 12.0), &TraceConfig::default()).unwrap();
    let d1 = render_curve(paths[0].curve(), 1.0);
    let d3 = render_curve(paths[0].curve(), 3.0);

    let nums = |d: &str| -> Vec<f64> {
        d.split_whitespace()
            .filter_map(|t| t.trim_end_matches(',').parse().ok())
            .collect()
    };
    let a = nums(&d1);
    let b = nums(&d3);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        // Coordinates are rounded to 3 decimals after scaling.
        assert!((x * 3.0 - y).abs() < 2e-3);
    }
}

#[test]
fn turd_size_filters_small_islands_only() {
    let noisy = Bitmap::from_fn(30, 30, |x, y| {
        let big = (5..20).contains(&x) && (5..20).contains(&y);
        let speck = x == 25 && y == 25;
        big || speck
    })
    .unwrap();

    let paths = trace(noisy.clone(), &TraceConfig::default()).unwrap();
    assert_eq!(paths.len(), 1, "the speck must be despeckled");

    let keep_all = TraceConfig {
        turd_size: 0,
        ..TraceConfig::default()
    };
    let paths = trace(noisy, &keep_all).unwrap();
    assert_eq!(paths.len(), 2);
}
