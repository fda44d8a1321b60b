//! Polygon reduction: approximate a contour with the fewest straight
//! segments that keep every lattice point within tolerance.
//!
//! Two stages, both exact-integer where possible:
//!
//! 1. `calc_lon` computes, for every contour point, the furthest point
//!    reachable by a single "straight" segment. Straightness is a
//!    half-pixel criterion, enforced with an integer cross-product
//!    constraint pair rather than floating-point distances.
//! 2. `best_polygon` runs a shortest-path dynamic program over the
//!    allowed segments, minimizing segment count and breaking ties by
//!    the accumulated least-squares deviation (`penalty3`). Fixed
//!    iteration order and strict comparisons keep the result
//!    deterministic for a given contour.

use crate::geometry::{cyclic, mod_n, sign_i, xprod};
use crate::trace::Contour;
use crate::types::PixelPoint;

/// Sentinel for "no clip bound found yet" in the straightness back-off.
const NO_BOUND: i64 = 10_000_000;

/// Running coordinate sums over a contour prefix, relative to the
/// contour's first point. Entry `i` sums points `0..i`; the table has
/// `len + 1` entries so any cyclic segment sum is a difference of two
/// entries (plus full wraps).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sums {
    pub x: f64,
    pub y: f64,
    pub xy: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Build the prefix-sum table for a contour.
pub(crate) fn calc_sums(contour: &Contour) -> Vec<Sums> {
    let points = contour.points();
    let origin = points[0];

    let mut sums = Vec::with_capacity(points.len() + 1);
    sums.push(Sums::default());
    for (i, p) in points.iter().enumerate() {
        let x = f64::from(p.x - origin.x);
        let y = f64::from(p.y - origin.y);
        let prev = sums[i];
        sums.push(Sums {
            x: prev.x + x,
            y: prev.y + y,
            xy: prev.xy + x * y,
            x2: prev.x2 + x * x,
            y2: prev.y2 + y * y,
        });
    }
    sums
}

/// For each point, the index of the next "corner": the next point that
/// differs from it in both coordinates.
fn next_corners(points: &[PixelPoint]) -> Vec<usize> {
    let n = points.len();
    let mut nc = vec![0usize; n];
    let mut k = 0usize;
    for i in (0..n).rev() {
        if points[i].x != points[k].x && points[i].y != points[k].y {
            // Consecutive lattice points never differ in both axes,
            // so this cannot fire at i == n - 1; k stays in range.
            k = i + 1;
        }
        nc[i] = k;
    }
    nc
}

/// Direction histogram index for a lattice step: maps the four unit
/// directions onto 0..4.
fn direction_index(dx: i64, dy: i64) -> usize {
    ((3 + 3 * sign_i(dx) + sign_i(dy)) / 2) as usize
}

/// For each point `i`, find the furthest point `pivk[i]` such that the
/// segment from `i` stays straight (every intermediate point within the
/// half-pixel bound, and no four-direction spiral).
fn find_pivots(points: &[PixelPoint], nc: &[usize]) -> Vec<usize> {
    let n = points.len();
    let mut pivk = vec![0usize; n];

    for i in (0..n).rev() {
        let mut ct = [0i32; 4];
        let j = mod_n(i as isize + 1, n);
        ct[direction_index(
            i64::from(points[j].x - points[i].x),
            i64::from(points[j].y - points[i].y),
        )] += 1;

        let mut constraint = [(0i64, 0i64); 2];
        let mut k = nc[i];
        let mut k1 = i;
        let mut found = false;

        loop {
            ct[direction_index(
                i64::from(points[k].x - points[k1].x),
                i64::from(points[k].y - points[k1].y),
            )] += 1;

            // All four directions used: the segment would spiral.
            if ct[0] != 0 && ct[1] != 0 && ct[2] != 0 && ct[3] != 0 {
                pivk[i] = k1;
                found = true;
                break;
            }

            let cur = (
                i64::from(points[k].x - points[i].x),
                i64::from(points[k].y - points[i].y),
            );
            if xprod(constraint[0], cur) < 0 || xprod(constraint[1], cur) > 0 {
                break;
            }

            // Points inside the unit square never tighten the constraint.
            if cur.0.abs() > 1 || cur.1.abs() > 1 {
                let off = (
                    cur.0 + if cur.1 >= 0 && (cur.1 > 0 || cur.0 < 0) { 1 } else { -1 },
                    cur.1 + if cur.0 <= 0 && (cur.0 < 0 || cur.1 < 0) { 1 } else { -1 },
                );
                if xprod(constraint[0], off) >= 0 {
                    constraint[0] = off;
                }
                let off = (
                    cur.0 + if cur.1 <= 0 && (cur.1 < 0 || cur.0 < 0) { 1 } else { -1 },
                    cur.1 + if cur.0 >= 0 && (cur.0 > 0 || cur.1 < 0) { 1 } else { -1 },
                );
                if xprod(constraint[1], off) <= 0 {
                    constraint[1] = off;
                }
            }

            k1 = k;
            k = nc[k1];
            if !cyclic(k, i, k1) {
                break;
            }
        }

        if !found {
            // The constraint broke between k1 and k: back off along the
            // step direction to the last point still inside it.
            let dk = (
                sign_i(i64::from(points[k].x - points[k1].x)),
                sign_i(i64::from(points[k].y - points[k1].y)),
            );
            let cur = (
                i64::from(points[k1].x - points[i].x),
                i64::from(points[k1].y - points[i].y),
            );

            let a = xprod(constraint[0], cur);
            let b = xprod(constraint[0], dk);
            let c = xprod(constraint[1], cur);
            let d = xprod(constraint[1], dk);

            let mut steps = NO_BOUND;
            if b < 0 {
                steps = a.div_euclid(-b);
            }
            if d > 0 {
                steps = steps.min((-c).div_euclid(d));
            }
            pivk[i] = mod_n((k1 as i64 + steps) as isize, n);
        }
    }

    pivk
}

/// Collapse pivot candidates into the longest-straight-subpath table:
/// `lon[i]` is the furthest endpoint of a straight segment starting at
/// `i`, made cyclically consistent.
fn compute_lon(pivk: &[usize]) -> Vec<usize> {
    let n = pivk.len();
    let mut lon = vec![0usize; n];

    let mut j = pivk[n - 1];
    lon[n - 1] = j;
    for i in (0..n - 1).rev() {
        if cyclic(i + 1, pivk[i], j) {
            j = pivk[i];
        }
        lon[i] = j;
    }

    let mut i = n - 1;
    while cyclic(mod_n(i as isize + 1, n), j, lon[i]) {
        lon[i] = j;
        if i == 0 {
            break;
        }
        i -= 1;
    }

    lon
}

/// Least-squares penalty of approximating the cyclic point range
/// `i..=j` by the straight segment from point `i` to point `j`.
///
/// `j` may equal or exceed `n` to express a wrapped range; the index
/// is reduced before any table access.
fn penalty3(points: &[PixelPoint], sums: &[Sums], i: usize, j: usize) -> f64 {
    let n = points.len();
    let (j, wrapped) = if j >= n { (j - n, true) } else { (j, false) };

    let (x, y, x2, xy, y2, k) = if wrapped {
        (
            sums[j + 1].x - sums[i].x + sums[n].x,
            sums[j + 1].y - sums[i].y + sums[n].y,
            sums[j + 1].x2 - sums[i].x2 + sums[n].x2,
            sums[j + 1].xy - sums[i].xy + sums[n].xy,
            sums[j + 1].y2 - sums[i].y2 + sums[n].y2,
            (j + 1 + n - i) as f64,
        )
    } else {
        (
            sums[j + 1].x - sums[i].x,
            sums[j + 1].y - sums[i].y,
            sums[j + 1].x2 - sums[i].x2,
            sums[j + 1].xy - sums[i].xy,
            sums[j + 1].y2 - sums[i].y2,
            (j + 1 - i) as f64,
        )
    };

    let px = f64::from(points[i].x + points[j].x) / 2.0 - f64::from(points[0].x);
    let py = f64::from(points[i].y + points[j].y) / 2.0 - f64::from(points[0].y);
    let ey = f64::from(points[j].x - points[i].x);
    let ex = -f64::from(points[j].y - points[i].y);

    let a = (x2 - 2.0 * x * px) / k + px * px;
    let b = (xy - x * py - y * px) / k + px * py;
    let c = (y2 - 2.0 * y * py) / k + py * py;

    (ex * ex * a + 2.0 * ex * ey * b + ey * ey * c).sqrt()
}

/// Find the optimal polygon for a contour: the vertex index sequence
/// with the fewest segments, ties broken by total deviation.
///
/// The returned indices are cyclically increasing positions into
/// `contour.points()`.
pub(crate) fn best_polygon(contour: &Contour, sums: &[Sums]) -> Vec<usize> {
    let points = contour.points();
    let n = points.len();
    let lon = compute_lon(&find_pivots(points, &next_corners(points)));

    // clip0[i]: furthest segment endpoint allowed from i.
    let mut clip0 = vec![0usize; n];
    for (i, clip) in clip0.iter_mut().enumerate() {
        let mut c = mod_n(lon[mod_n(i as isize - 1, n)] as isize - 1, n);
        if c == i {
            c = mod_n(i as isize + 1, n);
        }
        *clip = if c < i { n } else { c };
    }

    // clip1[j]: earliest segment start that can reach j.
    let mut clip1 = vec![0usize; n + 1];
    let mut j = 1usize;
    for (i, &clip) in clip0.iter().enumerate() {
        while j <= clip {
            clip1[j] = i;
            j += 1;
        }
    }

    // seg0[j]: furthest point reachable with j segments from 0.
    let mut seg0 = Vec::new();
    let mut i = 0usize;
    while i < n {
        seg0.push(i);
        i = clip0[i];
    }
    seg0.push(n);
    let m = seg0.len() - 1;

    // seg1[j]: earliest point from which n is reachable in m - j segments.
    let mut seg1 = vec![0usize; m + 1];
    let mut i = n;
    for j in (1..=m).rev() {
        seg1[j] = i;
        i = clip1[i];
    }
    seg1[0] = 0;

    // Shortest path over allowed segments; within the fixed segment
    // count, minimize accumulated penalty.
    let mut pen = vec![0.0f64; n + 1];
    let mut prev = vec![0usize; n + 1];
    for j in 1..=m {
        for i in seg1[j]..=seg0[j] {
            let mut best = -1.0f64;
            for k in (clip1[i]..=seg0[j - 1]).rev() {
                let this_pen = penalty3(points, sums, k, i) + pen[k];
                if best < 0.0 || this_pen < best {
                    prev[i] = k;
                    best = this_pen;
                }
            }
            pen[i] = best;
        }
    }

    let mut po = vec![0usize; m];
    let mut i = n;
    for j in (0..m).rev() {
        i = prev[i];
        po[j] = i;
    }
    po
}
