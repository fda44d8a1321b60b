//! Curve construction on top of the reduced polygon: vertex
//! adjustment by least-squares line fitting, corner detection and
//! smoothing, and the optional curve-joining optimization pass.

use serde::{Deserialize, Serialize};

use crate::geometry::{
    Quad, bezier, cprod, ddenom, ddist, dpara, interval, iprod, iprod1, mod_n, sign_f, tangent,
};
use crate::polygon::Sums;
use crate::trace::Contour;
use crate::types::Point;

/// Fraction of the unit square a vertex may move during adjustment.
const HALF: f64 = 0.5;

/// Divisor applied to the raw corner measure before comparing against
/// `alpha_max`.
const ALPHA_SCALE: f64 = 0.75;

/// Smallest alpha used when emitting a smooth segment.
const ALPHA_FLOOR: f64 = 0.55;

/// Alpha assigned when the corner measure is degenerate (collinear
/// neighbors); always at or above any admissible `alpha_max`.
const DEGENERATE_ALPHA: f64 = 4.0 / 3.0;

/// Weight of the curvature term in the optimization area balance.
const PENALTY_RATIO: f64 = 0.3;

/// Scale applied to the vertex-side deviation bound during the
/// optimization penalty scan.
const CURVATURE_SCALE: f64 = 0.75;

/// How a curve segment meets its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTag {
    /// Two straight lines through the vertex.
    Corner,
    /// A cubic Bezier segment.
    Curve,
}

/// A closed sequence of curve segments.
///
/// Segment `i` ends at control point `c[3i + 2]`; a closed path starts
/// from the final segment's endpoint. Corner segments use only the
/// last two control points (vertex and outgoing midpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    tags: Vec<SegmentTag>,
    c: Vec<Point>,
    vertex: Vec<Point>,
    alpha: Vec<f64>,
    alpha0: Vec<f64>,
    beta: Vec<f64>,
}

impl Curve {
    pub(crate) fn with_segments(n: usize) -> Self {
        Self {
            tags: vec![SegmentTag::Corner; n],
            c: vec![Point::new(0.0, 0.0); 3 * n],
            vertex: vec![Point::new(0.0, 0.0); n],
            alpha: vec![0.0; n],
            alpha0: vec![0.0; n],
            beta: vec![0.0; n],
        }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the curve has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag of segment `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn tag(&self, i: usize) -> SegmentTag {
        self.tags[i]
    }

    /// Control points of segment `i`. For corners only the last two
    /// carry meaning.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn control_points(&self, i: usize) -> [Point; 3] {
        [self.c[3 * i], self.c[3 * i + 1], self.c[3 * i + 2]]
    }

    /// Adjusted vertex of segment `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point {
        self.vertex[i]
    }

    /// Reverse the vertex order in place. Applied to hole contours so
    /// every curve winds the same way before smoothing.
    pub(crate) fn reverse(&mut self) {
        self.vertex.reverse();
    }
}

/// Fit a straight line to the cyclic point range `i..=j` of the
/// contour and return its center of mass and unit direction. The
/// direction is the dominant eigenvector of the coordinate covariance;
/// a zero vector marks a degenerate (single point) range.
fn point_slope(contour: &Contour, sums: &[Sums], i: usize, j: usize) -> (Point, Point) {
    let n = contour.len();
    let mut i = i as i64;
    let mut j = j as i64;
    let mut wraps = 0i64;

    while j >= n as i64 {
        j -= n as i64;
        wraps += 1;
    }
    while i >= n as i64 {
        i -= n as i64;
        wraps -= 1;
    }
    while j < 0 {
        j += n as i64;
        wraps -= 1;
    }
    while i < 0 {
        i += n as i64;
        wraps += 1;
    }
    let (i, j) = (i as usize, j as usize);
    let w = wraps as f64;

    let x = sums[j + 1].x - sums[i].x + w * sums[n].x;
    let y = sums[j + 1].y - sums[i].y + w * sums[n].y;
    let x2 = sums[j + 1].x2 - sums[i].x2 + w * sums[n].x2;
    let xy = sums[j + 1].xy - sums[i].xy + w * sums[n].xy;
    let y2 = sums[j + 1].y2 - sums[i].y2 + w * sums[n].y2;
    let k = (j as i64 + 1 - i as i64 + wraps * n as i64) as f64;

    let ctr = Point::new(x / k, y / k);

    let mut a = (x2 - x * x / k) / k;
    let b = (xy - x * y / k) / k;
    let mut c = (y2 - y * y / k) / k;

    // Larger eigenvalue of the covariance matrix.
    let lambda2 = (a + c + ((a - c) * (a - c) + 4.0 * b * b).sqrt()) / 2.0;
    a -= lambda2;
    c -= lambda2;

    let dir = if a.abs() >= c.abs() {
        let len = (a * a + b * b).sqrt();
        if len == 0.0 {
            Point::new(0.0, 0.0)
        } else {
            Point::new(-b / len, a / len)
        }
    } else {
        let len = (c * c + b * b).sqrt();
        if len == 0.0 {
            Point::new(0.0, 0.0)
        } else {
            Point::new(-c / len, b / len)
        }
    };

    (ctr, dir)
}

/// Quadratic form measuring squared distance to the line through `ctr`
/// with direction `dir`; zero form when the direction is degenerate.
fn line_quadform(ctr: Point, dir: Point) -> Quad {
    let mut q = Quad::zero();
    let d = dir.x * dir.x + dir.y * dir.y;
    if d == 0.0 {
        return q;
    }
    let v = [dir.y, -dir.x, dir.x * ctr.y - dir.y * ctr.x];
    for row in 0..3 {
        for col in 0..3 {
            q.set(row, col, v[row] * v[col] / d);
        }
    }
    q
}

/// Minimize the quadratic form `q` over the unit square centered on
/// `s`: try the unconstrained minimum, then each edge, then the four
/// corners.
fn optimize_vertex(q: &Quad, s: Point) -> Point {
    let det = q.at(0, 0) * q.at(1, 1) - q.at(0, 1) * q.at(1, 0);
    if det != 0.0 {
        let cand = Point::new(
            (-q.at(0, 2) * q.at(1, 1) + q.at(1, 2) * q.at(0, 1)) / det,
            (q.at(0, 2) * q.at(1, 0) - q.at(1, 2) * q.at(0, 0)) / det,
        );
        if (cand.x - s.x).abs() <= HALF && (cand.y - s.y).abs() <= HALF {
            return cand;
        }
    }

    let mut min_err = q.apply(s);
    let mut best = s;

    if q.at(0, 0) != 0.0 {
        for offset in 0..2 {
            let y = s.y - HALF + f64::from(offset);
            let x = -(q.at(0, 1) * y + q.at(0, 2)) / q.at(0, 0);
            let cand = Point::new(x, y);
            let err = q.apply(cand);
            if (x - s.x).abs() <= HALF && err < min_err {
                min_err = err;
                best = cand;
            }
        }
    }

    if q.at(1, 1) != 0.0 {
        for offset in 0..2 {
            let x = s.x - HALF + f64::from(offset);
            let y = -(q.at(1, 0) * x + q.at(1, 2)) / q.at(1, 1);
            let cand = Point::new(x, y);
            let err = q.apply(cand);
            if (y - s.y).abs() <= HALF && err < min_err {
                min_err = err;
                best = cand;
            }
        }
    }

    for dx in 0..2 {
        for dy in 0..2 {
            let cand = Point::new(s.x - HALF + f64::from(dx), s.y - HALF + f64::from(dy));
            let err = q.apply(cand);
            if err < min_err {
                min_err = err;
                best = cand;
            }
        }
    }

    best
}

/// Place one curve vertex per polygon segment: intersect the fitted
/// lines of adjacent segments, constrained to the unit square around
/// the original lattice vertex.
pub(crate) fn adjust_vertices(contour: &Contour, sums: &[Sums], polygon: &[usize]) -> Curve {
    let m = polygon.len();
    let n = contour.len();
    let points = contour.points();
    let origin = points[0];

    let mut forms = Vec::with_capacity(m);
    for (i, &start) in polygon.iter().enumerate() {
        let j = polygon[mod_n(i as isize + 1, m)];
        let j = mod_n(j as isize - start as isize, n) + start;
        let (ctr, dir) = point_slope(contour, sums, start, j);
        forms.push(line_quadform(ctr, dir));
    }

    let mut curve = Curve::with_segments(m);
    for i in 0..m {
        let mut q = Quad::zero();
        let prev = mod_n(i as isize - 1, m);
        for row in 0..3 {
            for col in 0..3 {
                q.set(row, col, forms[prev].at(row, col) + forms[i].at(row, col));
            }
        }

        let p = points[polygon[i]];
        let s = Point::new(f64::from(p.x - origin.x), f64::from(p.y - origin.y));

        // Regularize a singular form by pinning the fitted line through
        // the original vertex.
        loop {
            let det = q.at(0, 0) * q.at(1, 1) - q.at(0, 1) * q.at(1, 0);
            if det != 0.0 {
                break;
            }
            let v = if q.at(0, 0) > q.at(1, 1) {
                [-q.at(0, 1), q.at(0, 0)]
            } else if q.at(1, 1) != 0.0 {
                [-q.at(1, 1), q.at(1, 0)]
            } else {
                [1.0, 0.0]
            };
            let d = v[0] * v[0] + v[1] * v[1];
            let v = [v[0], v[1], -v[1] * s.y - v[0] * s.x];
            for row in 0..3 {
                for col in 0..3 {
                    let add = v[row] * v[col] / d;
                    q.set(row, col, q.at(row, col) + add);
                }
            }
        }

        let w = optimize_vertex(&q, s);
        curve.vertex[i] = Point::new(w.x + f64::from(origin.x), w.y + f64::from(origin.y));
    }

    curve
}

/// Classify each vertex as corner or smooth and fill in control
/// points. `alpha_max` is the corner threshold: larger values turn
/// more vertices into smooth segments.
pub(crate) fn smooth(curve: &mut Curve, alpha_max: f64) {
    let m = curve.len();

    for i in 0..m {
        let j = mod_n(i as isize + 1, m);
        let k = mod_n(i as isize + 2, m);
        let mid = interval(0.5, curve.vertex[k], curve.vertex[j]);

        let denom = ddenom(curve.vertex[i], curve.vertex[k]);
        let mut alpha = if denom == 0.0 {
            DEGENERATE_ALPHA
        } else {
            let dd = (dpara(curve.vertex[i], curve.vertex[j], curve.vertex[k]) / denom).abs();
            let raw = if dd > 1.0 { 1.0 - 1.0 / dd } else { 0.0 };
            raw / ALPHA_SCALE
        };
        curve.alpha0[j] = alpha;

        if alpha >= alpha_max {
            curve.tags[j] = SegmentTag::Corner;
            curve.c[3 * j + 1] = curve.vertex[j];
            curve.c[3 * j + 2] = mid;
        } else {
            alpha = alpha.clamp(ALPHA_FLOOR, 1.0);
            curve.tags[j] = SegmentTag::Curve;
            curve.c[3 * j] = interval(0.5 + 0.5 * alpha, curve.vertex[i], curve.vertex[j]);
            curve.c[3 * j + 1] = interval(0.5 + 0.5 * alpha, curve.vertex[k], curve.vertex[j]);
            curve.c[3 * j + 2] = mid;
        }
        curve.alpha[j] = alpha;
        curve.beta[j] = 0.5;
    }
}

/// Candidate replacement for a run of smooth segments.
#[derive(Debug, Clone, Copy)]
struct Opti {
    pen: f64,
    c: [Point; 2],
    t: f64,
    s: f64,
    alpha: f64,
}

/// Evaluate replacing segments `i + 1 ..= j` (cyclic) with a single
/// Bezier. Returns the candidate and its squared-deviation penalty, or
/// `None` if the run is not uniformly convex or the candidate strays
/// beyond `tolerance`.
#[allow(clippy::too_many_lines)]
fn opti_penalty(
    curve: &Curve,
    i: usize,
    j: usize,
    tolerance: f64,
    convexity: &[i64],
    area_cum: &[f64],
) -> Option<Opti> {
    let m = curve.len();
    if i == j {
        return None;
    }

    let i1 = mod_n(i as isize + 1, m);
    let conv = convexity[i1];
    if conv == 0 {
        return None;
    }

    // The run must keep one convexity sign, never turn back on itself,
    // and never come close to reversing direction.
    let d = ddist(curve.vertex[i], curve.vertex[i1]);
    let mut k = i1;
    while k != j {
        let k1 = mod_n(k as isize + 1, m);
        let k2 = mod_n(k as isize + 2, m);
        if convexity[k1] != conv {
            return None;
        }
        if sign_f(cprod(
            curve.vertex[i],
            curve.vertex[i1],
            curve.vertex[k1],
            curve.vertex[k2],
        )) != conv
        {
            return None;
        }
        if iprod1(
            curve.vertex[i],
            curve.vertex[i1],
            curve.vertex[k1],
            curve.vertex[k2],
        ) < d * ddist(curve.vertex[k1], curve.vertex[k2]) * COS_179
        {
            return None;
        }
        k = k1;
    }

    let p0 = curve.c[3 * i + 2];
    let mut p1 = curve.vertex[i1];
    let mut p2 = curve.vertex[j];
    let p3 = curve.c[3 * j + 2];

    let mut area = area_cum[j] - area_cum[i];
    area -= dpara(curve.vertex[0], curve.c[3 * i + 2], curve.c[3 * j + 2]) / 2.0;
    if i >= j {
        area += area_cum[m];
    }

    let a1 = dpara(p0, p1, p2);
    let a2 = dpara(p0, p1, p3);
    let a3 = dpara(p0, p2, p3);
    let a4 = a1 + a3 - a2;

    if a2 == a1 {
        return None;
    }

    let t = a3 / (a3 - a4);
    let s = a2 / (a2 - a1);
    let a = a2 * t / 2.0;
    if a == 0.0 {
        return None;
    }

    let r = area / a;
    let alpha = 2.0 - (4.0 - r / PENALTY_RATIO).sqrt();

    let c0 = interval(t * alpha, p0, p1);
    let c1 = interval(s * alpha, p3, p2);
    p1 = c0;
    p2 = c1;
    let mut pen = 0.0;

    // The candidate must stay within tolerance of every replaced chord.
    let mut k = i1;
    while k != j {
        let k1 = mod_n(k as isize + 1, m);
        let t = tangent(p0, p1, p2, p3, curve.vertex[k], curve.vertex[k1])?;
        let pt = bezier(t, p0, p1, p2, p3);
        let d = ddist(curve.vertex[k], curve.vertex[k1]);
        if d == 0.0 {
            return None;
        }
        let d1 = dpara(curve.vertex[k], curve.vertex[k1], pt) / d;
        if d1.abs() > tolerance {
            return None;
        }
        if iprod(curve.vertex[k], curve.vertex[k1], pt) < 0.0
            || iprod(curve.vertex[k1], curve.vertex[k], pt) < 0.0
        {
            return None;
        }
        pen += d1 * d1;
        k = k1;
    }

    // And within tolerance of every replaced endpoint chord, allowing
    // the inward slack the original curvature permitted.
    let mut k = i;
    while k != j {
        let k1 = mod_n(k as isize + 1, m);
        let t = tangent(p0, p1, p2, p3, curve.c[3 * k + 2], curve.c[3 * k1 + 2])?;
        let pt = bezier(t, p0, p1, p2, p3);
        let d = ddist(curve.c[3 * k + 2], curve.c[3 * k1 + 2]);
        if d == 0.0 {
            return None;
        }
        let mut d1 = dpara(curve.c[3 * k + 2], curve.c[3 * k1 + 2], pt) / d;
        let mut d2 = dpara(curve.c[3 * k + 2], curve.c[3 * k1 + 2], curve.vertex[k1]) / d;
        d2 *= CURVATURE_SCALE * curve.alpha[k1];
        if d2 < 0.0 {
            d1 = -d1;
            d2 = -d2;
        }
        if d1 < d2 - tolerance {
            return None;
        }
        if d1 < d2 {
            pen += (d1 - d2) * (d1 - d2);
        }
        k = k1;
    }

    Some(Opti {
        pen,
        c: [c0, c1],
        t,
        s,
        alpha,
    })
}

/// Cosine of 179 degrees; chords closer to antiparallel than this
/// reject the candidate.
const COS_179: f64 = -0.999_847_695_156;

/// Join runs of smooth segments into single Beziers where the result
/// stays within `tolerance` of the original curve. Returns the curve
/// with the fewest segments, ties broken by accumulated penalty.
pub(crate) fn opti_curve(curve: &Curve, tolerance: f64) -> Curve {
    let m = curve.len();

    let mut convexity = vec![0i64; m];
    for i in 0..m {
        if curve.tags[i] == SegmentTag::Curve {
            convexity[i] = sign_f(dpara(
                curve.vertex[mod_n(i as isize - 1, m)],
                curve.vertex[i],
                curve.vertex[mod_n(i as isize + 1, m)],
            ));
        }
    }

    // Cumulative signed area swept by the curve, used to pick the
    // replacement's curvature so area is preserved.
    let mut area_cum = vec![0.0f64; m + 1];
    let mut area = 0.0;
    let p0 = curve.vertex[0];
    for i in 0..m {
        let i1 = mod_n(i as isize + 1, m);
        if curve.tags[i1] == SegmentTag::Curve {
            let alpha = curve.alpha[i1];
            area += PENALTY_RATIO * alpha * (4.0 - alpha)
                * dpara(curve.c[3 * i + 2], curve.vertex[i1], curve.c[3 * i1 + 2])
                / 2.0;
            area += dpara(p0, curve.c[3 * i + 2], curve.c[3 * i1 + 2]) / 2.0;
        }
        area_cum[i + 1] = area;
    }

    let mut prev = vec![0usize; m + 1];
    let mut pen = vec![0.0f64; m + 1];
    let mut len = vec![0usize; m + 1];
    let mut opt: Vec<Option<Opti>> = vec![None; m + 1];

    for j in 1..=m {
        prev[j] = j - 1;
        pen[j] = pen[j - 1];
        len[j] = len[j - 1] + 1;
        opt[j] = None;

        for i in (0..j.saturating_sub(1)).rev() {
            let Some(o) = opti_penalty(curve, i, mod_n(j as isize, m), tolerance, &convexity, &area_cum)
            else {
                break;
            };
            if len[j] > len[i] + 1 || (len[j] == len[i] + 1 && pen[j] > pen[i] + o.pen) {
                prev[j] = i;
                pen[j] = pen[i] + o.pen;
                len[j] = len[i] + 1;
                opt[j] = Some(o);
            }
        }
    }

    let om = len[m];
    let mut out = Curve::with_segments(om);
    let mut s_params = vec![0.0f64; om];
    let mut t_params = vec![0.0f64; om];

    let mut j = m;
    for i in (0..om).rev() {
        let jm = mod_n(j as isize, m);
        if prev[j] == j - 1 {
            out.tags[i] = curve.tags[jm];
            out.c[3 * i] = curve.c[3 * jm];
            out.c[3 * i + 1] = curve.c[3 * jm + 1];
            out.c[3 * i + 2] = curve.c[3 * jm + 2];
            out.vertex[i] = curve.vertex[jm];
            out.alpha[i] = curve.alpha[jm];
            out.alpha0[i] = curve.alpha0[jm];
            out.beta[i] = curve.beta[jm];
            s_params[i] = 1.0;
            t_params[i] = 1.0;
        } else if let Some(o) = opt[j] {
            out.tags[i] = SegmentTag::Curve;
            out.c[3 * i] = o.c[0];
            out.c[3 * i + 1] = o.c[1];
            out.c[3 * i + 2] = curve.c[3 * jm + 2];
            out.vertex[i] = interval(o.s, curve.c[3 * jm + 2], curve.vertex[jm]);
            out.alpha[i] = o.alpha;
            out.alpha0[i] = o.alpha;
            s_params[i] = o.s;
            t_params[i] = o.t;
        }
        j = prev[j];
    }

    for i in 0..om {
        let i1 = mod_n(i as isize + 1, om);
        out.beta[i] = s_params[i] / (s_params[i] + t_params[i1]);
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::polygon::{best_polygon, calc_sums};
    use crate::trace::{TurnPolicy, trace_contours};

    fn square_curve() -> Curve {
        let mut bitmap =
            Bitmap::from_fn(20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y)).unwrap();
        let mut contours = trace_contours(&mut bitmap, TurnPolicy::default(), 2).unwrap();
        let contour = contours.remove(0);
        let sums = calc_sums(&contour);
        let po = best_polygon(&contour, &sums);
        adjust_vertices(&contour, &sums, &po)
    }

    #[test]
    fn adjusted_vertices_land_on_square_corners() {
        let curve = square_curve();
        assert_eq!(curve.len(), 4);

        let mut vs: Vec<(i64, i64)> = (0..4)
            .map(|i| {
                let v = curve.vertex(i);
                (v.x.round() as i64, v.y.round() as i64)
            })
            .collect();
        vs.sort_unstable();
        assert_eq!(vs, vec![(5, 5), (5, 15), (15, 5), (15, 15)]);

        // The adjusted positions sit exactly on the lattice corners.
        for i in 0..4 {
            let v = curve.vertex(i);
            assert!((v.x - v.x.round()).abs() < 1e-6);
            assert!((v.y - v.y.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn right_angles_become_corners() {
        let mut curve = square_curve();
        smooth(&mut curve, 1.0);
        for i in 0..curve.len() {
            assert_eq!(curve.tag(i), SegmentTag::Corner);
            // A corner's middle control point is its vertex.
            let c = curve.control_points(i);
            assert_eq!(c[1], curve.vertex(i));
        }
    }

    #[test]
    fn high_alpha_max_smooths_everything() {
        let mut curve = square_curve();
        smooth(&mut curve, 1.34);
        for i in 0..curve.len() {
            assert_eq!(curve.tag(i), SegmentTag::Curve);
        }
    }

    #[test]
    fn corner_control_point_is_midpoint_of_vertices() {
        let mut curve = square_curve();
        smooth(&mut curve, 1.0);
        for j in 0..curve.len() {
            let k = (j + 1) % curve.len();
            let c = curve.control_points(j);
            let expected = interval(0.5, curve.vertex(k), curve.vertex(j));
            assert!((c[2].x - expected.x).abs() < 1e-12);
            assert!((c[2].y - expected.y).abs() < 1e-12);
        }
    }

    #[test]
    fn reverse_flips_vertex_order() {
        let mut curve = square_curve();
        let before: Vec<Point> = (0..curve.len()).map(|i| curve.vertex(i)).collect();
        curve.reverse();
        let after: Vec<Point> = (0..curve.len()).map(|i| curve.vertex(i)).collect();
        let mut expected = before;
        expected.reverse();
        assert_eq!(after, expected);
    }

    #[test]
    fn optimization_leaves_all_corner_curves_alone() {
        let mut curve = square_curve();
        smooth(&mut curve, 1.0);
        let optimized = opti_curve(&curve, 0.2);
        // Corners can never be joined, so the segment count and the
        // endpoint chain survive unchanged.
        assert_eq!(optimized.len(), curve.len());
        for i in 0..curve.len() {
            assert_eq!(optimized.tag(i), curve.tag(i));
            assert_eq!(optimized.control_points(i)[2], curve.control_points(i)[2]);
        }
    }

    #[test]
    fn optimization_never_increases_segment_count() {
        // A coarse disc produces smooth runs that the optimizer can
        // join.
        let mut bitmap = Bitmap::from_fn(64, 64, |x, y| {
            let dx = f64::from(x) - 31.5;
            let dy = f64::from(y) - 31.5;
            dx * dx + dy * dy <= 24.0 * 24.0
        })
        .unwrap();
        let mut contours = trace_contours(&mut bitmap, TurnPolicy::default(), 2).unwrap();
        let contour = contours.remove(0);
        let sums = calc_sums(&contour);
        let po = best_polygon(&contour, &sums);
        let mut curve = adjust_vertices(&contour, &sums, &po);
        smooth(&mut curve, 1.0);
        let optimized = opti_curve(&curve, 0.2);
        assert!(optimized.len() <= curve.len());
        assert!(!optimized.is_empty());
    }

    #[test]
    fn segment_tag_serde_round_trip() {
        let json = serde_json::to_string(&SegmentTag::Corner).unwrap();
        assert_eq!(json, "\"corner\"");
        let back: SegmentTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SegmentTag::Corner);
    }
}
