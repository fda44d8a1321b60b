//! Geometric primitives shared by the polygon reducer and curve optimizer.
//!
//! Everything here operates on plain values and has no failure modes;
//! degenerate configurations are signalled through return values
//! (`tangent` returns `None`) rather than errors.

use crate::types::Point;

/// Positive modulo over a cyclic index range of length `n`.
///
/// Unlike `%`, the result is always in `0..n`, including for negative
/// operands.
pub(crate) fn mod_n(a: isize, n: usize) -> usize {
    let n_i = n as isize;
    let r = a.rem_euclid(n_i);
    r as usize
}

/// Returns `true` when `b` lies in the cyclic interval from `a`
/// (inclusive) to `c` (exclusive).
pub(crate) const fn cyclic(a: usize, b: usize, c: usize) -> bool {
    if a <= c {
        a <= b && b < c
    } else {
        a <= b || b < c
    }
}

/// Sign of an integer: -1, 0, or 1.
pub(crate) const fn sign_i(v: i64) -> i64 {
    if v > 0 {
        1
    } else if v < 0 {
        -1
    } else {
        0
    }
}

/// Sign of a float: -1, 0, or 1.
pub(crate) fn sign_f(v: f64) -> i64 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Integer cross product of two lattice vectors.
pub(crate) const fn xprod(p1: (i64, i64), p2: (i64, i64)) -> i64 {
    p1.0 * p2.1 - p1.1 * p2.0
}

/// Linear interpolation between `a` and `b` at parameter `lambda`.
pub(crate) fn interval(lambda: f64, a: Point, b: Point) -> Point {
    Point::new(a.x + lambda * (b.x - a.x), a.y + lambda * (b.y - a.y))
}

/// Direction of the perpendicular at infinity between two endpoints.
pub(crate) fn dorth_infty(p0: Point, p2: Point) -> Point {
    Point::new(
        -(sign_f(p2.y - p0.y) as f64),
        sign_f(p2.x - p0.x) as f64,
    )
}

/// Denominator used when deciding tangent-line intersections between
/// two endpoints; zero means the endpoints coincide on the lattice.
pub(crate) fn ddenom(p0: Point, p2: Point) -> f64 {
    let r = dorth_infty(p0, p2);
    r.y * (p2.x - p0.x) - r.x * (p2.y - p0.y)
}

/// Twice the signed area of the triangle `(p0, p1, p2)`.
pub(crate) fn dpara(p0: Point, p1: Point, p2: Point) -> f64 {
    let x1 = p1.x - p0.x;
    let y1 = p1.y - p0.y;
    let x2 = p2.x - p0.x;
    let y2 = p2.y - p0.y;
    x1 * y2 - x2 * y1
}

/// Cross product of the segment vectors `p1 - p0` and `p3 - p2`.
pub(crate) fn cprod(p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let x1 = p1.x - p0.x;
    let y1 = p1.y - p0.y;
    let x2 = p3.x - p2.x;
    let y2 = p3.y - p2.y;
    x1 * y2 - x2 * y1
}

/// Dot product of `p1 - p0` and `p2 - p0`.
pub(crate) fn iprod(p0: Point, p1: Point, p2: Point) -> f64 {
    let x1 = p1.x - p0.x;
    let y1 = p1.y - p0.y;
    let x2 = p2.x - p0.x;
    let y2 = p2.y - p0.y;
    x1 * x2 + y1 * y2
}

/// Dot product of the segment vectors `p1 - p0` and `p3 - p2`.
pub(crate) fn iprod1(p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let x1 = p1.x - p0.x;
    let y1 = p1.y - p0.y;
    let x2 = p3.x - p2.x;
    let y2 = p3.y - p2.y;
    x1 * x2 + y1 * y2
}

/// Euclidean distance between two points.
pub(crate) fn ddist(p: Point, q: Point) -> f64 {
    ((p.x - q.x) * (p.x - q.x) + (p.y - q.y) * (p.y - q.y)).sqrt()
}

/// Point on the cubic Bezier `(p0, p1, p2, p3)` at parameter `t`,
/// using the standard Bernstein weighting.
pub(crate) fn bezier(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    let s = 1.0 - t;
    // s^3 and t^3 spelled out; powi is not faster and reads worse here.
    Point::new(
        s * s * s * p0.x + 3.0 * (s * s * t) * p1.x + 3.0 * (t * t * s) * p2.x + t * t * t * p3.x,
        s * s * s * p0.y + 3.0 * (s * s * t) * p1.y + 3.0 * (t * t * s) * p2.y + t * t * t * p3.y,
    )
}

/// Parameter `t in [0, 1]` at which the cubic Bezier `(p0, p1, p2, p3)`
/// is tangent to the line through `q0` and `q1`.
///
/// Returns `None` when the quadratic has no valid root (degenerate or
/// parallel configuration); the curve optimizer falls back to a corner
/// in that case.
pub(crate) fn tangent(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    q0: Point,
    q1: Point,
) -> Option<f64> {
    let big_a = cprod(p0, p1, q0, q1);
    let big_b = cprod(p1, p2, q0, q1);
    let big_c = cprod(p2, p3, q0, q1);

    let a = big_a - 2.0 * big_b + big_c;
    let b = -2.0 * big_a + 2.0 * big_b;
    let c = big_a;

    let d = b * b - 4.0 * a * c;
    if a == 0.0 || d < 0.0 {
        return None;
    }

    let s = d.sqrt();
    let r1 = (-b + s) / (2.0 * a);
    let r2 = (-b - s) / (2.0 * a);

    if (0.0..=1.0).contains(&r1) {
        Some(r1)
    } else if (0.0..=1.0).contains(&r2) {
        Some(r2)
    } else {
        None
    }
}

/// A 3x3 quadratic form accumulating the least-squares penalty of a
/// candidate vertex position. Evaluated with [`Quad::apply`] on the
/// homogeneous vector `[x, y, 1]`.
#[derive(Debug, Clone)]
pub(crate) struct Quad {
    data: [f64; 9],
}

impl Quad {
    /// The zero form.
    pub(crate) const fn zero() -> Self {
        Self { data: [0.0; 9] }
    }

    /// Element at row `i`, column `j`.
    pub(crate) const fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * 3 + j]
    }

    /// Set element at row `i`, column `j`.
    pub(crate) const fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * 3 + j] = value;
    }

    /// Add `value` to the element at row `i`, column `j`.
    pub(crate) const fn add(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * 3 + j] += value;
    }

    /// Evaluate the form `v^T Q v` with `v = [w.x, w.y, 1]`.
    pub(crate) fn apply(&self, w: Point) -> f64 {
        let v = [w.x, w.y, 1.0];
        let mut sum = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                sum += v[i] * self.at(i, j) * v[j];
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_n_handles_negatives() {
        assert_eq!(mod_n(-1, 5), 4);
        assert_eq!(mod_n(0, 5), 0);
        assert_eq!(mod_n(5, 5), 0);
        assert_eq!(mod_n(7, 5), 2);
        assert_eq!(mod_n(-6, 5), 4);
    }

    #[test]
    fn cyclic_wrapping() {
        assert!(cyclic(1, 2, 4));
        assert!(!cyclic(1, 4, 4));
        // Wrapped interval 4..2 contains 0 and 4 but not 3.
        assert!(cyclic(4, 0, 2));
        assert!(cyclic(4, 4, 2));
        assert!(!cyclic(4, 3, 2));
    }

    #[test]
    fn dpara_is_twice_triangle_area() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(0.0, 2.0);
        assert!((dpara(a, b, c) - 4.0).abs() < f64::EPSILON);
        assert!((dpara(a, c, b) + 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bezier_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 2.0);
        let p3 = Point::new(4.0, 0.0);
        assert_eq!(bezier(0.0, p0, p1, p2, p3), p0);
        assert_eq!(bezier(1.0, p0, p1, p2, p3), p3);
    }

    #[test]
    fn tangent_finds_horizontal_tangent() {
        // Symmetric arch: horizontal tangent at t = 0.5.
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 2.0);
        let p3 = Point::new(4.0, 0.0);
        let q0 = Point::new(0.0, 1.0);
        let q1 = Point::new(1.0, 1.0);
        let t = tangent(p0, p1, p2, p3, q0, q1);
        assert!(t.is_some());
        if let Some(t) = t {
            assert!((t - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn tangent_degenerate_returns_none() {
        // All control points collinear with the query line: A = B = C = 0,
        // so the quadratic degenerates.
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1.0, 0.0);
        assert!(tangent(p, q, p, q, p, q).is_none());
    }

    #[test]
    fn quadform_identity() {
        let mut q = Quad::zero();
        q.set(0, 0, 1.0);
        q.set(1, 1, 1.0);
        q.set(2, 2, 1.0);
        // v^T I v = x^2 + y^2 + 1
        assert!((q.apply(Point::new(3.0, 4.0)) - 26.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dorth_infty_is_perpendicular_sign_vector() {
        let r = dorth_infty(Point::new(0.0, 0.0), Point::new(5.0, -3.0));
        assert_eq!(r, Point::new(1.0, 1.0));
    }
}
