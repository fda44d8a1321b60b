//! Boundary tracing: walk a bitmap's black/white edges into closed contours.
//!
//! Contours are discovered in scan order: the next set pixel seeds an
//! edge walk that follows the boundary until it returns to the seed,
//! then the enclosed region is XOR-erased so nested and overlapping
//! shapes are found exactly once. Ambiguous checkerboard crossings are
//! resolved by a [`TurnPolicy`], a closed set of strategies dispatched
//! via `match`.

use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::types::{PixelPoint, Sign, TraceError};

/// How to resolve an ambiguous (diagonal checkerboard) pixel
/// configuration during the boundary walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    /// Always keep black pixels on the turn side.
    Black,
    /// Always keep white pixels on the turn side.
    White,
    /// Always turn left.
    Left,
    /// Always turn right.
    Right,
    /// Turn toward the color occurring least in the local neighborhood.
    #[default]
    Minority,
    /// Turn toward the color occurring most in the local neighborhood.
    Majority,
}

/// A closed boundary contour on the pixel lattice.
///
/// Produced by [`trace_contours`] and consumed by the polygon reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<PixelPoint>,
    sign: Sign,
    area: i64,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Contour {
    /// The lattice points of the closed loop, in walk order.
    #[must_use]
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    /// Number of lattice points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points (never true for traced output).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Winding sign: `Plus` for outer boundaries, `Minus` for holes.
    #[must_use]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// Signed area accumulated during the walk (always positive by
    /// construction of the walk direction).
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.area
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub const fn bounding_box(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Majority pixel value around `(x, y)`, sampled on square rings of
/// radius 2 through 4. The first ring with a nonzero vote decides; if
/// every ring ties, white wins. The radii and the tie-break are
/// load-bearing: changing either changes traced output.
fn majority_at(bitmap: &Bitmap, x: i32, y: i32) -> bool {
    for radius in 2i32..5 {
        let mut vote = 0i32;
        for a in (1 - radius)..radius {
            vote += if bitmap.get(x + a, y + radius - 1) { 1 } else { -1 };
            vote += if bitmap.get(x + radius - 1, y + a - 1) { 1 } else { -1 };
            vote += if bitmap.get(x + a - 1, y - radius) { 1 } else { -1 };
            vote += if bitmap.get(x - radius, y + a) { 1 } else { -1 };
        }
        if vote > 0 {
            return true;
        }
        if vote < 0 {
            return false;
        }
    }
    false
}

/// Whether the walk should turn right at an ambiguous crossing.
fn turns_right(policy: TurnPolicy, sign: Sign, bitmap: &Bitmap, x: i32, y: i32) -> bool {
    match policy {
        TurnPolicy::Right => true,
        TurnPolicy::Left => false,
        TurnPolicy::Black => sign == Sign::Plus,
        TurnPolicy::White => sign == Sign::Minus,
        TurnPolicy::Majority => majority_at(bitmap, x, y),
        TurnPolicy::Minority => !majority_at(bitmap, x, y),
    }
}

/// Walk the boundary starting at `seed` until the loop closes.
///
/// The direction vector starts at `(0, 1)`; at each step the two
/// diagonal neighbors left and right of the travel direction decide
/// whether to turn, with `policy` breaking checkerboard ties. The
/// signed area accumulates `-x * dy` per step (shoelace over vertical
/// moves).
fn walk_contour(
    bitmap: &Bitmap,
    seed: PixelPoint,
    sign: Sign,
    policy: TurnPolicy,
) -> Result<Contour, TraceError> {
    let (mut x, mut y) = (seed.x, seed.y);
    let (mut dx, mut dy) = (0i32, 1i32);

    let mut points = Vec::new();
    let mut area = 0i64;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (seed.x, seed.y, seed.x, seed.y);

    // A closed boundary never exceeds four steps per pixel; anything
    // longer is a turn-policy bug, reported instead of hanging.
    let max_steps = bitmap.size() * 4 + 4;

    loop {
        points.push(PixelPoint::new(x, y));
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        if points.len() > max_steps {
            return Err(TraceError::RunawayContour { max_steps });
        }

        x += dx;
        y += dy;
        area -= i64::from(x) * i64::from(dy);

        if x == seed.x && y == seed.y {
            break;
        }

        // Diagonal neighbors left and right of the travel direction.
        let left = bitmap.get(x + (dx + dy - 1) / 2, y + (dy - dx - 1) / 2);
        let right = bitmap.get(x + (dx - dy - 1) / 2, y + (dy + dx - 1) / 2);

        if right && !left {
            // Ambiguous checkerboard crossing.
            if turns_right(policy, sign, bitmap, x, y) {
                (dx, dy) = (-dy, dx);
            } else {
                (dx, dy) = (dy, -dx);
            }
        } else if right {
            (dx, dy) = (-dy, dx);
        } else if !left {
            (dx, dy) = (dy, -dx);
        }
    }

    Ok(Contour {
        points,
        sign,
        area,
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

/// XOR the contour's enclosed scanline spans out of the bitmap.
///
/// For every vertical move of the walk, flips the row of pixels from
/// the move's x to the contour's right edge. This claims the enclosed
/// region so the seed search never retraces it, and exposes holes as
/// fresh boundaries for the next walk.
fn xor_contour(bitmap: &mut Bitmap, contour: &Contour) {
    let points = contour.points();
    let Some(first) = points.first() else {
        return;
    };
    let mut y1 = first.y;

    for p in &points[1..] {
        if p.y != y1 {
            let row = y1.min(p.y);
            for x in p.x..contour.max_x {
                bitmap.toggle(x, row);
            }
            y1 = p.y;
        }
    }
}

/// Trace every boundary contour of the bitmap's set regions.
///
/// Contours are yielded in discovery order. Contours whose area does
/// not exceed `turd_size` are traced and erased but dropped from the
/// output (despeckle filter). The bitmap is destroyed in the process:
/// every claimed region is XOR-erased, and an all-white bitmap remains
/// when tracing completes.
///
/// # Errors
///
/// Returns [`TraceError::RunawayContour`] if a walk fails to close
/// within the defensive step bound; this indicates an internal bug, not
/// a malformed input.
pub fn trace_contours(
    bitmap: &mut Bitmap,
    policy: TurnPolicy,
    turd_size: i64,
) -> Result<Vec<Contour>, TraceError> {
    // Signs are read from the pristine bitmap: once the XOR erase starts
    // flipping regions, a hole's seed pixel reads as set in the working
    // copy even though it is white in the input.
    let original = bitmap.clone();

    let mut contours = Vec::new();
    let mut from = 0usize;

    while let Some(index) = bitmap.first_set_from(from) {
        from = index;
        let Some(seed) = bitmap.point_of(index) else {
            break;
        };
        let sign = if original.get(seed.x, seed.y) {
            Sign::Plus
        } else {
            Sign::Minus
        };
        let contour = walk_contour(bitmap, seed, sign, policy)?;
        xor_contour(bitmap, &contour);

        if contour.area > turd_size {
            contours.push(contour);
        }
    }

    Ok(contours)
}
