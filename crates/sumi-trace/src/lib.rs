//! sumi-trace: Pure raster-to-vector tracing engine (sans-IO).
//!
//! Converts binary bitmaps into smooth closed Bezier curves through:
//! boundary tracing -> despeckle -> polygon reduction -> vertex
//! adjustment -> corner smoothing -> optional curve optimization.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! bitmaps and returns structured curves. Image decoding and SVG
//! assembly live in the `sumi` binary and `sumi-export`.

pub mod bitmap;
mod curve;
mod geometry;
mod polygon;
pub mod render;
pub mod trace;
pub mod types;

pub use bitmap::Bitmap;
pub use curve::{Curve, SegmentTag};
pub use render::render_curve;
pub use trace::TurnPolicy;
pub use types::{Dimensions, PixelPoint, Point, Sign, TraceConfig, TraceError};

use serde::{Deserialize, Serialize};

/// One traced region: a closed curve plus the fill sign of the
/// contour it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPath {
    sign: Sign,
    curve: Curve,
}

impl VectorPath {
    /// Fill sign: `Plus` for outer boundaries, `Minus` for holes.
    #[must_use]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// The traced curve.
    #[must_use]
    pub const fn curve(&self) -> &Curve {
        &self.curve
    }
}

/// Trace a bitmap into vector paths.
///
/// Consumes the bitmap (tracing erases contours as it finds them) and
/// returns one [`VectorPath`] per surviving contour, outer boundaries
/// before the holes they contain.
///
/// # Pipeline steps
///
/// 1. Boundary tracing with the configured turn policy
/// 2. Despeckle (drop contours at or below `turd_size`)
/// 3. Polygon reduction to the fewest straight segments
/// 4. Vertex adjustment by least-squares line intersection
/// 5. Corner detection and smoothing against `alpha_max`
/// 6. Curve optimization within `opt_tolerance` (unless disabled)
///
/// # Errors
///
/// Returns [`TraceError::RunawayContour`] if a contour walk fails to
/// close, which indicates inconsistent bitmap state.
pub fn trace(mut bitmap: Bitmap, config: &TraceConfig) -> Result<Vec<VectorPath>, TraceError> {
    let contours = trace::trace_contours(&mut bitmap, config.turn_policy, config.turd_size)?;

    let mut paths = Vec::with_capacity(contours.len());
    for contour in &contours {
        let sums = polygon::calc_sums(contour);
        let poly = polygon::best_polygon(contour, &sums);
        let mut curve = curve::adjust_vertices(contour, &sums, &poly);

        if contour.sign() == Sign::Minus {
            curve.reverse();
        }

        curve::smooth(&mut curve, config.alpha_max);

        let curve = if config.optimize_curve {
            curve::opti_curve(&curve, config.opt_tolerance)
        } else {
            curve
        };

        paths.push(VectorPath {
            sign: contour.sign(),
            curve,
        });
    }

    Ok(paths)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_bitmap() -> Bitmap {
        Bitmap::from_fn(20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y)).unwrap()
    }

    #[test]
    fn square_traces_to_single_path() {
        let paths = trace(square_bitmap(), &TraceConfig::default()).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].sign(), Sign::Plus);
        assert_eq!(paths[0].curve().len(), 4);
    }

    #[test]
    fn hole_produces_outer_then_inner_path() {
        let bitmap = Bitmap::from_fn(20, 20, |x, y| {
            let outer = (4..16).contains(&x) && (4..16).contains(&y);
            let inner = (8..12).contains(&x) && (8..12).contains(&y);
            outer && !inner
        })
        .unwrap();
        let paths = trace(bitmap, &TraceConfig::default()).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].sign(), Sign::Plus);
        assert_eq!(paths[1].sign(), Sign::Minus);
    }

    #[test]
    fn blank_bitmap_yields_no_paths() {
        let bitmap = Bitmap::from_fn(16, 16, |_, _| false).unwrap();
        let paths = trace(bitmap, &TraceConfig::default()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn speckles_are_dropped() {
        let bitmap = Bitmap::from_fn(16, 16, |x, y| x == 3 && y == 3).unwrap();
        let paths = trace(bitmap, &TraceConfig::default()).unwrap();
        assert!(paths.is_empty());

        let keep_everything = TraceConfig {
            turd_size: 0,
            ..TraceConfig::default()
        };
        let bitmap = Bitmap::from_fn(16, 16, |x, y| x == 3 && y == 3).unwrap();
        let paths = trace(bitmap, &keep_everything).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn tracing_is_deterministic() {
        let config = TraceConfig::default();
        let a = trace(square_bitmap(), &config).unwrap();
        let b = trace(square_bitmap(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn disabling_optimization_keeps_smoothed_curve() {
        let bitmap = Bitmap::from_fn(64, 64, |x, y| {
            let dx = f64::from(x) - 31.5;
            let dy = f64::from(y) - 31.5;
            dx * dx + dy * dy <= 24.0 * 24.0
        })
        .unwrap();
        let unoptimized = TraceConfig {
            optimize_curve: false,
            ..TraceConfig::default()
        };
        let raw = trace(bitmap.clone(), &unoptimized).unwrap();
        let optimized = trace(bitmap, &TraceConfig::default()).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(optimized.len(), 1);
        assert!(optimized[0].curve().len() <= raw[0].curve().len());
    }

    #[test]
    fn vector_path_serde_round_trip() {
        let paths = trace(square_bitmap(), &TraceConfig::default()).unwrap();
        let json = serde_json::to_string(&paths).unwrap();
        let back: Vec<VectorPath> = serde_json::from_str(&json).unwrap();
        assert_eq!(paths, back);
    }
}
