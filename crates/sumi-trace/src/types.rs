//! Shared types for the sumi tracing engine.

use serde::{Deserialize, Serialize};

use crate::trace::TurnPolicy;

/// A 2D point with fractional coordinates.
///
/// Used for curve control points and adjusted vertices; pixel-lattice
/// positions use [`PixelPoint`] instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<PixelPoint> for Point {
    fn from(p: PixelPoint) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

/// A 2D point on the pixel lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal position (pixels from left edge).
    pub x: i32,
    /// Vertical position (pixels from top edge).
    pub y: i32,
}

impl PixelPoint {
    /// Create a new lattice point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Winding sign of a traced contour.
///
/// `Plus` marks an outer boundary enclosing set pixels; `Minus` marks a
/// hole. Downstream consumers use this to pick a fill rule when
/// compositing nested contours into one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// Outer boundary.
    Plus,
    /// Hole.
    Minus,
}

/// Bitmap dimensions in pixels.
///
/// Carried alongside trace output so export serializers can set
/// coordinate spaces (e.g., SVG `viewBox`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for a trace invocation.
///
/// The defaults suit scanned line art and logos; see the individual
/// fields for what each knob trades off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// How to resolve ambiguous (checkerboard) pixel configurations
    /// during the boundary walk.
    pub turn_policy: TurnPolicy,

    /// Minimum signed contour area to keep. Contours at or below this
    /// area are traced (and erased) but excluded from the output, which
    /// despeckles the result.
    pub turd_size: i64,

    /// Corner threshold. Segments whose smoothness parameter reaches
    /// this value become sharp corners; higher values produce fewer
    /// corners and smoother output.
    pub alpha_max: f64,

    /// Whether to run the curve-joining optimization pass, which merges
    /// runs of compatible Bezier segments into single longer curves.
    pub optimize_curve: bool,

    /// Maximum perpendicular deviation allowed when joining curve
    /// segments during optimization.
    pub opt_tolerance: f64,
}

impl TraceConfig {
    /// Default despeckle threshold.
    pub const DEFAULT_TURD_SIZE: i64 = 2;
    /// Default corner threshold.
    pub const DEFAULT_ALPHA_MAX: f64 = 1.0;
    /// Default curve optimization tolerance.
    pub const DEFAULT_OPT_TOLERANCE: f64 = 0.2;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            turn_policy: TurnPolicy::default(),
            turd_size: Self::DEFAULT_TURD_SIZE,
            alpha_max: Self::DEFAULT_ALPHA_MAX,
            optimize_curve: true,
            opt_tolerance: Self::DEFAULT_OPT_TOLERANCE,
        }
    }
}

/// Errors that can occur while tracing a bitmap.
///
/// The domain is a finite integer grid, so the taxonomy is narrow:
/// construction-time rejections plus one defensive internal guard.
/// Empty and all-white bitmaps are normal inputs producing empty output,
/// not errors.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The bitmap was constructed with a zero dimension.
    #[error("bitmap dimensions must be nonzero, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The pixel buffer length does not match `width * height`.
    #[error("pixel buffer holds {actual} bytes but {width}x{height} needs {expected}")]
    BufferSizeMismatch {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// A boundary walk failed to close within the defensive step bound.
    ///
    /// This converts any turn-policy bug from a hang into a detectable
    /// error; it cannot occur for well-formed walks, which strictly
    /// shrink the remaining set-pixel count.
    #[error("contour walk exceeded {max_steps} steps without closing")]
    RunawayContour {
        /// The step bound that was exceeded.
        max_steps: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = TraceConfig::default();
        assert_eq!(config.turn_policy, TurnPolicy::Minority);
        assert_eq!(config.turd_size, 2);
        assert!((config.alpha_max - 1.0).abs() < f64::EPSILON);
        assert!(config.optimize_curve);
        assert!((config.opt_tolerance - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn config_serde_round_trip() {
        let config = TraceConfig {
            turn_policy: TurnPolicy::Majority,
            turd_size: 5,
            alpha_max: 0.8,
            optimize_curve: false,
            opt_tolerance: 0.4,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: TraceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn error_display() {
        let err = TraceError::InvalidDimensions {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "bitmap dimensions must be nonzero, got 0x4");

        let err = TraceError::BufferSizeMismatch {
            width: 3,
            height: 3,
            expected: 9,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer holds 8 bytes but 3x3 needs 9"
        );
    }

    #[test]
    fn pixel_point_to_point() {
        let p: Point = PixelPoint::new(3, -2).into();
        assert_eq!(p, Point::new(3.0, -2.0));
    }
}
