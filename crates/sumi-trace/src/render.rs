//! Render a [`Curve`] as SVG path data.

use std::fmt::Write;

use crate::curve::{Curve, SegmentTag};

/// Format a coordinate to three decimals, dropping an all-zero
/// fraction.
fn fixed(v: f64) -> String {
    let s = format!("{v:.3}");
    match s.strip_suffix(".000") {
        Some(trimmed) => trimmed.to_owned(),
        None => s,
    }
}

/// Render a closed curve as an SVG path data string, scaling every
/// coordinate by `scale`.
///
/// The path opens at the final segment's endpoint, so the segment loop
/// closes it implicitly. Smooth segments emit a `C` command with all
/// three control points; corners emit an `L` command with two line
/// targets. Returns an empty string for an empty curve.
#[must_use]
pub fn render_curve(curve: &Curve, scale: f64) -> String {
    if curve.is_empty() {
        return String::new();
    }

    let start = curve.control_points(curve.len() - 1)[2];
    let mut path = format!("M {} {} ", fixed(start.x * scale), fixed(start.y * scale));

    for i in 0..curve.len() {
        let [c0, c1, c2] = curve.control_points(i);
        match curve.tag(i) {
            SegmentTag::Curve => {
                let _ = write!(
                    path,
                    "C {} {}, {} {}, {} {} ",
                    fixed(c0.x * scale),
                    fixed(c0.y * scale),
                    fixed(c1.x * scale),
                    fixed(c1.y * scale),
                    fixed(c2.x * scale),
                    fixed(c2.y * scale),
                );
            }
            SegmentTag::Corner => {
                let _ = write!(
                    path,
                    "L {} {} {} {} ",
                    fixed(c1.x * scale),
                    fixed(c1.y * scale),
                    fixed(c2.x * scale),
                    fixed(c2.y * scale),
                );
            }
        }
    }

    path
}
