//! SVG export serializer.
//!
//! Wraps rendered path data into an SVG document using the [`svg`]
//! crate for document construction and XML escaping.
//!
//! All traced contours share a single `<path>` element with
//! `fill-rule="evenodd"`, so holes cut out of their surrounding
//! regions without any nesting bookkeeping.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Description, Path, Rectangle, Title};
use svg::node::{Text, Value};

use sumi_trace::{Dimensions, VectorPath, render_curve};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
/// These are standard SVG accessibility elements and are surfaced by
/// some file managers and screen readers.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`.
    ///
    /// Typically the source image filename (without extension).
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`.
    ///
    /// Typically the tracing parameters, so exported files are
    /// distinguishable.
    pub description: Option<&'a str>,
}

/// Rendering options for [`to_svg`].
#[derive(Debug, Clone)]
pub struct SvgOptions<'a> {
    /// Uniform scale applied to every coordinate and to the document
    /// size. The `viewBox` always matches the scaled pixel grid.
    pub scale: f64,

    /// Fill color of the traced shape.
    pub fill: &'a str,

    /// Optional background color, emitted as a full-size `<rect>`
    /// behind the traced path.
    pub background: Option<&'a str>,
}

impl Default for SvgOptions<'_> {
    fn default() -> Self {
        Self {
            scale: 1.0,
            fill: "black",
            background: None,
        }
    }
}

/// Per-contour path data strings at the given scale.
///
/// Useful when the caller assembles its own document or styles each
/// contour separately; [`to_svg`] instead joins them into one
/// even-odd filled path.
#[must_use]
pub fn path_data(paths: &[VectorPath], scale: f64) -> Vec<String> {
    paths
        .iter()
        .map(|path| render_curve(path.curve(), scale))
        .collect()
}

/// Serialize traced paths into an SVG document string.
///
/// The `viewBox` spans the source bitmap dimensions multiplied by
/// `options.scale`, so path coordinates rendered at that scale line up
/// one-to-one. All contours are concatenated into a single `<path>`
/// with `fill-rule="evenodd"`; an empty `paths` slice produces a valid
/// document with no path element.
#[must_use]
pub fn to_svg(
    paths: &[VectorPath],
    dimensions: Dimensions,
    options: &SvgOptions<'_>,
    metadata: &SvgMetadata<'_>,
) -> String {
    let width = f64::from(dimensions.width) * options.scale;
    let height = f64::from(dimensions.height) * options.scale;

    let mut doc = Document::new()
        .set("width", Value::from(width))
        .set("height", Value::from(height))
        .set("viewBox", (0.0, 0.0, width, height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(background) = options.background {
        let rect = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", background);
        doc = doc.add(rect);
    }

    let d: String = path_data(paths, options.scale).concat();
    if !d.is_empty() {
        let path = Path::new()
            .set("d", d.trim_end())
            .set("fill", options.fill)
            .set("fill-rule", "evenodd");
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
