//! sumi-export: Pure SVG serializer (sans-IO)
//!
//! Converts traced vector paths into an SVG document string.

pub mod svg;

pub use svg::{SvgMetadata, SvgOptions, path_data, to_svg};
