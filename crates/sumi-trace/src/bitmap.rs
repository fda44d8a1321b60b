//! Binary raster bitmap with bounds-forgiving pixel queries.
//!
//! The bitmap is a pure data structure: one byte per pixel, row-major,
//! where any nonzero byte counts as a set (black) pixel. All coordinate
//! queries outside the raster read as white rather than erroring, which
//! lets the boundary walk probe diagonal neighbors without edge cases.
//!
//! Mutation (`toggle`) is crate-private: only the tracer's XOR erase may
//! alter pixel data, and it owns the bitmap exclusively while doing so.

use crate::types::{Dimensions, PixelPoint, TraceError};

/// A fixed-size 0/1 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Build a bitmap from a row-major pixel buffer.
    ///
    /// Any nonzero byte is normalized to 1.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidDimensions`] if either dimension is
    /// zero, or [`TraceError::BufferSizeMismatch`] if `data.len()` is
    /// not `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TraceError> {
        if width == 0 || height == 0 {
            return Err(TraceError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TraceError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap by evaluating `f` at every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidDimensions`] if either dimension is
    /// zero.
    pub fn from_fn(
        width: u32,
        height: u32,
        f: impl Fn(u32, u32) -> bool,
    ) -> Result<Self, TraceError> {
        if width == 0 || height == 0 {
            return Err(TraceError::InvalidDimensions { width, height });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(u8::from(f(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width and height as a [`Dimensions`] value.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel value at `(x, y)`; out-of-range coordinates read as white.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some_and(|i| self.data[i] != 0)
    }

    /// Linear index of `(x, y)`, or `None` when out of range.
    #[must_use]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Coordinates of a linear index, or `None` when out of range.
    #[must_use]
    pub fn point_of(&self, index: usize) -> Option<PixelPoint> {
        if index >= self.size() {
            return None;
        }
        let y = index / self.width as usize;
        let x = index - y * self.width as usize;
        Some(PixelPoint::new(x as i32, y as i32))
    }

    /// Copy the bitmap, applying an optional per-pixel mapping.
    #[must_use]
    pub fn map(&self, f: impl Fn(bool) -> bool) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| u8::from(f(v != 0))).collect(),
        }
    }

    /// Linear index of the first set pixel at or after `start`, if any.
    pub(crate) fn first_set_from(&self, start: usize) -> Option<usize> {
        self.data
            .get(start..)?
            .iter()
            .position(|&v| v != 0)
            .map(|offset| start + offset)
    }

    /// Flip the pixel at `(x, y)`. Out-of-range coordinates are ignored.
    pub(crate) fn toggle(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index_of(x, y) {
            self.data[i] ^= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_zero_dimensions() {
        assert!(matches!(
            Bitmap::from_raw(0, 5, vec![]),
            Err(TraceError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(matches!(
            Bitmap::from_raw(5, 0, vec![]),
            Err(TraceError::InvalidDimensions { width: 5, height: 0 })
        ));
    }

    #[test]
    fn from_raw_rejects_length_mismatch() {
        assert!(matches!(
            Bitmap::from_raw(3, 3, vec![0; 8]),
            Err(TraceError::BufferSizeMismatch {
                expected: 9,
                actual: 8,
                ..
            })
        ));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn from_raw_normalizes_nonzero() {
        let bitmap = Bitmap::from_raw(2, 1, vec![0, 255]).unwrap();
        assert!(!bitmap.get(0, 0));
        assert!(bitmap.get(1, 0));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn out_of_range_reads_white() {
        let bitmap = Bitmap::from_fn(4, 4, |_, _| true).unwrap();
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(-1, 0));
        assert!(!bitmap.get(0, -1));
        assert!(!bitmap.get(4, 0));
        assert!(!bitmap.get(0, 4));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn index_point_round_trip() {
        let bitmap = Bitmap::from_fn(5, 3, |_, _| false).unwrap();
        for index in 0..bitmap.size() {
            let p = bitmap.point_of(index).unwrap();
            assert_eq!(bitmap.index_of(p.x, p.y), Some(index));
        }
        assert_eq!(bitmap.point_of(15), None);
        assert_eq!(bitmap.index_of(5, 0), None);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn first_set_from_scans_forward() {
        let bitmap = Bitmap::from_fn(4, 2, |x, y| x == 2 && y == 1).unwrap();
        assert_eq!(bitmap.first_set_from(0), Some(6));
        assert_eq!(bitmap.first_set_from(6), Some(6));
        assert_eq!(bitmap.first_set_from(7), None);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn toggle_flips_and_ignores_out_of_range() {
        let mut bitmap = Bitmap::from_fn(2, 2, |_, _| false).unwrap();
        bitmap.toggle(1, 1);
        assert!(bitmap.get(1, 1));
        bitmap.toggle(1, 1);
        assert!(!bitmap.get(1, 1));
        bitmap.toggle(5, 5); // no-op
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn map_applies_transform() {
        let bitmap = Bitmap::from_fn(2, 2, |x, _| x == 0).unwrap();
        let inverted = bitmap.map(|v| !v);
        assert!(!inverted.get(0, 0));
        assert!(inverted.get(1, 0));
    }
}
