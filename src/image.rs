use rgb::RGB8;

use crate::error::Error;

/// Owned RGB image: dimensions plus row-major pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl Image {
    /// Creates an [`Image`] from row-major RGB pixels.
    ///
    /// Returns [`Error::DimensionMismatch`] if `pixels.len()` differs from
    /// `width * height`
    pub fn new(pixels: Vec<RGB8>, width: usize, height: usize) -> Result<Self, Error> {
        let mismatch = Error::DimensionMismatch {
            len: pixels.len(),
            width,
            height,
        };

        match width.checked_mul(height) {
            Some(count) if count == pixels.len() => Ok(Self {
                width,
                height,
                pixels,
            }),
            _ => Err(mismatch),
        }
    }

    /// Creates an [`Image`] from a slice of packed RGBA bytes. Alpha is
    /// discarded.
    ///
    /// Returns [`Error::BufferTooSmall`] if the provided slice length is less
    /// than `width * height * 4`
    pub fn from_rgba(data: &[u8], width: usize, height: usize) -> Result<Self, Error> {
        Self::from_packed(data, width, height, 4)
    }

    /// Creates an [`Image`] from a slice of packed RGB bytes.
    ///
    /// Returns [`Error::BufferTooSmall`] if the provided slice length is less
    /// than `width * height * 3`
    pub fn from_rgb(data: &[u8], width: usize, height: usize) -> Result<Self, Error> {
        Self::from_packed(data, width, height, 3)
    }

    fn from_packed(data: &[u8], width: usize, height: usize, stride: usize) -> Result<Self, Error> {
        let expected = width
            .checked_mul(height)
            .and_then(|count| count.checked_mul(stride))
            .unwrap_or(usize::MAX);

        if data.len() < expected {
            return Err(Error::BufferTooSmall {
                len: data.len(),
                expected,
            });
        }

        let pixels = data[..expected]
            .chunks_exact(stride)
            .map(|pix| RGB8::new(pix[0], pix[1], pix[2]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_parts(pixels: Vec<RGB8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height);

        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> RGB8 {
        assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    pub fn into_pixels(self) -> Vec<RGB8> {
        self.pixels
    }

    /// Packed RGBA bytes, every pixel fully opaque
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);

        for p in self.pixels.iter() {
            out.extend_from_slice(&[p.r, p.g, p.b, 255]);
        }

        out
    }

    /// Packed RGB bytes
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);

        for p in self.pixels.iter() {
            out.extend_from_slice(&[p.r, p.g, p.b]);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_dimensions() {
        let pixels = vec![RGB8::new(1, 2, 3); 6];
        assert!(Image::new(pixels.clone(), 3, 2).is_ok());

        let err = Image::new(pixels, 4, 2).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                len: 6,
                width: 4,
                height: 2
            }
        );
    }

    #[test]
    fn from_rgba_drops_alpha() {
        let data = [10, 20, 30, 0, 40, 50, 60, 128];
        let img = Image::from_rgba(&data, 2, 1).unwrap();

        assert_eq!(img.pixels(), &[RGB8::new(10, 20, 30), RGB8::new(40, 50, 60)]);
        assert_eq!(img.to_rgba(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn from_rgba_rejects_short_buffer() {
        let err = Image::from_rgba(&[0; 7], 2, 1).unwrap_err();
        assert_eq!(err, Error::BufferTooSmall { len: 7, expected: 8 });
    }

    #[test]
    fn from_rgb_ignores_trailing_bytes() {
        let data = [1, 2, 3, 4, 5, 6, 7];
        let img = Image::from_rgb(&data, 1, 2).unwrap();

        assert_eq!(img.pixel(0, 1), RGB8::new(4, 5, 6));
        assert_eq!(img.to_rgb(), vec![1, 2, 3, 4, 5, 6]);
    }
}
