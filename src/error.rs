use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The scale factor is not a finite positive number
    #[error("scale factor must be finite and greater than zero, got {0}")]
    InvalidScaleFactor(f32),
    /// The slice provided to the function is too small
    #[error("buffer is too small: got {len} bytes, expected at least {expected}")]
    BufferTooSmall { len: usize, expected: usize },
    /// The pixel count does not match the image dimensions
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },
}
