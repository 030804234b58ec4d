use std::io;

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// A header byte that must be zero (ID length, color map type, color map
  /// specification or image origin) held a nonzero value.
  #[error("reserved header byte at offset {offset} must be zero, found {value}")]
  ReservedField { offset: usize, value: u8 },
  /// The image width or height is zero.
  #[error("invalid image width or height")]
  InvalidDimensions,
  /// The header's pixel size isn't 1, 3 or 4 bytes per pixel.
  #[error("unsupported pixel depth of {0} bytes per pixel, expected 1, 3 or 4")]
  UnsupportedPixelDepth(u8),
  /// The header's image type doesn't describe an uncompressed or run-length
  /// encoded image of the header's pixel depth.
  #[error("unsupported image type {image_type} for {bytes_per_pixel} bytes per pixel")]
  UnsupportedImageType { image_type: u8, bytes_per_pixel: u8 },
  /// A run-length encoded chunk declared more pixels than the image has left.
  #[error("chunk of {length} pixels overruns the image, {remaining} pixels remaining")]
  ChunkOverrun { length: usize, remaining: usize },
  /// Unexpectedly reached the end of an image source before decoding was
  /// completed.
  #[error("unexpectedly reached end of file before decoding was completed")]
  UnexpectedEof,
  /// Any other `std::io::Error` raised while reading an image source or
  /// writing to an image destination.
  #[error(transparent)]
  Io(io::Error),
}

impl From<io::Error> for Error {
  fn from(io_err: io::Error) -> Self {
    match io_err.kind() {
      io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
      _ => Error::Io(io_err),
    }
  }
}

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (
        Error::ReservedField { offset: a, value: b },
        Error::ReservedField { offset: c, value: d },
      ) => a == c && b == d,
      (Error::InvalidDimensions, Error::InvalidDimensions) => true,
      (Error::UnsupportedPixelDepth(a), Error::UnsupportedPixelDepth(b)) => a == b,
      (
        Error::UnsupportedImageType { image_type: a, bytes_per_pixel: b },
        Error::UnsupportedImageType { image_type: c, bytes_per_pixel: d },
      ) => a == c && b == d,
      (
        Error::ChunkOverrun { length: a, remaining: b },
        Error::ChunkOverrun { length: c, remaining: d },
      ) => a == c && b == d,
      (Error::UnexpectedEof, Error::UnexpectedEof) => true,
      (Error::Io(a), Error::Io(b)) => a.kind() == b.kind(),
      _ => false,
    }
  }
}
