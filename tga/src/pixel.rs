use std::io;

use crate::error::Error;

/// The number of bytes each pixel occupies in a TGA image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelDepth {
  /// Single channel grayscale (or alpha-only) pixels, stored in the blue
  /// channel of a [Color].
  Gray = 1,
  /// Blue, green, red.
  Bgr = 3,
  /// Blue, green, red, alpha.
  Bgra = 4,
}

impl PixelDepth {
  /// Returns the number of bytes per pixel.
  pub fn bytes(self) -> usize {
    self as usize
  }

  /// Returns the number of bits per pixel, as stored in a TGA header.
  pub fn bits(self) -> u8 {
    (self as u8) << 3
  }
}

/// A `TryFrom` implementation for converting a bytes-per-pixel count into a
/// `PixelDepth`. Only `1`, `3` and `4` are supported.
impl TryFrom<u8> for PixelDepth {
  type Error = Error;

  fn try_from(bytes: u8) -> Result<Self, Self::Error> {
    match bytes {
      1 => Ok(PixelDepth::Gray),
      3 => Ok(PixelDepth::Bgr),
      4 => Ok(PixelDepth::Bgra),
      _ => Err(Error::UnsupportedPixelDepth(bytes)),
    }
  }
}

/// A single pixel value. Channels a given [PixelDepth] doesn't store are
/// expected to be zero, they still take part in equality.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Color {
  // Blue channel value, also the gray value of `PixelDepth::Gray` pixels.
  pub b: u8,
  // Green channel value.
  pub g: u8,
  // Red channel value.
  pub r: u8,
  // Alpha channel value.
  pub a: u8,
}

impl Color {
  pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
    Self { b, g, r, a }
  }

  /// A color for `PixelDepth::Bgr` images, alpha is zero.
  pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
    Self { b, g, r, a: 0 }
  }

  /// A gray value for `PixelDepth::Gray` images.
  pub const fn gray(value: u8) -> Self {
    Self { b: value, g: 0, r: 0, a: 0 }
  }

  /// Returns a copy of the color with every channel `depth` doesn't store set
  /// to zero.
  pub fn masked(self, depth: PixelDepth) -> Self {
    match depth {
      PixelDepth::Gray => Self::gray(self.b),
      PixelDepth::Bgr => Self::bgr(self.b, self.g, self.r),
      PixelDepth::Bgra => self,
    }
  }

  // Writes the channels stored by `depth`, in TGA byte order.
  pub(crate) fn write_to<W: io::Write>(&self, depth: PixelDepth, mut writer: W) -> io::Result<()> {
    let bytes = [self.b, self.g, self.r, self.a];
    writer.write_all(&bytes[..depth.bytes()])
  }

  // Reads one color block of `depth` bytes. Channels the depth doesn't store
  // are left at zero.
  pub(crate) fn read_from<R: io::Read>(depth: PixelDepth, mut reader: R) -> Result<Self, Error> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes[..depth.bytes()])?;

    Ok(Self { b: bytes[0], g: bytes[1], r: bytes[2], a: bytes[3] })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pixel_depth_from_bytes() {
    assert_eq!(PixelDepth::try_from(1), Ok(PixelDepth::Gray));
    assert_eq!(PixelDepth::try_from(3), Ok(PixelDepth::Bgr));
    assert_eq!(PixelDepth::try_from(4), Ok(PixelDepth::Bgra));
    assert_eq!(PixelDepth::try_from(2), Err(Error::UnsupportedPixelDepth(2)));
  }

  #[test]
  fn test_pixel_depth_bits() {
    assert_eq!(PixelDepth::Gray.bits(), 8);
    assert_eq!(PixelDepth::Bgr.bits(), 24);
    assert_eq!(PixelDepth::Bgra.bits(), 32);
  }

  #[test]
  fn test_writing_color_blocks() {
    let color = Color::new(1, 2, 3, 4);
    let mut dest = Vec::new();

    color.write_to(PixelDepth::Gray, &mut dest).expect("Failed to write color");
    color.write_to(PixelDepth::Bgr, &mut dest).expect("Failed to write color");
    color.write_to(PixelDepth::Bgra, &mut dest).expect("Failed to write color");

    assert_eq!(dest, vec![1, 1, 2, 3, 1, 2, 3, 4]);
  }

  #[test]
  fn test_reading_color_blocks() {
    let source = [10, 20, 30, 40];

    assert_eq!(Color::read_from(PixelDepth::Gray, source.as_slice()), Ok(Color::gray(10)));
    assert_eq!(Color::read_from(PixelDepth::Bgr, source.as_slice()), Ok(Color::bgr(10, 20, 30)));
    assert_eq!(Color::read_from(PixelDepth::Bgra, source.as_slice()), Ok(Color::new(10, 20, 30, 40)));
  }

  #[test]
  fn test_reading_truncated_color_block() {
    let source = [10, 20];

    assert_eq!(Color::read_from(PixelDepth::Bgr, source.as_slice()), Err(Error::UnexpectedEof));
  }

  #[test]
  fn test_masking_unused_channels() {
    let color = Color::new(1, 2, 3, 4);

    assert_eq!(color.masked(PixelDepth::Gray), Color::new(1, 0, 0, 0));
    assert_eq!(color.masked(PixelDepth::Bgr), Color::new(1, 2, 3, 0));
    assert_eq!(color.masked(PixelDepth::Bgra), color);
  }
}
