use crate::error::Error;
use crate::pixel::PixelDepth;

pub const TGA_HEADER_LEN: usize = 18;
pub const TGA_FOOTER_LEN: usize = 26;
pub const TGA_SIGNATURE: &[u8] = b"TRUEVISION-XFILE.";
pub const TGA_MAX_CHUNK: usize = 128;

// Image descriptor bits describing the image origin.
pub const DESCRIPTOR_RIGHT_ORIGIN: u8 = 0x10;
pub const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;

// Offsets of the header fields that must always be zero: the ID length, the
// color map type, the 5 byte color map specification and the x and y origin.
const RESERVED_OFFSETS: [usize; 11] = [0, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// The footer appended to every encoded image: the (empty) extension and
/// developer area offsets, followed by the TGA 2.0 signature.
pub fn footer() -> [u8; TGA_FOOTER_LEN] {
  let mut bytes = [0; TGA_FOOTER_LEN];
  bytes[8..8 + TGA_SIGNATURE.len()].copy_from_slice(TGA_SIGNATURE);
  bytes
}

/// The TGA image types this crate reads and writes. Color-mapped images are
/// not supported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageType {
  TrueColor = 2,
  Grayscale = 3,
  RleTrueColor = 10,
  RleGrayscale = 11,
}

impl ImageType {
  /// Returns the image type used to store pixels of the given `depth`.
  pub fn for_depth(depth: PixelDepth, rle: bool) -> Self {
    match (depth, rle) {
      (PixelDepth::Gray, false) => ImageType::Grayscale,
      (PixelDepth::Gray, true) => ImageType::RleGrayscale,
      (_, false) => ImageType::TrueColor,
      (_, true) => ImageType::RleTrueColor,
    }
  }

  /// Whether pixel data is run-length encoded.
  pub fn is_rle(self) -> bool {
    matches!(self, ImageType::RleTrueColor | ImageType::RleGrayscale)
  }

  // Parses an image type byte, accepting only the types that can hold pixels
  // of the given `depth`.
  fn from_byte(byte: u8, depth: PixelDepth) -> Result<Self, Error> {
    let unsupported = || Error::UnsupportedImageType {
      image_type: byte,
      bytes_per_pixel: depth.bytes() as u8,
    };

    let image_type = match byte {
      2 => ImageType::TrueColor,
      3 => ImageType::Grayscale,
      10 => ImageType::RleTrueColor,
      11 => ImageType::RleGrayscale,
      _ => return Err(unsupported()),
    };

    if ImageType::for_depth(depth, image_type.is_rle()) != image_type {
      return Err(unsupported());
    }

    Ok(image_type)
  }
}

/// The fields of a TGA header this crate makes use of. Every other header
/// field is zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
  /// How pixel data is stored, see [ImageType].
  pub image_type: ImageType,
  /// The image's width.
  pub width: u16,
  /// The image's height.
  pub height: u16,
  /// The number of bytes per pixel.
  pub depth: PixelDepth,
  /// The first row of pixel data is the top row of the image. When unset the
  /// rows are stored bottom to top.
  pub top_origin: bool,
  /// Each row of pixel data is stored right to left.
  pub right_origin: bool,
}

impl Header {
  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> usize {
    self.width as usize * self.height as usize
  }

  /// Returns the image descriptor byte.
  pub fn descriptor(&self) -> u8 {
    let mut descriptor = 0;

    if self.top_origin {
      descriptor |= DESCRIPTOR_TOP_ORIGIN;
    }

    if self.right_origin {
      descriptor |= DESCRIPTOR_RIGHT_ORIGIN;
    }

    descriptor
  }

  /// Serializes the header into its 18 byte little-endian layout.
  pub fn to_bytes(&self) -> [u8; TGA_HEADER_LEN] {
    let mut bytes = [0; TGA_HEADER_LEN];

    bytes[2] = self.image_type as u8;
    bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
    bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
    bytes[16] = self.depth.bits();
    bytes[17] = self.descriptor();

    bytes
  }
}

/// A `TryFrom` implementation validating and parsing a raw 18 byte header.
impl TryFrom<&[u8; TGA_HEADER_LEN]> for Header {
  type Error = Error;

  fn try_from(bytes: &[u8; TGA_HEADER_LEN]) -> Result<Self, Self::Error> {
    if let Some(&offset) = RESERVED_OFFSETS.iter().find(|&&offset| bytes[offset] != 0) {
      return Err(Error::ReservedField { offset, value: bytes[offset] });
    }

    let width = u16::from_le_bytes([bytes[12], bytes[13]]);
    let height = u16::from_le_bytes([bytes[14], bytes[15]]);

    if width == 0 || height == 0 {
      return Err(Error::InvalidDimensions);
    }

    let depth = PixelDepth::try_from(bytes[16] / 8)?;
    let image_type = ImageType::from_byte(bytes[2], depth)?;

    Ok(Header {
      image_type,
      width,
      height,
      depth,
      top_origin: bytes[17] & DESCRIPTOR_TOP_ORIGIN != 0,
      right_origin: bytes[17] & DESCRIPTOR_RIGHT_ORIGIN != 0,
    })
  }
}
