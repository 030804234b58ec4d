use std::io;
use std::iter;

use crate::buffer::PixelBuffer;
use crate::chunk::Chunk;
use crate::error::Error;
use crate::meta::{Header, TGA_HEADER_LEN};
use crate::pixel::{Color, PixelDepth};

// Upper bound on the cells reserved up front. Larger images grow the cell
// vector as pixel data arrives, so a header alone can't force a huge
// allocation.
const MAX_PREALLOCATED_PIXELS: usize = 1 << 20;

/// Decodes a TGA image into a `PixelBuffer`. Uncompressed and run-length
/// encoded true-color and grayscale images are supported; the image origin
/// recorded in the header is applied so the returned buffer always starts at
/// the top-left pixel.
///
/// Decoding either succeeds with a complete buffer or fails: a malformed
/// header, a chunk running past the image, or a source that ends early all
/// produce an error. Anything following the pixel data (such as the TGA 2.0
/// footer) is left unread.
///
/// The `reader` is read in small pieces, so provide a buffered implementation
/// such as `std::io::BufReader` when reading from a file or socket.
pub fn decode_image<R: io::Read>(mut reader: R) -> Result<PixelBuffer, Error> {
  let header = decode_header(&mut reader)?;

  log::debug!(
    "decoding {}x{} image, {} bytes per pixel, {:?}",
    header.width,
    header.height,
    header.depth.bytes(),
    header.image_type,
  );

  let num_pixels = header.num_pixels();
  let mut cells = Vec::with_capacity(num_pixels.min(MAX_PREALLOCATED_PIXELS));

  if header.image_type.is_rle() {
    decode_rle_pixels(&mut cells, num_pixels, header.depth, &mut reader)?;
  } else {
    decode_raw_pixels(&mut cells, num_pixels, header.depth, &mut reader)?;
  }

  let mut buffer = PixelBuffer::from_cells(header.width, header.height, header.depth, cells);

  if !header.top_origin {
    buffer.flip_vertically();
  }

  if header.right_origin {
    buffer.flip_horizontally();
  }

  Ok(buffer)
}

/// Reads and validates the 18 byte header at the start of a TGA image.
pub fn decode_header<R: io::Read>(mut reader: R) -> Result<Header, Error> {
  let mut header_buf = [0; TGA_HEADER_LEN];
  reader.read_exact(&mut header_buf)?;

  Header::try_from(&header_buf)
}

// Reads one color block per pixel until `num_pixels` cells are filled.
fn decode_raw_pixels<R: io::Read>(
  cells: &mut Vec<Color>,
  num_pixels: usize,
  depth: PixelDepth,
  mut reader: R,
) -> Result<(), Error> {
  while cells.len() < num_pixels {
    cells.push(Color::read_from(depth, &mut reader)?);
  }

  Ok(())
}

// Reads chunks until `num_pixels` cells are filled.
fn decode_rle_pixels<R: io::Read>(
  cells: &mut Vec<Color>,
  num_pixels: usize,
  depth: PixelDepth,
  mut reader: R,
) -> Result<(), Error> {
  while cells.len() < num_pixels {
    let chunk = Chunk::try_from_bytes(&mut io::Read::bytes(&mut reader))?;
    let remaining = num_pixels - cells.len();

    if chunk.len() > remaining {
      return Err(Error::ChunkOverrun { length: chunk.len(), remaining });
    }

    log::trace!("pixel {}: {:?}", cells.len(), chunk);

    match chunk {
      Chunk::Raw(len) => {
        for _ in 0..len {
          cells.push(Color::read_from(depth, &mut reader)?);
        }
      }
      Chunk::Run(len) => {
        let color = Color::read_from(depth, &mut reader)?;
        cells.extend(iter::repeat(color).take(len));
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::meta::{footer, ImageType};

  fn image(header: Header, pixel_data: &[u8]) -> Vec<u8> {
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(pixel_data);
    bytes.extend_from_slice(&footer());
    bytes
  }

  fn header(image_type: ImageType, width: u16, height: u16, depth: PixelDepth) -> Header {
    Header { image_type, width, height, depth, top_origin: true, right_origin: false }
  }

  #[test]
  fn test_decoding_image_header() {
    let bytes = header(ImageType::TrueColor, 4, 2, PixelDepth::Bgr).to_bytes();

    assert_eq!(
      decode_header(bytes.as_slice()),
      Ok(header(ImageType::TrueColor, 4, 2, PixelDepth::Bgr)),
    );
  }

  #[test]
  fn test_decoding_invalid_image_header() {
    let mut bytes = header(ImageType::TrueColor, 4, 2, PixelDepth::Bgr).to_bytes();
    bytes[0] = 1;

    assert_eq!(
      decode_image(bytes.as_slice()),
      Err(Error::ReservedField { offset: 0, value: 1 }),
    );
  }

  #[test]
  fn test_decoding_short_header() {
    assert_eq!(decode_header([0, 0, 2].as_slice()), Err(Error::UnexpectedEof));
  }

  #[test]
  fn test_decoding_raw_pixels() {
    let source = image(header(ImageType::TrueColor, 2, 1, PixelDepth::Bgr), &[1, 2, 3, 4, 5, 6]);
    let buffer = decode_image(source.as_slice()).expect("Failed to decode image");

    assert_eq!(buffer.cells(), &[Color::bgr(1, 2, 3), Color::bgr(4, 5, 6)]);
  }

  #[test]
  fn test_decoding_rle_run_chunk() {
    let source = image(header(ImageType::RleGrayscale, 3, 1, PixelDepth::Gray), &[130, 7]);
    let buffer = decode_image(source.as_slice()).expect("Failed to decode image");

    assert_eq!(buffer.cells(), &[Color::gray(7); 3]);
  }

  #[test]
  fn test_decoding_rle_raw_chunk() {
    let source = image(header(ImageType::RleGrayscale, 3, 1, PixelDepth::Gray), &[2, 7, 8, 9]);
    let buffer = decode_image(source.as_slice()).expect("Failed to decode image");

    assert_eq!(buffer.cells(), &[Color::gray(7), Color::gray(8), Color::gray(9)]);
  }

  #[test]
  fn test_decoding_rle_mixed_chunks() {
    let source = image(
      header(ImageType::RleTrueColor, 2, 2, PixelDepth::Bgra),
      &[
        129, 1, 2, 3, 4, // Chunk::Run(2)
        1, 5, 6, 7, 8, 9, 10, 11, 12, // Chunk::Raw(2)
      ],
    );
    let buffer = decode_image(source.as_slice()).expect("Failed to decode image");

    assert_eq!(
      buffer.cells(),
      &[
        Color::new(1, 2, 3, 4),
        Color::new(1, 2, 3, 4),
        Color::new(5, 6, 7, 8),
        Color::new(9, 10, 11, 12),
      ]
    );
  }

  #[test]
  fn test_decoding_chunk_overrun() {
    let source = image(header(ImageType::RleGrayscale, 2, 1, PixelDepth::Gray), &[130, 7]);

    assert_eq!(
      decode_image(source.as_slice()),
      Err(Error::ChunkOverrun { length: 3, remaining: 2 }),
    );
  }

  #[test]
  fn test_decoding_truncated_pixels() {
    let mut source = header(ImageType::TrueColor, 2, 1, PixelDepth::Bgr).to_bytes().to_vec();
    source.extend_from_slice(&[1, 2, 3, 4]);
    assert_eq!(decode_image(source.as_slice()), Err(Error::UnexpectedEof));

    let mut source = header(ImageType::RleTrueColor, 2, 1, PixelDepth::Bgr).to_bytes().to_vec();
    source.extend_from_slice(&[128, 1, 2, 3]);
    assert_eq!(decode_image(source.as_slice()), Err(Error::UnexpectedEof));
  }

  #[test]
  fn test_decoding_max_dimensions_without_pixel_data() {
    let source = header(ImageType::TrueColor, u16::MAX, u16::MAX, PixelDepth::Bgra).to_bytes();
    assert_eq!(decode_image(source.as_slice()), Err(Error::UnexpectedEof));

    let source = header(ImageType::RleTrueColor, u16::MAX, u16::MAX, PixelDepth::Bgra).to_bytes();
    assert_eq!(decode_image(source.as_slice()), Err(Error::UnexpectedEof));
  }

  #[test]
  fn test_decoding_bottom_origin_flips_rows() {
    let mut bottom_origin = header(ImageType::Grayscale, 2, 2, PixelDepth::Gray);
    bottom_origin.top_origin = false;

    let buffer = decode_image(image(bottom_origin, &[1, 2, 3, 4]).as_slice())
      .expect("Failed to decode image");

    assert_eq!(buffer.cells(), &[3, 4, 1, 2].map(Color::gray));
  }

  #[test]
  fn test_decoding_right_origin_flips_columns() {
    let mut right_origin = header(ImageType::Grayscale, 3, 2, PixelDepth::Gray);
    right_origin.right_origin = true;

    let buffer = decode_image(image(right_origin, &[1, 2, 3, 4, 5, 6]).as_slice())
      .expect("Failed to decode image");

    assert_eq!(buffer.cells(), &[3, 2, 1, 6, 5, 4].map(Color::gray));
  }
}
