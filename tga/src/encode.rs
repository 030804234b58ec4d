use std::io;

use crate::buffer::PixelBuffer;
use crate::chunk::Chunk;
use crate::error::Error;
use crate::meta::{footer, Header, ImageType};

/// Settings controlling how [encode_image] lays out an image.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EncodeOptions {
  /// Mark the image as having a bottom-left origin. Pixel data is written in
  /// buffer order either way, so readers honoring the origin will see the
  /// rows reversed.
  pub vertical_flip: bool,
  /// Run-length encode the pixel data.
  pub rle: bool,
}

impl EncodeOptions {
  pub fn with_vertical_flip(mut self, vertical_flip: bool) -> Self {
    self.vertical_flip = vertical_flip;
    self
  }

  pub fn with_rle(mut self, rle: bool) -> Self {
    self.rle = rle;
    self
  }
}

/// Encodes a `PixelBuffer` into a TGA image: the header, the raw or
/// run-length encoded pixel data, and the TGA 2.0 footer.
///
/// The `writer` receives many small writes, so provide a buffered
/// implementation such as `std::io::BufWriter` when writing to a file or
/// socket.
pub fn encode_image<W: io::Write>(
  buffer: &PixelBuffer,
  mut writer: W,
  options: &EncodeOptions,
) -> Result<(), Error> {
  let header = Header {
    image_type: ImageType::for_depth(buffer.depth(), options.rle),
    width: buffer.width(),
    height: buffer.height(),
    depth: buffer.depth(),
    top_origin: !options.vertical_flip,
    right_origin: false,
  };

  log::debug!(
    "encoding {}x{} image, {} bytes per pixel, {:?}",
    header.width,
    header.height,
    header.depth.bytes(),
    header.image_type,
  );

  writer.write_all(&header.to_bytes())?;

  if options.rle {
    encode_rle_pixels(buffer, &mut writer)?;
  } else {
    encode_raw_pixels(buffer, &mut writer)?;
  }

  writer.write_all(&footer())?;
  writer.flush()?;

  Ok(())
}

// Writes every pixel as a plain color block.
fn encode_raw_pixels<W: io::Write>(buffer: &PixelBuffer, mut writer: W) -> Result<(), Error> {
  for color in buffer.cells() {
    color.write_to(buffer.depth(), &mut writer)?;
  }

  Ok(())
}

// Writes the pixels as a sequence of run-length encoded chunks.
fn encode_rle_pixels<W: io::Write>(buffer: &PixelBuffer, mut writer: W) -> Result<(), Error> {
  let cells = buffer.cells();
  let mut cursor = 0;

  for chunk in Chunk::pack(cells) {
    log::trace!("pixel {}: {:?}", cursor, chunk);
    writer.write_all(&[chunk.header_byte()])?;

    let colors = match chunk {
      Chunk::Raw(len) => &cells[cursor..cursor + len],
      Chunk::Run(_) => &cells[cursor..cursor + 1],
    };

    for color in colors {
      color.write_to(buffer.depth(), &mut writer)?;
    }

    cursor += chunk.len();
  }

  Ok(())
}
