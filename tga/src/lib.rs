//! This crate implements an encoder and decoder for the
//! [TGA (Truevision) image format](https://en.wikipedia.org/wiki/Truevision_TGA).
//!
//! Images are held in memory as a [PixelBuffer] of 1 (grayscale), 3 (BGR) or
//! 4 (BGRA) bytes per pixel. The two primary exports are the `encode_image`
//! and `decode_image` functions, which write to any `std::io::Write` and read
//! from any `std::io::Read`. Pixel data can be stored uncompressed or run-length
//! encoded, see [EncodeOptions].
//!
//! Color-mapped images and the TGA 2.0 extension area are not supported.
//! Encoded images always end with the TGA 2.0 footer, which decoding ignores.
//!
//! # In-memory round trip example
//!
//! ```rust
//! use tga::{decode_image, encode_image, Color, EncodeOptions, PixelBuffer, PixelDepth};
//!
//! // A 2x2 image with a single red pixel in the top-left corner.
//! let mut image = PixelBuffer::new(2, 2, PixelDepth::Bgr).unwrap();
//! image.put(0, 0, Color::bgr(0, 0, 255));
//!
//! // Buffer to write the encoded image to.
//! let mut encoded = Vec::new();
//! let options = EncodeOptions::default().with_rle(true);
//!
//! match encode_image(&image, &mut encoded, &options) {
//!   Ok(()) => {
//!     let decoded = decode_image(encoded.as_slice()).unwrap();
//!     assert_eq!(decoded, image);
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```
//!
//! # File example
//!
//! ```rust,no_run
//! use tga::{read_file, write_file, EncodeOptions};
//!
//! let image = read_file("input.tga").unwrap();
//! write_file("output.tga", &image, &EncodeOptions::default()).unwrap();
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub use crate::buffer::PixelBuffer;
pub use crate::chunk::{Chunk, Packer};
pub use crate::decode::{decode_header, decode_image};
pub use crate::encode::{encode_image, EncodeOptions};
pub use crate::error::{Error, Result};
pub use crate::meta::{Header, ImageType};
pub use crate::pixel::{Color, PixelDepth};

mod buffer;
mod chunk;
mod decode;
mod encode;
mod error;
mod meta;
mod pixel;

/// Encodes `buffer` into a new file at `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(path: P, buffer: &PixelBuffer, options: &EncodeOptions) -> Result<()> {
  let file = File::create(path)?;
  encode_image(buffer, BufWriter::new(file), options)
}

/// Decodes the TGA image stored at `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
  let file = File::open(path)?;
  decode_image(BufReader::new(file))
}
