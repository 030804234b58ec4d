use std::io;

use crate::error::Error;
use crate::meta::TGA_MAX_CHUNK;
use crate::pixel::Color;

/// A run-length encoded packet, identified by a single header byte. Both kinds
/// cover between 1 and 128 pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Chunk {
  // Literal pixels, followed by `len` color blocks.
  //
  // | 7 | 6  5  4  3  2  1  0 |
  // |---|---------------------|
  // | 0 |       len - 1       |
  //
  Raw(usize),

  // A single pixel repeated `len` times, followed by one color block.
  //
  // | 7 | 6  5  4  3  2  1  0 |
  // |---|---------------------|
  // | 1 |       len - 1       |
  //
  Run(usize),
}

impl Chunk {
  const TAG_RUN: u8 = 0x80;

  /// Returns the number of pixels the chunk covers.
  pub fn len(self) -> usize {
    match self {
      Chunk::Raw(len) | Chunk::Run(len) => len,
    }
  }

  /// Returns the chunk's header byte. Lengths outside `1..=128` are clamped
  /// into that range, so `Chunk::Raw(0)` encodes as a single pixel and
  /// `Chunk::Run(200)` as a run of 128.
  pub fn header_byte(self) -> u8 {
    let count = (self.len().clamp(1, TGA_MAX_CHUNK) - 1) as u8;

    match self {
      Chunk::Raw(_) => count,
      Chunk::Run(_) => Chunk::TAG_RUN | count,
    }
  }

  /// Parses a chunk header byte.
  pub fn from_header_byte(byte: u8) -> Self {
    let len = (byte & !Chunk::TAG_RUN) as usize + 1;

    if byte & Chunk::TAG_RUN == 0 {
      Chunk::Raw(len)
    } else {
      Chunk::Run(len)
    }
  }

  // Reads the next chunk header from `bytes`.
  pub fn try_from_bytes<I>(bytes: &mut I) -> Result<Self, Error>
  where
    I: Iterator<Item = Result<u8, io::Error>>,
  {
    let byte = bytes.next().ok_or(Error::UnexpectedEof)??;
    Ok(Chunk::from_header_byte(byte))
  }

  /// Splits `cells` into chunks, in order. The first pair of pixels decides
  /// whether a chunk is a run or literal data, then the chunk grows until
  /// that no longer holds or it reaches 128 pixels. A literal chunk stops
  /// short of the first repeated pixel so the repeat can start a new chunk.
  pub fn pack(cells: &[Color]) -> Packer<'_> {
    Packer { cells, cursor: 0 }
  }
}

/// Iterator over the chunks of a pixel sequence, see [Chunk::pack].
pub struct Packer<'a> {
  cells: &'a [Color],
  cursor: usize,
}

impl Iterator for Packer<'_> {
  type Item = Chunk;

  fn next(&mut self) -> Option<Chunk> {
    let cur = self.cursor;
    let total = self.cells.len();

    if cur >= total {
      return None;
    }

    let mut run_length = 1;
    let mut raw = true;

    while cur + run_length < total && run_length < TGA_MAX_CHUNK {
      let equal = self.cells[cur + run_length - 1] == self.cells[cur + run_length];

      if run_length == 1 {
        raw = !equal;
      }

      if raw && equal {
        run_length -= 1;
        break;
      }

      if !raw && !equal {
        break;
      }

      run_length += 1;
    }

    self.cursor += run_length;

    if raw {
      Some(Chunk::Raw(run_length))
    } else {
      Some(Chunk::Run(run_length))
    }
  }
}
