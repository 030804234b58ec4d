use crate::error::Error;
use crate::pixel::{Color, PixelDepth};

/// An in-memory image: a fixed size grid of [Color] cells stored row by row,
/// top row first. A cell at `(x, y)` lives at index `y * width + x`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
  width: u16,
  height: u16,
  depth: PixelDepth,
  cells: Vec<Color>,
}

impl PixelBuffer {
  /// Creates a buffer with every cell set to `Color::default()`. Both
  /// dimensions must be nonzero.
  pub fn new(width: u16, height: u16, depth: PixelDepth) -> Result<Self, Error> {
    if width == 0 || height == 0 {
      return Err(Error::InvalidDimensions);
    }

    Ok(Self {
      width,
      height,
      depth,
      cells: vec![Color::default(); width as usize * height as usize],
    })
  }

  /// Creates a buffer from `colors` given in row-major order. Colors past the
  /// end of the image are dropped, cells without a color are left zeroed.
  pub fn from_colors<I>(width: u16, height: u16, depth: PixelDepth, colors: I) -> Result<Self, Error>
  where
    I: IntoIterator<Item = Color>,
  {
    let mut buffer = Self::new(width, height, depth)?;

    for (cell, color) in buffer.cells.iter_mut().zip(colors) {
      *cell = color;
    }

    Ok(buffer)
  }

  // Wraps fully decoded cells. Dimensions come from a validated header.
  pub(crate) fn from_cells(width: u16, height: u16, depth: PixelDepth, cells: Vec<Color>) -> Self {
    debug_assert_eq!(cells.len(), width as usize * height as usize);

    Self { width, height, depth, cells }
  }

  pub fn width(&self) -> u16 {
    self.width
  }

  pub fn height(&self) -> u16 {
    self.height
  }

  pub fn depth(&self) -> PixelDepth {
    self.depth
  }

  /// Returns the total number of pixels that make up the image.
  pub fn num_pixels(&self) -> usize {
    self.cells.len()
  }

  /// All cells in row-major order.
  pub fn cells(&self) -> &[Color] {
    &self.cells
  }

  /// Returns the color at `(x, y)`, or `None` when out of bounds.
  pub fn get(&self, x: u16, y: u16) -> Option<Color> {
    self.index(x, y).map(|index| self.cells[index])
  }

  /// Sets the color at `(x, y)`. Writes outside the image are ignored.
  pub fn put(&mut self, x: u16, y: u16, color: Color) {
    if let Some(index) = self.index(x, y) {
      self.cells[index] = color;
    }
  }

  /// Reverses the order of the rows in place.
  pub fn flip_vertically(&mut self) {
    let width = self.width as usize;
    let height = self.height as usize;

    for row in 0..height / 2 {
      let (top, bottom) = self.cells.split_at_mut((height - 1 - row) * width);
      top[row * width..(row + 1) * width].swap_with_slice(&mut bottom[..width]);
    }
  }

  /// Reverses the order of the pixels within every row in place.
  pub fn flip_horizontally(&mut self) {
    for row in self.cells.chunks_exact_mut(self.width as usize) {
      row.reverse();
    }
  }

  fn index(&self, x: u16, y: u16) -> Option<usize> {
    if x >= self.width || y >= self.height {
      return None;
    }

    Some(y as usize * self.width as usize + x as usize)
  }
}
