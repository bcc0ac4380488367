//! Borrowed views over raw network output tensors.
//!
//! `MatrixView` is a read-only row-major 2D view into a flat `f32` buffer.
//! The core never copies or mutates the tensors it is handed; all pipeline
//! stages read through views like this one.

use crate::util::{GridBoxError, GridBoxResult};

/// Borrowed row-major 2D view over a flat slice.
#[derive(Copy, Clone)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
}

impl<'a> MatrixView<'a> {
    /// Creates a view of `rows * cols` elements over `data`.
    ///
    /// The slice may be longer than the view; extra elements are ignored.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> GridBoxResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridBoxError::InvalidDimensions { rows, cols });
        }
        let needed = rows
            .checked_mul(cols)
            .ok_or(GridBoxError::InvalidDimensions { rows, cols })?;
        if data.len() < needed {
            return Err(GridBoxError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a contiguous slice of length `cols`.
    pub fn row(&self, r: usize) -> Option<&'a [f32]> {
        if r >= self.rows {
            return None;
        }
        let start = r * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Returns the element at `(r, c)` if it is within bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<f32> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        self.data.get(r * self.cols + c).copied()
    }
}
