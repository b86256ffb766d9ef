//! Dense row-major count tables.

use serde::Serialize;

use crate::error::ScanError;

/// Largest table, in cells, that [`CountMatrix::zeros`] allocates.
pub const MAX_CELLS: usize = 1 << 28;

/// A zero-initialized `rows × cols` table of counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountMatrix {
    rows: usize,
    cols: usize,
    counts: Vec<u64>,
}

impl CountMatrix {
    /// Allocates a `rows × cols` table of zeros.
    ///
    /// Fails instead of allocating when the cell count overflows or exceeds
    /// [`MAX_CELLS`].
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, ScanError> {
        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(ScanError::InvalidParameter {
                name: "table shape",
                reason: "exceeds the largest supported count table",
            })?;

        Ok(Self {
            rows,
            cols,
            counts: vec![0; cells],
        })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Flat code for `(row, col)`.
    pub const fn code(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Splits a flat code back into `(row, col)`.
    pub const fn decode(&self, code: usize) -> (usize, usize) {
        (code / self.cols, code % self.cols)
    }

    /// Count at `(row, col)`, zero outside the table.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        if row < self.rows && col < self.cols {
            self.counts[self.code(row, col)]
        } else {
            0
        }
    }

    /// One row of the table.
    pub fn row(&self, row: usize) -> Option<&[u64]> {
        (row < self.rows).then(|| &self.counts[row * self.cols..(row + 1) * self.cols])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.rows)
            .filter_map(|r| self.row(r).map(<[u64]>::to_vec))
            .collect()
    }

    pub(crate) fn increment_code(&mut self, code: usize) {
        self.counts[code] += 1;
    }

    pub(crate) fn increment(&mut self, row: usize, col: usize) {
        let code = self.code(row, col);
        self.increment_code(code);
    }
}
