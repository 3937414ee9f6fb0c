//! Data structure that holds the number of grid points along each axis.

use crate::consts::MIN_POINTS_PER_AXIS;
use crate::errors::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of rows, `jmax`, points along `y`.
    pub rows: usize,
    /// Number of columns, `imax`, points along `x`.
    pub columns: usize,
}

impl GridSize {
    pub fn new(rows: usize, columns: usize) -> GridSize {
        GridSize { rows, columns }
    }

    /// Shape as used by `ndarray`, `(jmax, imax)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn number_of_points(&self) -> usize {
        self.rows * self.columns
    }

    /// Fails unless both axes carry enough points for the one sided second
    /// order stencils at the boundaries.
    pub fn check_second_order(&self) -> Result<()> {
        if self.rows < MIN_POINTS_PER_AXIS || self.columns < MIN_POINTS_PER_AXIS {
            bail!(ErrorKind::GridTooSmall(self.rows, self.columns));
        }

        Ok(())
    }
}
