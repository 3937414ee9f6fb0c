//! Logically rectilinear 2D grid and the scalar field living on it.
//!
//! Arrays are indexed `[j, i]`. The row index `j` runs along `y`, the column
//! index `i` runs along `x`, so `y` is constant along a row and `x` is
//! constant along a column. `GridAxis` is the single place where this
//! convention is spelled out.

use crate::errors::*;
use crate::Float;
use ndarray::{Array, Array1, Array2, ArrayView1, Axis, Ix1};

pub mod grid_size;

pub use self::grid_size::GridSize;

/// Axis of a `[j, i]` indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridAxis {
    /// Axis 0, index `j`, coordinate `y`.
    Row,
    /// Axis 1, index `i`, coordinate `x`.
    Column,
}

impl GridAxis {
    /// The `ndarray` axis along which this grid axis advances.
    pub fn axis(self) -> Axis {
        match self {
            GridAxis::Row => Axis(0),
            GridAxis::Column => Axis(1),
        }
    }

    /// Name of the coordinate varying along this axis.
    pub fn coordinate(self) -> &'static str {
        match self {
            GridAxis::Row => "y",
            GridAxis::Column => "x",
        }
    }
}

/// First and last coordinate value along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

/// Coordinates of all grid points, `x[j, i]` and `y[j, i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearGrid {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl RectilinearGrid {
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<RectilinearGrid> {
        if x.dim() != y.dim() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "x has shape {:?}, y has shape {:?}",
                x.dim(),
                y.dim()
            )));
        }

        Ok(RectilinearGrid { x, y })
    }

    /// Builds the full grid from the coordinate vectors of both axes.
    pub fn from_axes(x_coords: ArrayView1<f32>, y_coords: ArrayView1<f32>) -> RectilinearGrid {
        let shape = (y_coords.len(), x_coords.len());

        let mut x = Array::zeros(shape);
        let mut y = Array::zeros(shape);

        // x varies along the columns
        for (xi, mut col) in x_coords.iter().zip(x.axis_iter_mut(Axis(1))) {
            col.fill(*xi);
        }

        // y varies along the rows
        for (yj, mut row) in y_coords.iter().zip(y.axis_iter_mut(Axis(0))) {
            row.fill(*yj);
        }

        RectilinearGrid { x, y }
    }

    pub fn x(&self) -> &Array2<f32> {
        &self.x
    }

    pub fn y(&self) -> &Array2<f32> {
        &self.y
    }

    pub fn size(&self) -> GridSize {
        let (rows, columns) = self.x.dim();
        GridSize::new(rows, columns)
    }

    /// Coordinate vector along `axis`, `y[:, 0]` for rows and `x[0, :]` for
    /// columns. Empty if the grid has no points.
    pub fn coordinates(&self, axis: GridAxis) -> Array<Float, Ix1> {
        let gs = self.size();
        if gs.number_of_points() == 0 {
            return Array1::zeros(0);
        }

        match axis {
            GridAxis::Row => self.y.column(0).mapv(Float::from),
            GridAxis::Column => self.x.row(0).mapv(Float::from),
        }
    }

    /// Axis limits for plotting, `None` for an empty grid.
    pub fn limits(&self) -> Option<AxisLimits> {
        let gs = self.size();
        if gs.number_of_points() == 0 {
            return None;
        }

        let x = self.x.row(0);
        let y = self.y.column(0);

        Some(AxisLimits {
            x: (x[0], x[gs.columns - 1]),
            y: (y[0], y[gs.rows - 1]),
        })
    }

    /// True if every row of `x` repeats `x[0, :]` and every column of `y`
    /// repeats `y[:, 0]`. Only then do the coordinate vectors describe the
    /// spacing everywhere.
    pub fn is_rectilinear(&self) -> bool {
        if self.size().number_of_points() == 0 {
            return true;
        }

        let x0 = self.x.row(0);
        let y0 = self.y.column(0);

        self.x.outer_iter().all(|row| row == x0)
            && self.y.axis_iter(Axis(1)).all(|col| col == y0)
    }

    pub fn into_parts(self) -> (Array2<f32>, Array2<f32>) {
        (self.x, self.y)
    }
}

/// Content of a solver dump, the grid and the solution `u[j, i]` on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDump {
    pub grid: RectilinearGrid,
    pub u: Array2<f32>,
}

impl FieldDump {
    pub fn new(grid: RectilinearGrid, u: Array2<f32>) -> Result<FieldDump> {
        if grid.size().shape() != u.dim() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "grid has shape {:?}, field has shape {:?}",
                grid.size().shape(),
                u.dim()
            )));
        }

        Ok(FieldDump { grid, u })
    }

    /// Samples `f(x, y)` on the grid spanned by the coordinate vectors.
    pub fn from_fn<F>(x_coords: ArrayView1<f32>, y_coords: ArrayView1<f32>, f: F) -> FieldDump
    where
        F: Fn(f32, f32) -> f32,
    {
        let grid = RectilinearGrid::from_axes(x_coords, y_coords);

        let mut u = Array::zeros(grid.size().shape());
        ndarray::Zip::from(&mut u)
            .and(grid.x())
            .and(grid.y())
            .for_each(|u, &x, &y| *u = f(x, y));

        FieldDump { grid, u }
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }
}
