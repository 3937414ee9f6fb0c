//! Second order accurate first derivatives on non-uniform rectilinear grids.
//!
//! Inner points use the central difference for unequal spacing, the first
//! and last point of every line use one sided three point formulas ("edge
//! order 2"). With `h1 = x[i] - x[i-1]` and `h2 = x[i+1] - x[i]`
//!
//! ```text
//! f'[i] = -h2 / (h1 (h1 + h2)) f[i-1] + (h2 - h1) / (h1 h2) f[i] + h1 / (h2 (h1 + h2)) f[i+1]
//! ```
//!
//! All three formulas are exact for quadratic polynomials. Repeated
//! coordinates give zero spacing and thus infinite or NaN weights, this is
//! not guarded against.

#[cfg(test)]
#[path = "./gradient_test.rs"]
mod gradient_test;

use crate::consts::MIN_POINTS_PER_AXIS;
use crate::errors::*;
use crate::mesh::{GridAxis, RectilinearGrid};
use crate::Float;
use ndarray::{Array, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};

/// Derivative weights of every point on one grid line. Point `i` combines
/// the three neighbours starting at `window_start(i)`.
#[derive(Debug, Clone)]
pub struct Stencil {
    weights: Vec<[Float; 3]>,
}

impl Stencil {
    /// Precomputes the weights for the coordinate vector `x`.
    pub fn new(x: ArrayView1<Float>) -> Result<Stencil> {
        let n = x.len();
        if n < MIN_POINTS_PER_AXIS {
            bail!("Need at least {} coordinates for a second order stencil, got {}.",
                  MIN_POINTS_PER_AXIS,
                  n);
        }

        let mut weights = Vec::with_capacity(n);

        // lower border
        {
            let h1 = x[1] - x[0];
            let h2 = x[2] - x[1];
            weights.push([
                -(2. * h1 + h2) / (h1 * (h1 + h2)),
                (h1 + h2) / (h1 * h2),
                -h1 / (h2 * (h1 + h2)),
            ]);
        }

        // bulk
        for w in x.windows(3) {
            let h1 = w[1] - w[0];
            let h2 = w[2] - w[1];
            weights.push([
                -h2 / (h1 * (h1 + h2)),
                (h2 - h1) / (h1 * h2),
                h1 / (h2 * (h1 + h2)),
            ]);
        }

        // upper border
        {
            let h1 = x[n - 2] - x[n - 3];
            let h2 = x[n - 1] - x[n - 2];
            weights.push([
                h2 / (h1 * (h1 + h2)),
                -(h1 + h2) / (h1 * h2),
                (2. * h2 + h1) / (h2 * (h1 + h2)),
            ]);
        }

        Ok(Stencil { weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[[Float; 3]] {
        &self.weights
    }

    /// First of the three points entering the derivative at `i`.
    pub fn window_start(&self, i: usize) -> usize {
        i.saturating_sub(1).min(self.len() - 3)
    }

    /// Writes the derivative of `f` into `df`. Both must have the length of
    /// the stencil.
    pub(crate) fn apply(&self, f: ArrayView1<Float>, mut df: ArrayViewMut1<Float>) {
        debug_assert_eq!(f.len(), self.len());
        debug_assert_eq!(df.len(), self.len());

        for (i, (w, d)) in self.weights.iter().zip(df.iter_mut()).enumerate() {
            let s = self.window_start(i);
            *d = w[0] * f[s] + w[1] * f[s + 1] + w[2] * f[s + 2];
        }
    }
}

/// Stencils along both axes of a grid, built once and reused for every
/// derivative taken on that grid.
#[derive(Debug, Clone)]
pub struct GridStencils {
    row: Stencil,
    column: Stencil,
}

impl GridStencils {
    /// Fails with `GridTooSmall` if either axis has less than three points.
    pub fn new(grid: &RectilinearGrid) -> Result<GridStencils> {
        let gs = grid.size();
        gs.check_second_order()?;

        Ok(GridStencils {
            row: Stencil::new(grid.coordinates(GridAxis::Row).view())?,
            column: Stencil::new(grid.coordinates(GridAxis::Column).view())?,
        })
    }

    pub fn along(&self, axis: GridAxis) -> &Stencil {
        match axis {
            GridAxis::Row => &self.row,
            GridAxis::Column => &self.column,
        }
    }

    /// Differentiates `field` along `axis`, every grid line independently.
    pub fn differentiate(&self, field: ArrayView2<Float>, axis: GridAxis) -> Result<Array2<Float>> {
        let shape = (self.row.len(), self.column.len());
        if field.dim() != shape {
            bail!(ErrorKind::ShapeMismatch(format!(
                "field has shape {:?}, grid has shape {:?}",
                field.dim(),
                shape
            )));
        }

        Ok(apply_along(self.along(axis), field, axis))
    }
}

/// Applies `stencil` to every line of `field` running along `axis`. The
/// stencil length has to match the field extent along that axis.
fn apply_along(stencil: &Stencil, field: ArrayView2<Float>, axis: GridAxis) -> Array2<Float> {
    let ax = axis.axis();

    let mut res = Array::zeros(field.dim());
    Zip::from(res.lanes_mut(ax))
        .and(field.lanes(ax))
        .for_each(|df, f| stencil.apply(f, df));

    res
}

/// Differentiates `field` along `axis` using the coordinate vector `coords`
/// of that axis.
pub fn gradient_along(
    field: ArrayView2<Float>,
    coords: ArrayView1<Float>,
    axis: GridAxis,
) -> Result<Array2<Float>> {
    let ax = axis.axis();
    let n = field.len_of(ax);

    if coords.len() != n {
        bail!(ErrorKind::ShapeMismatch(format!(
            "{} coordinates given along {}, field has {} points",
            coords.len(),
            axis.coordinate(),
            n
        )));
    }

    if n < MIN_POINTS_PER_AXIS {
        let (rows, columns) = field.dim();
        bail!(ErrorKind::GridTooSmall(rows, columns));
    }

    let stencil = Stencil::new(coords)?;

    Ok(apply_along(&stencil, field, axis))
}

/// First partial derivatives of a scalar field.
#[derive(Debug, Clone)]
pub struct Gradient {
    /// Derivative along the rows, `du/dy`.
    pub d_dy: Array2<Float>,
    /// Derivative along the columns, `du/dx`.
    pub d_dx: Array2<Float>,
}

impl Gradient {
    pub fn of(stencils: &GridStencils, field: ArrayView2<Float>) -> Result<Gradient> {
        Ok(Gradient {
            d_dy: stencils.differentiate(field, GridAxis::Row)?,
            d_dx: stencils.differentiate(field, GridAxis::Column)?,
        })
    }
}
