//! Consistency checks derived from second derivatives of the solution.
//!
//! For any smooth `u` the mixed partials commute, so `curl(grad(u))` vanishes
//! and its magnitude measures the discretisation error only. `div(grad(u))`
//! is the discrete Laplacian and reproduces the source term of the Poisson
//! problem the solver was given.

use super::gradient::{Gradient, GridStencils};
use crate::errors::*;
use crate::mesh::RectilinearGrid;
use crate::Float;
use ndarray::{Array2, ArrayView2};

/// All four second partial derivatives. `d2_dydx` is `d/dx (du/dy)` and
/// `d2_dxdy` is `d/dy (du/dx)`.
#[derive(Debug, Clone)]
pub struct SecondDerivatives {
    pub d2_dydy: Array2<Float>,
    pub d2_dydx: Array2<Float>,
    pub d2_dxdy: Array2<Float>,
    pub d2_dxdx: Array2<Float>,
}

impl SecondDerivatives {
    /// Differentiates both components of the first gradient again along
    /// both axes.
    pub fn of(stencils: &GridStencils, first: &Gradient) -> Result<SecondDerivatives> {
        let dy = Gradient::of(stencils, first.d_dy.view())?;
        let dx = Gradient::of(stencils, first.d_dx.view())?;

        Ok(SecondDerivatives {
            d2_dydy: dy.d_dy,
            d2_dydx: dy.d_dx,
            d2_dxdy: dx.d_dy,
            d2_dxdx: dx.d_dx,
        })
    }
}

/// Derived diagnostic fields, same shape as the solution.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// `d2u/dydx - d2u/dxdy`
    pub curl_grad_u: Array2<Float>,
    /// `d2u/dxdx + d2u/dydy`
    pub div_grad_u: Array2<Float>,
}

impl Diagnostics {
    /// Computes both diagnostics of `u` on `grid`. Fails with `GridTooSmall`
    /// before any differencing if an axis has less than three points.
    pub fn compute(grid: &RectilinearGrid, u: ArrayView2<f32>) -> Result<Diagnostics> {
        let gs = grid.size();
        gs.check_second_order()?;

        if u.dim() != gs.shape() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "grid has shape {:?}, field has shape {:?}",
                gs.shape(),
                u.dim()
            )));
        }

        let stencils = GridStencils::new(grid)?;
        let u = u.mapv(Float::from);

        let first = Gradient::of(&stencils, u.view())?;
        let second = SecondDerivatives::of(&stencils, &first)?;

        debug!("Evaluated second derivatives on {}x{} grid", gs.rows, gs.columns);

        Ok(Diagnostics::from_derivatives(&second))
    }

    pub fn from_derivatives(d: &SecondDerivatives) -> Diagnostics {
        Diagnostics {
            curl_grad_u: &d.d2_dydx - &d.d2_dxdy,
            div_grad_u: &d.d2_dxdx + &d.d2_dydy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FieldDump;
    use crate::test_helper::{assert_fields_close, TOL};
    use ndarray::{arr1, Array, Array1};

    fn linspace(a: f32, b: f32, n: usize) -> Array1<f32> {
        Array::linspace(a, b, n)
    }

    #[test]
    fn laplacian_of_paraboloid() {
        // quarter steps keep u exact in single precision
        let d = FieldDump::from_fn(
            linspace(-1., 1., 9).view(),
            linspace(0., 1.5, 7).view(),
            |x, y| x * x + y * y,
        );

        let diag = Diagnostics::compute(&d.grid, d.u.view()).unwrap();

        let four = Array2::from_elem(d.u.dim(), 4.);
        assert_fields_close(diag.div_grad_u.view(), four.view(), 1e-9);
    }

    #[test]
    fn laplacian_on_uneven_grid() {
        // u = x^2 y^2, the stencils are exact for it
        let d = FieldDump::from_fn(
            arr1(&[0., 1., 3.]).view(),
            arr1(&[0., 2., 5.]).view(),
            |x, y| x * x * y * y,
        );

        let diag = Diagnostics::compute(&d.grid, d.u.view()).unwrap();

        let expected = Array2::from_shape_fn((3, 3), |(j, i)| {
            let x = [0., 1., 3.][i];
            let y = [0., 2., 5.][j];
            2. * x * x + 2. * y * y
        });
        assert_fields_close(diag.div_grad_u.view(), expected.view(), TOL);
    }

    #[test]
    fn mixed_partials_agree() {
        let d = FieldDump::from_fn(
            linspace(0., 3., 31).view(),
            arr1(&[0., 0.1, 0.3, 0.35, 0.8, 1.2, 2.]).view(),
            |x, y| (x * y).sin() + (2. * x).cos() * y.exp(),
        );

        let diag = Diagnostics::compute(&d.grid, d.u.view()).unwrap();

        let scale = d.u.iter().fold(0., |m: Float, v| m.max(Float::from(v.abs())));
        let max_curl = diag.curl_grad_u.iter().fold(0., |m: Float, v| m.max(v.abs()));

        assert!(max_curl < 1e-5 * scale, "|curl| = {}, |u| = {}", max_curl, scale);
    }

    #[test]
    fn shapes_are_preserved() {
        let d = FieldDump::from_fn(
            linspace(0., 1., 4).view(),
            linspace(0., 1., 6).view(),
            |x, y| x - y,
        );

        let diag = Diagnostics::compute(&d.grid, d.u.view()).unwrap();
        assert_eq!(diag.curl_grad_u.dim(), (6, 4));
        assert_eq!(diag.div_grad_u.dim(), (6, 4));
    }

    #[test]
    fn rejects_small_grid_before_differencing() {
        let d = FieldDump::from_fn(
            linspace(0., 1., 2).view(),
            linspace(0., 1., 2).view(),
            |x, y| x * y,
        );

        match Diagnostics::compute(&d.grid, d.u.view()) {
            Err(Error(ErrorKind::GridTooSmall(2, 2), _)) => {}
            other => panic!("expected GridTooSmall, got {:?}", other),
        }
    }

    #[test]
    fn rejects_mismatching_field() {
        let d = FieldDump::from_fn(
            linspace(0., 1., 3).view(),
            linspace(0., 1., 3).view(),
            |x, y| x * y,
        );
        let u: Array2<f32> = Array2::zeros((3, 4));

        assert!(Diagnostics::compute(&d.grid, u.view()).is_err());
    }
}
