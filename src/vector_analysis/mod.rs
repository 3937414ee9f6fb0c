//! Finite difference vector analysis on rectilinear grids.

pub mod diagnostics;
pub mod gradient;
pub mod statistics;

pub use self::diagnostics::{Diagnostics, SecondDerivatives};
pub use self::gradient::{gradient_along, Gradient, GridStencils, Stencil};
pub use self::statistics::FieldSummary;
