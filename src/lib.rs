//! Post-processing of the binary field dumps written by the finite difference
//! Poisson solver. A dump holds a structured grid and the solution `u` on it.
//! This crate reads it back, evaluates second order gradients on the
//! (possibly non-uniform) grid and derives two consistency checks from them,
//! `curl(grad(u))`, which has to vanish, and `div(grad(u))`, which has to
//! reproduce the source term. The results are handed to a contour plot sink.

#![recursion_limit = "1024"]

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[macro_use]
extern crate ndarray;
#[macro_use]
extern crate serde_derive;

pub mod consts;
pub mod io;
pub mod mesh;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod vector_analysis;

#[cfg(test)]
mod test_helper;

pub use crate::mesh::{FieldDump, GridAxis, GridSize, RectilinearGrid};

/// Precision in which derivatives are evaluated. Dumps are always stored in
/// single precision.
#[cfg(feature = "single")]
pub type Float = f32;
#[cfg(not(feature = "single"))]
pub type Float = f64;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
        }

        errors {
            MalformedDump(expected: u64, actual: u64) {
                description("malformed field dump")
                display("malformed field dump: expected {} bytes, found {}", expected, actual)
            }
            GridTooSmall(rows: usize, columns: usize) {
                description("grid too small for second order differencing")
                display(
                    "grid of {}x{} points is too small, second order differencing needs at least {} points per axis",
                    rows,
                    columns,
                    crate::consts::MIN_POINTS_PER_AXIS
                )
            }
            ShapeMismatch(msg: String) {
                description("array shapes do not match")
                display("array shapes do not match: {}", msg)
            }
        }
    }
}
