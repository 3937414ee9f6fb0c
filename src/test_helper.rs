use crate::Float;
use ndarray::ArrayView2;
use std::path::PathBuf;

/// Tolerance for results that are exact up to rounding, in the working
/// precision.
pub const TOL: Float = 1e4 * Float::EPSILON;

/// Relative comparison, exact zero only matches values below `EPSILON`.
pub fn equal_floats(a: Float, b: Float) -> bool {
    equal_floats_tol(a, b, Float::EPSILON)
}

pub fn equal_floats_tol(a: Float, b: Float, tol: Float) -> bool {
    if a == 0. && b == 0. {
        return true;
    }

    let diff = (a - b).abs();

    if a == 0. || b == 0. {
        return diff < tol;
    }

    diff / (a.abs() + b.abs()).min(Float::MAX) < tol
}

/// Asserts element wise agreement of two fields, reporting the first index
/// that differs.
pub fn assert_fields_close(actual: ArrayView2<Float>, expected: ArrayView2<Float>, tol: Float) {
    assert_eq!(actual.dim(), expected.dim());

    for ((i, a), b) in actual.indexed_iter().zip(expected.iter()) {
        assert!(
            equal_floats_tol(*a, *b, tol),
            "expected {}, got {} at index {:?}",
            b,
            a,
            i
        );
    }
}

/// Path in the system temp directory, unique per test process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "fielddiagnostics-{}-{}",
        std::process::id(),
        name
    ))
}
