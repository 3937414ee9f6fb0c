use crate::Float;
use ndarray::ArrayView2;

/// Range of the finite values of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub min: Float,
    pub max: Float,
    pub max_abs: Float,
    /// Number of NaN or infinite values, which are left out above.
    pub non_finite: usize,
}

impl FieldSummary {
    /// Returns `None` if the field holds no finite value.
    pub fn of(field: ArrayView2<Float>) -> Option<FieldSummary> {
        let mut finite = field.iter().cloned().filter(|v| v.is_finite()).peekable();
        let first = *finite.peek()?;

        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let non_finite = field.iter().filter(|v| !v.is_finite()).count();

        Some(FieldSummary {
            min,
            max,
            max_abs: min.abs().max(max.abs()),
            non_finite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn skips_non_finite_values() {
        let f: Array2<Float> = arr2(&[[1., -3., Float::NAN], [2., Float::INFINITY, 0.5]]);
        let s = FieldSummary::of(f.view()).unwrap();

        assert_eq!(s.min, -3.);
        assert_eq!(s.max, 2.);
        assert_eq!(s.max_abs, 3.);
        assert_eq!(s.non_finite, 2);
    }

    #[test]
    fn nothing_finite() {
        let f: Array2<Float> = arr2(&[[Float::NAN]]);
        assert_eq!(FieldSummary::of(f.view()), None);

        let empty: Array2<Float> = Array2::zeros((0, 4));
        assert_eq!(FieldSummary::of(empty.view()), None);
    }
}
