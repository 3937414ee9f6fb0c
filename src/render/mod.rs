//! Presentation of computed fields as filled contour plots.
//!
//! Nothing in here draws. A `ContourPlot` carries everything a charting
//! backend needs, the arrays, contour levels, labels, axis limits and an
//! explicit `PlotStyle`, and is handed to a `ContourSink`.

pub mod figure_file;
pub mod style;

pub use self::figure_file::{read_figure_file, FigureDocument, FigureFile};
pub use self::style::PlotStyle;

use crate::errors::*;
use crate::mesh::{AxisLimits, RectilinearGrid};
use crate::Float;
use ndarray::{Array2, ArrayView2};

/// How `curl(grad(u))` is shown. Its values are tiny and of both signs, so by
/// default the decimal exponent of the magnitude is plotted instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurlScale {
    Linear,
    Log10Magnitude,
}

/// One filled contour figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPlot {
    /// Short identifier, e.g. for file names.
    pub name: String,
    pub x: Array2<f32>,
    pub y: Array2<f32>,
    pub field: Array2<Float>,
    /// Boundaries of the filled bands, ascending.
    pub levels: Vec<Float>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub limits: AxisLimits,
    pub style: PlotStyle,
}

impl ContourPlot {
    /// Plot of `field` on `grid` with `levels` filled bands.
    pub fn new(
        name: &str,
        grid: &RectilinearGrid,
        field: Array2<Float>,
        levels: usize,
        style: &PlotStyle,
    ) -> Result<ContourPlot> {
        if field.dim() != grid.size().shape() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "plot '{}' has field of shape {:?} on grid of shape {:?}",
                name,
                field.dim(),
                grid.size().shape()
            )));
        }

        let limits = grid
            .limits()
            .ok_or_else(|| format!("Cannot plot '{}' on an empty grid.", name))?;

        Ok(ContourPlot {
            name: name.to_string(),
            x: grid.x().clone(),
            y: grid.y().clone(),
            levels: contour_levels(field.view(), levels),
            field,
            title: None,
            xlabel: None,
            ylabel: None,
            limits,
            style: style.clone(),
        })
    }

    pub fn with_title(mut self, title: &str) -> ContourPlot {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_labels(mut self, xlabel: &str, ylabel: &str) -> ContourPlot {
        self.xlabel = Some(xlabel.to_string());
        self.ylabel = Some(ylabel.to_string());
        self
    }
}

/// Consumer of contour plots, e.g. a charting backend or a file.
pub trait ContourSink {
    fn plot(&mut self, plot: ContourPlot) -> Result<()>;

    /// Called once after the last plot.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ContourSink for Vec<ContourPlot> {
    fn plot(&mut self, plot: ContourPlot) -> Result<()> {
        self.push(plot);
        Ok(())
    }
}

/// Returns `n + 1` evenly spaced boundaries of `n` filled bands covering the
/// finite values of `field`. A constant field yields its single value, a
/// field without finite values no levels at all.
pub fn contour_levels(field: ArrayView2<Float>, n: usize) -> Vec<Float> {
    let mut finite = field.iter().cloned().filter(|v| v.is_finite());

    let first = match finite.next() {
        Some(v) => v,
        None => return Vec::new(),
    };

    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if n == 0 || min == max {
        return vec![min];
    }

    let step = (max - min) / n as Float;
    let mut levels: Vec<Float> = (0..n).map(|k| min + k as Float * step).collect();
    levels.push(max);

    levels
}

/// `log10(|v|)`, with exact zeros masked as NaN.
pub fn log10_magnitude(field: ArrayView2<Float>) -> Array2<Float> {
    field.mapv(|v| if v == 0. { Float::NAN } else { v.abs().log10() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn levels_span_finite_range() {
        let f: Array2<Float> = arr2(&[[0., 1., Float::NAN], [4., 2., Float::NEG_INFINITY]]);
        assert_eq!(contour_levels(f.view(), 4), vec![0., 1., 2., 3., 4.]);
    }

    #[test]
    fn levels_of_degenerate_fields() {
        let c: Array2<Float> = Array2::from_elem((3, 3), 2.5);
        assert_eq!(contour_levels(c.view(), 10), vec![2.5]);

        let nan: Array2<Float> = Array2::from_elem((2, 2), Float::NAN);
        assert!(contour_levels(nan.view(), 10).is_empty());
    }

    #[test]
    fn log10_masks_zeros() {
        let f: Array2<Float> = arr2(&[[0., -100.], [1e-3, 1.]]);
        let l = log10_magnitude(f.view());

        assert!(l[[0, 0]].is_nan());
        assert!((l[[0, 1]] - 2.).abs() < 1e-12);
        assert!((l[[1, 0]] + 3.).abs() < 1e-12);
        assert_eq!(l[[1, 1]], 0.);
    }

    #[test]
    fn plot_takes_limits_from_grid() {
        let grid = RectilinearGrid::from_axes(arr1(&[1., 2., 4.]).view(), arr1(&[-1., 0.]).view());
        let field: Array2<Float> = arr2(&[[0., 1., 2.], [3., 4., 5.]]);

        let p = ContourPlot::new("u", &grid, field, 5, &PlotStyle::default())
            .unwrap()
            .with_title("u [-]")
            .with_labels("x [-]", "y [-]");

        assert_eq!(p.limits.x, (1., 4.));
        assert_eq!(p.limits.y, (-1., 0.));
        assert_eq!(p.levels.len(), 6);
        assert_eq!(p.title.as_ref().map(|s| s.as_str()), Some("u [-]"));
        assert_eq!(p.xlabel.as_ref().map(|s| s.as_str()), Some("x [-]"));
    }

    #[test]
    fn plot_rejects_foreign_field() {
        let grid = RectilinearGrid::from_axes(arr1(&[1., 2., 4.]).view(), arr1(&[-1., 0.]).view());
        let field: Array2<Float> = Array2::zeros((3, 2));

        assert!(ContourPlot::new("u", &grid, field, 5, &PlotStyle::default()).is_err());
    }

    #[test]
    fn vec_collects_plots() {
        let grid = RectilinearGrid::from_axes(arr1(&[0., 1.]).view(), arr1(&[0., 1.]).view());
        let mut sink: Vec<ContourPlot> = Vec::new();

        for name in &["a", "b"] {
            let p = ContourPlot::new(name, &grid, Array2::zeros((2, 2)), 3, &PlotStyle::default());
            sink.plot(p.unwrap()).unwrap();
        }
        sink.finish().unwrap();

        let names: Vec<&str> = sink.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
