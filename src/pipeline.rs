//! One pass over a dump: read, differentiate, hand plots to a sink.

#[cfg(test)]
#[path = "./pipeline_test.rs"]
mod pipeline_test;

use crate::errors::*;
use crate::io::read_dump;
use crate::mesh::{FieldDump, GridSize};
use crate::render::{log10_magnitude, ContourPlot, ContourSink, CurlScale};
use crate::settings::{PlotSettings, Settings};
use crate::vector_analysis::{Diagnostics, FieldSummary};
use crate::Float;
use std::path::Path;

const XLABEL: &str = "x [-]";
const YLABEL: &str = "y [-]";

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub size: GridSize,
    pub curl: Option<FieldSummary>,
    pub divergence: Option<FieldSummary>,
}

/// Reads the dump at `input` and runs `analyse` on it.
pub fn run<S: ContourSink + ?Sized>(input: &Path, settings: &Settings, sink: &mut S) -> Result<Report> {
    info!("Reading dump '{}'", input.display());
    let dump = read_dump(input)?;

    analyse(&dump, settings, sink)
}

/// Computes the diagnostics of `dump` and hands the solution, curl and
/// divergence plots to `sink`, in that order. Nothing reaches the sink if the
/// diagnostics cannot be computed.
pub fn analyse<S: ContourSink + ?Sized>(
    dump: &FieldDump,
    settings: &Settings,
    sink: &mut S,
) -> Result<Report> {
    let gs = dump.size();
    info!("Grid has {} rows (jmax) and {} columns (imax)", gs.rows, gs.columns);

    if !dump.grid.is_rectilinear() {
        warn!("Grid is not rectilinear, derivatives use x[0, :] and y[:, 0] only");
    }

    let diag = Diagnostics::compute(&dump.grid, dump.u.view())?;

    let curl = FieldSummary::of(diag.curl_grad_u.view());
    let divergence = FieldSummary::of(diag.div_grad_u.view());
    log_summary("curl(grad(u))", &curl);
    log_summary("div(grad(u))", &divergence);

    for plot in contour_plots(dump, &diag, &settings.plot)? {
        sink.plot(plot)?;
    }
    sink.finish()?;

    Ok(Report {
        size: gs,
        curl,
        divergence,
    })
}

fn log_summary(name: &str, s: &Option<FieldSummary>) {
    match *s {
        Some(ref s) => {
            info!("{}: min = {:e}, max = {:e}, max |.| = {:e}", name, s.min, s.max, s.max_abs);
            if s.non_finite > 0 {
                warn!("{}: {} values are NaN or infinite", name, s.non_finite);
            }
        }
        None => warn!("{}: no finite values", name),
    }
}

/// Builds the three figures of a run, the solution `u`, the curl of its
/// gradient and the negated divergence of its gradient, i.e. the source term.
pub fn contour_plots(
    dump: &FieldDump,
    diag: &Diagnostics,
    plot: &PlotSettings,
) -> Result<Vec<ContourPlot>> {
    let grid = &dump.grid;
    let style = &plot.style;

    let solution = ContourPlot::new("u", grid, dump.u.mapv(Float::from), plot.levels, style)?
        .with_title("u [-]")
        .with_labels(XLABEL, YLABEL);

    let curl = match plot.curl_scale {
        CurlScale::Log10Magnitude => ContourPlot::new(
            "curl_grad_u",
            grid,
            log10_magnitude(diag.curl_grad_u.view()),
            plot.levels,
            style,
        )?
        .with_title("log10 |curl(grad(u))| [-]"),
        CurlScale::Linear => ContourPlot::new(
            "curl_grad_u",
            grid,
            diag.curl_grad_u.clone(),
            plot.levels,
            style,
        )?
        .with_title("curl(grad(u)) [-]"),
    };

    let divergence = ContourPlot::new(
        "div_grad_u",
        grid,
        diag.div_grad_u.mapv(|v| -v),
        plot.levels,
        style,
    )?
    .with_title("-div(grad(u)) [-]")
    .with_labels(XLABEL, YLABEL);

    Ok(vec![solution, curl.with_labels(XLABEL, YLABEL), divergence])
}
