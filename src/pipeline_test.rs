use super::*;
use crate::io::write_dump;
use crate::render::{read_figure_file, FigureFile};
use crate::settings::OutputFormat;
use crate::test_helper::{assert_fields_close, temp_path};
use ndarray::{Array, Array1, Array2};

fn paraboloid() -> FieldDump {
    let x: Array1<f32> = Array::linspace(0., 2., 9);
    let y: Array1<f32> = Array::linspace(-1., 1., 5);
    FieldDump::from_fn(x.view(), y.view(), |x, y| x * x + y * y)
}

#[test]
fn emits_solution_curl_and_source() {
    let dump = paraboloid();
    let mut sink: Vec<ContourPlot> = Vec::new();

    let report = analyse(&dump, &Settings::default(), &mut sink).unwrap();

    let names: Vec<&str> = sink.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["u", "curl_grad_u", "div_grad_u"]);

    for p in &sink {
        assert_eq!(p.field.dim(), (5, 9));
        assert_eq!(p.x, *dump.grid.x());
        assert_eq!(p.y, *dump.grid.y());
        assert_eq!(p.limits.x, (0., 2.));
        assert_eq!(p.limits.y, (-1., 1.));
        assert_eq!(p.xlabel.as_ref().map(|s| s.as_str()), Some(XLABEL));
        assert_eq!(p.ylabel.as_ref().map(|s| s.as_str()), Some(YLABEL));
    }

    // the source term of u = x^2 + y^2 is -4
    let source: Array2<Float> = Array2::from_elem((5, 9), -4.);
    assert_fields_close(sink[2].field.view(), source.view(), 1e-9);

    assert_eq!(report.size, GridSize::new(5, 9));
    let div = report.divergence.unwrap();
    assert!((div.min - 4.).abs() < 1e-9 && (div.max - 4.).abs() < 1e-9);
    assert!(report.curl.map_or(true, |c| c.max_abs < 1e-9));
}

#[test]
fn curl_scale_is_a_presentation_choice() {
    let dump = paraboloid();
    let diag = Diagnostics::compute(&dump.grid, dump.u.view()).unwrap();

    let mut settings = Settings::default();
    settings.plot.curl_scale = CurlScale::Linear;
    let linear = contour_plots(&dump, &diag, &settings.plot).unwrap();
    assert_eq!(linear[1].field, diag.curl_grad_u);

    settings.plot.curl_scale = CurlScale::Log10Magnitude;
    let log = contour_plots(&dump, &diag, &settings.plot).unwrap();
    for (l, c) in log[1].field.iter().zip(diag.curl_grad_u.iter()) {
        if *c == 0. {
            assert!(l.is_nan());
        } else {
            assert_eq!(*l, c.abs().log10());
        }
    }
}

#[test]
fn levels_follow_settings() {
    let mut settings = Settings::default();
    settings.plot.levels = 4;

    let mut sink: Vec<ContourPlot> = Vec::new();
    analyse(&paraboloid(), &settings, &mut sink).unwrap();

    // u spans [0, 5]
    assert_eq!(sink[0].levels, vec![0., 1.25, 2.5, 3.75, 5.]);
}

#[test]
fn small_grid_produces_no_plots() {
    let x: Array1<f32> = Array::linspace(0., 1., 2);
    let y: Array1<f32> = Array::linspace(0., 1., 5);
    let dump = FieldDump::from_fn(x.view(), y.view(), |x, y| x * y);
    let mut sink: Vec<ContourPlot> = Vec::new();

    match analyse(&dump, &Settings::default(), &mut sink) {
        Err(Error(ErrorKind::GridTooSmall(5, 2), _)) => {}
        other => panic!("expected GridTooSmall, got {:?}", other),
    }
    assert!(sink.is_empty());
}

#[test]
fn dump_to_figure_file() {
    let input = temp_path("pipeline.bin");
    let output = temp_path("pipeline.cbor");
    write_dump(&input, &paraboloid()).unwrap();

    let mut settings = Settings::default();
    settings.output.format = OutputFormat::CBOR;
    settings.output.path = Some(output.clone());

    let mut sink = FigureFile::new(&settings.output.destination(), &input, &settings);
    run(&input, &settings, &mut sink).unwrap();

    let doc = read_figure_file(&output, OutputFormat::CBOR).unwrap();
    std::fs::remove_file(&input).unwrap();
    std::fs::remove_file(&output).unwrap();

    assert_eq!(doc.plots.len(), 3);
    assert_eq!(doc.source, input.display().to_string());
    assert_eq!(doc.settings, settings);
}

#[test]
fn missing_dump_leaves_no_output() {
    let input = temp_path("pipeline_missing.bin");
    let output = temp_path("pipeline_missing.msgpack");
    let settings = Settings::default();

    let mut sink = FigureFile::new(&output, &input, &settings);
    assert!(run(&input, &settings, &mut sink).is_err());
    assert!(!output.exists());
}
