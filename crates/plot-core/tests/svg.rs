// File: crates/plot-core/tests/svg.rs
// Purpose: SVG export end to end: structure, primitives, prolog handling.

use plot_core::{
    Axis, AxisPosition, BarSeries, DataPoint, LineSeries, PlotModel, SvgExporter,
};

fn bar_chart() -> PlotModel {
    let mut m = PlotModel::new().with_title("Quarterly");
    m.add_axis(Axis::category(AxisPosition::Bottom, vec!["q1", "q2", "q3"]));
    m.add_axis(Axis::linear(AxisPosition::Left));
    m.add_series(BarSeries::with_values(vec![10.0, 20.0, 15.0]).with_title("sales"));
    m
}

#[test]
fn document_is_well_formed() {
    let svg = SvgExporter::export_to_string(&mut bar_chart(), 400.0, 300.0, true).unwrap();
    assert!(svg.starts_with("<?xml version=\"1.0\""));
    assert!(svg.contains("<svg width=\"400\" height=\"300\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    // every element is self-closing or closed; crude balance check
    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches("</svg>").count(), 1);
    assert_eq!(svg.matches("<text").count(), svg.matches("</text>").count());
}

#[test]
fn fragment_export_has_no_prolog() {
    let svg = SvgExporter::export_to_string(&mut bar_chart(), 400.0, 300.0, false).unwrap();
    assert!(svg.starts_with("<svg"));
}

#[test]
fn bar_chart_markup_contains_bars_labels_and_legend() {
    let svg = SvgExporter::export_to_string(&mut bar_chart(), 400.0, 300.0, true).unwrap();
    // three bars drawn as clipped polygons
    assert!(svg.matches("<polygon").count() >= 3);
    assert!(svg.contains(">q1</text>"));
    assert!(svg.contains(">q2</text>"));
    assert!(svg.contains(">Quarterly</text>"));
    assert!(svg.contains(">sales</text>"));
}

#[test]
fn line_chart_markup_contains_a_polyline_with_the_series_color() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    let mut s = LineSeries::with_points(vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1.0)]);
    s.color = Some(plot_core::Color::from_rgb(0x12, 0x34, 0x56));
    m.add_series(s);
    let svg = SvgExporter::export_to_string(&mut m, 400.0, 300.0, true).unwrap();
    assert!(svg.contains("stroke=\"#123456\""));
}

#[test]
fn export_writes_to_an_io_writer() {
    let mut buffer: Vec<u8> = Vec::new();
    SvgExporter::export(&mut bar_chart(), 200.0, 150.0, &mut buffer).unwrap();
    let svg = String::from_utf8(buffer).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("</svg>"));
}
