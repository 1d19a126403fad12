// File: crates/plot-core/tests/model.rs
// Purpose: End-to-end update/render pipeline and hit testing through the model.

mod common;

use common::RecordingContext;
use plot_core::{
    Annotation, AxisPosition, Color, DataPoint, LineAnnotation, LineSeries, PlotModel,
    PlotType, ScatterSeries, ScreenPoint, ScreenVector, TextAnnotation,
};

const W: f64 = 400.0;
const H: f64 = 300.0;

fn line(points: Vec<(f64, f64)>) -> LineSeries {
    LineSeries::with_points(points.into_iter().map(|(x, y)| DataPoint::new(x, y)).collect())
}

#[test]
fn render_draws_title_legend_and_series() {
    let mut m = PlotModel::new().with_title("Measurements");
    m.add_series(line(vec![(0.0, 0.0), (1.0, 1.0)]).with_title("run 1"));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let texts = rc.texts();
    assert!(texts.contains(&"Measurements"));
    assert!(texts.contains(&"run 1"));
    assert!(rc.line_count() > 0);
}

#[test]
fn series_polyline_stays_inside_the_plot_area() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    let mut s = line(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)]);
    s.color = Some(Color::INDIGO);
    m.add_series(s);
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let area = m.plot_area();
    for op in &rc.ops {
        if let common::Op::Line { points, stroke } = op {
            if *stroke == Color::INDIGO {
                for p in points {
                    assert!(
                        p.x >= area.left - 1e-6 && p.x <= area.right() + 1e-6,
                        "point {p:?} outside {area:?}"
                    );
                    assert!(p.y >= area.top - 1e-6 && p.y <= area.bottom() + 1e-6);
                }
            }
        }
    }
}

#[test]
fn undefined_point_splits_the_polyline() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    let mut s = LineSeries::with_points(vec![
        DataPoint::new(0.0, 0.0),
        DataPoint::new(1.0, 1.0),
        DataPoint::UNDEFINED,
        DataPoint::new(2.0, 0.0),
        DataPoint::new(3.0, 1.0),
    ]);
    s.color = Some(Color::INDIGO);
    m.add_series(s);
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let strokes = rc
        .ops
        .iter()
        .filter(|op| matches!(op, common::Op::Line { stroke, .. } if *stroke == Color::INDIGO))
        .count();
    assert_eq!(strokes, 2);
}

#[test]
fn hit_test_prefers_the_topmost_series_on_a_tie() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    // identical series: both pass through the same screen points
    m.add_series(line(vec![(0.0, 0.0), (10.0, 10.0)]));
    m.add_series(line(vec![(0.0, 0.0), (10.0, 10.0)]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let area = m.plot_area();
    let probe = ScreenPoint::new(area.left + area.width * 0.5, area.top + area.height * 0.5);
    let (index, _) = m.get_series_from_point(probe, 20.0).unwrap();
    assert_eq!(index, 1, "the series drawn last wins the tie");
}

#[test]
fn hit_test_respects_the_distance_limit() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    m.add_series(line(vec![(0.0, 0.0), (10.0, 0.0)]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let area = m.plot_area();
    // the line sits on the bottom edge of the data range; probe the top
    let probe = ScreenPoint::new(area.left + area.width * 0.5, area.top + 1.0);
    assert!(m.get_series_from_point(probe, 5.0).is_none());
    assert!(m.get_series_from_point(probe, 10_000.0).is_some());
}

#[test]
fn pan_then_lightweight_update_keeps_series_data() {
    let mut m = PlotModel::new();
    m.add_series(line(vec![(0.0, 0.0), (10.0, 10.0)]));
    m.update(true).unwrap();
    let before = m.axes[0].actual_minimum;
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    m.axes[0].zoom(2.0, 4.0);
    m.update(false).unwrap();
    assert_eq!(m.axes[0].actual_minimum, 2.0);
    assert_eq!(m.axes[0].actual_maximum, 4.0);

    // a drag to the right moves the visible window left
    m.render(&mut rc, W, H).unwrap();
    let span = m.axes[0].actual_maximum - m.axes[0].actual_minimum;
    m.pan(ScreenVector::new(40.0, 0.0));
    m.update(false).unwrap();
    assert!(m.axes[0].actual_minimum < 2.0);
    let panned_span = m.axes[0].actual_maximum - m.axes[0].actual_minimum;
    assert!((panned_span - span).abs() < 1e-9);

    m.axes[0].reset();
    m.update(false).unwrap();
    assert_eq!(m.axes[0].actual_minimum, before);
}

#[test]
fn annotations_render_on_top_of_default_axes() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    m.add_series(line(vec![(0.0, 0.0), (10.0, 10.0)]));
    m.add_annotation(Annotation::Line(LineAnnotation::horizontal(5.0).with_text("limit")));
    m.add_annotation(Annotation::Text(TextAnnotation::new(
        DataPoint::new(5.0, 5.0),
        "midpoint",
    )));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let texts = rc.texts();
    assert!(texts.contains(&"limit"));
    assert!(texts.contains(&"midpoint"));
}

#[test]
fn cartesian_plots_equalize_axis_scales() {
    let mut m = PlotModel::new();
    m.plot_type = PlotType::Cartesian;
    m.is_legend_visible = false;
    // x spans 100, y spans 1: wildly different scales before enforcement
    m.add_series(line(vec![(0.0, 0.0), (100.0, 1.0)]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let sx = m.axes[0].scale().abs();
    let sy = m.axes[1].scale().abs();
    assert!(
        (sx - sy).abs() / sx < 1e-9,
        "scales differ: {sx} vs {sy}"
    );
}

#[test]
fn polar_model_synthesizes_angle_and_magnitude_axes() {
    let mut m = PlotModel::new();
    m.plot_type = PlotType::Polar;
    m.is_legend_visible = false;
    // spiral: magnitude grows with angle
    m.add_series(LineSeries::from_function(|t| t / 360.0, 0.0, 360.0, 100));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    assert!(m.axes.iter().any(|a| a.position == AxisPosition::Angle));
    assert!(m.axes.iter().any(|a| a.position == AxisPosition::Magnitude));
}

#[test]
fn get_axes_from_point_distinguishes_regions() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    m.add_series(line(vec![(0.0, 0.0), (1.0, 1.0)]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let area = m.plot_area();

    let inside = ScreenPoint::new(area.left + 10.0, area.top + 10.0);
    assert_eq!(m.get_axes_from_point(inside), (Some(0), Some(1)));

    let below = ScreenPoint::new(area.left + 10.0, area.bottom() + 5.0);
    assert_eq!(m.get_axes_from_point(below), (Some(0), None));

    let left_of = ScreenPoint::new(area.left - 5.0, area.top + 10.0);
    assert_eq!(m.get_axes_from_point(left_of), (None, Some(1)));
}

#[test]
fn tiny_canvases_keep_a_non_empty_plot_area() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    m.add_series(line(vec![(0.0, 0.0), (1.0, 1.0)]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, 40.0, 40.0).unwrap();
    let area = m.plot_area();
    assert!(area.width > 0.0, "plot width {}", area.width);
    assert!(area.height > 0.0, "plot height {}", area.height);
}

#[test]
fn scatter_markers_render_one_ellipse_per_point() {
    let mut m = PlotModel::new();
    m.is_legend_visible = false;
    m.add_series(ScatterSeries::with_points(vec![
        DataPoint::new(1.0, 1.0),
        DataPoint::new(2.0, 2.0),
        DataPoint::new(3.0, 3.0),
    ]));
    let mut rc = RecordingContext::new();
    m.render(&mut rc, W, H).unwrap();
    let ellipses = rc
        .ops
        .iter()
        .filter(|op| matches!(op, common::Op::Ellipse { .. }))
        .count();
    assert_eq!(ellipses, 3);
}
