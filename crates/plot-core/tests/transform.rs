// File: crates/plot-core/tests/transform.rs
// Purpose: Axis transform behavior across the axis variants.

use plot_core::axis::tick::{date_time_to_value, value_to_date_time};
use plot_core::{Axis, AxisPosition, Rect};

use chrono::{TimeZone, Utc};

fn area() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 400.0)
}

fn prepared(mut axis: Axis) -> Axis {
    axis.update_actual_max_min();
    axis.update_transform(area());
    axis.update_intervals(area());
    axis
}

#[test]
fn horizontal_axis_maps_range_onto_plot_width() {
    let a = prepared(Axis::linear(AxisPosition::Bottom).with_range(0.0, 100.0));
    assert!((a.transform(0.0) - 0.0).abs() < 1e-9);
    assert!((a.transform(100.0) - 400.0).abs() < 1e-9);
    assert!((a.transform(25.0) - 100.0).abs() < 1e-9);
}

#[test]
fn vertical_axis_is_flipped() {
    let a = prepared(Axis::linear(AxisPosition::Left).with_range(0.0, 100.0));
    assert!((a.transform(0.0) - 400.0).abs() < 1e-9);
    assert!((a.transform(100.0) - 0.0).abs() < 1e-9);
}

#[test]
fn log_axis_spaces_decades_evenly() {
    let a = prepared(Axis::logarithmic(AxisPosition::Bottom).with_range(1.0, 1000.0));
    let d1 = a.transform(10.0) - a.transform(1.0);
    let d2 = a.transform(100.0) - a.transform(10.0);
    let d3 = a.transform(1000.0) - a.transform(100.0);
    assert!((d1 - d2).abs() < 1e-9);
    assert!((d2 - d3).abs() < 1e-9);
    // and transform/inverse stay exact inverses in log space
    for v in [1.0, 3.0, 99.0, 1000.0] {
        assert!((a.inverse_transform(a.transform(v)) - v).abs() / v < 1e-9);
    }
}

#[test]
fn log_axis_ignores_non_positive_data() {
    let mut a = Axis::logarithmic(AxisPosition::Left);
    a.include(-5.0);
    a.include(0.0);
    a.include(10.0);
    a.include(1000.0);
    a.update_actual_max_min();
    assert!(a.actual_minimum > 0.0);
    assert!(a.actual_maximum >= 1000.0);
}

#[test]
fn date_time_axis_round_trips_chrono_timestamps() {
    let t = Utc.with_ymd_and_hms(2023, 7, 14, 9, 30, 0).unwrap();
    let v = date_time_to_value(t);
    assert_eq!(value_to_date_time(v).unwrap(), t);

    let t0 = Utc.with_ymd_and_hms(2023, 7, 14, 0, 0, 0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2023, 7, 15, 0, 0, 0).unwrap();
    let a = prepared(
        Axis::date_time(AxisPosition::Bottom)
            .with_range(date_time_to_value(t0), date_time_to_value(t1)),
    );
    let ticks = a.major_tick_values();
    assert!(ticks.len() >= 4 && ticks.len() <= 13, "got {} ticks", ticks.len());
    // hour-aligned labels
    let label = a.format_value(ticks[0]);
    assert!(label.ends_with(":00"), "label {label}");
}

#[test]
fn category_axis_spans_half_a_unit_beyond_the_ends() {
    let a = prepared(Axis::category(AxisPosition::Bottom, vec!["a", "b", "c"]));
    assert_eq!(a.actual_minimum, -0.5);
    assert_eq!(a.actual_maximum, 2.5);
    assert_eq!(a.format_value(1.0), "b");
    assert_eq!(a.format_value(5.0), "");
}

#[test]
fn minor_ticks_exclude_major_positions() {
    let a = prepared(Axis::linear(AxisPosition::Bottom).with_range(0.0, 10.0));
    let majors = a.major_tick_values();
    let minors = a.minor_tick_values();
    for m in &minors {
        assert!(
            majors.iter().all(|mj| (mj - m).abs() > 1e-9),
            "minor {m} collides with a major"
        );
    }
}

#[test]
fn minimum_range_widens_around_the_midpoint() {
    let mut a = Axis::linear(AxisPosition::Left);
    a.minimum_range = 10.0;
    a.include(4.9);
    a.include(5.1);
    a.update_actual_max_min();
    assert!(a.actual_maximum - a.actual_minimum >= 10.0 - 1e-9);
    let mid = 0.5 * (a.actual_minimum + a.actual_maximum);
    assert!((mid - 5.0).abs() < 0.2);
}

#[test]
fn polar_pair_maps_angle_and_magnitude_to_screen() {
    let mut angle = Axis::angle();
    let mut magnitude = Axis::magnitude();
    magnitude.minimum = 0.0;
    magnitude.maximum = 1.0;
    angle.update_actual_max_min();
    magnitude.update_actual_max_min();
    angle.update_transform(area());
    magnitude.update_transform(area());

    // angle 0, full magnitude: straight to the right of center
    let p = plot_core::axis::transform_point(0.0, 1.0, &angle, &magnitude);
    assert!((p.x - 400.0).abs() < 1e-9);
    assert!((p.y - 200.0).abs() < 1e-9);

    // angle 90 degrees: straight up (screen y decreases)
    let p = plot_core::axis::transform_point(90.0, 1.0, &angle, &magnitude);
    assert!((p.x - 200.0).abs() < 1e-6);
    assert!((p.y - 0.0).abs() < 1e-6);
}
