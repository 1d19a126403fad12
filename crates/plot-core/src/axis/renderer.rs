// File: crates/plot-core/src/axis/renderer.rs
// Summary: Draws one axis (grid, ticks, labels, title) through the render context.

use super::{Axis, AxisPosition};
use crate::geometry::{Rect, ScreenPoint};
use crate::render::RenderContext;
use crate::types::{Color, Font, FontWeight, HorizontalAlign, LineJoin, LineStyle, VerticalAlign};

const LABEL_GAP: f64 = 4.0;
const TITLE_GAP: f64 = 6.0;

/// Margin (in px) this axis needs outside the plot area for its ticks,
/// labels and title. Used by the model's margin-adjustment pass.
pub(crate) fn required_margin(
    rc: &dyn RenderContext,
    axis: &Axis,
    font_family: &str,
    ticks: &[f64],
) -> f64 {
    if !axis.is_xy_axis() {
        return 0.0;
    }
    let font = Font::new(font_family, axis.font_size, FontWeight::Normal);
    let mut label_extent: f64 = 0.0;
    for &t in ticks {
        let size = rc.measure_text(&axis.format_value(t), &font);
        let e = if axis.is_horizontal() { size.height } else { size.width };
        label_extent = label_extent.max(e);
    }
    let title_extent = if axis.title.is_some() {
        font.size + TITLE_GAP
    } else {
        0.0
    };
    axis.tick_length + LABEL_GAP + label_extent + title_extent + LABEL_GAP
}

/// Renders grid lines, the axis line, major/minor ticks, tick labels and
/// the axis title. Polar axes draw no cartesian furniture.
pub(crate) fn render_axis(
    rc: &mut dyn RenderContext,
    axis: &Axis,
    plot_area: Rect,
    font_family: &str,
    text_color: Color,
) {
    if !axis.is_xy_axis() {
        return;
    }

    let majors = axis.major_tick_values();
    let minors = axis.minor_tick_values();

    // grid lines, minors beneath majors
    draw_gridlines(rc, axis, plot_area, &minors, axis.minor_gridline_style, axis.minor_gridline_color);
    draw_gridlines(rc, axis, plot_area, &majors, axis.major_gridline_style, axis.major_gridline_color);

    // axis line along the plot edge
    let (a, b) = edge_line(axis, plot_area);
    rc.draw_line(&[a, b], axis.axis_line_color, 1.0, None, LineJoin::Miter, true);

    let font = Font::new(font_family, axis.font_size, FontWeight::Normal);
    for &value in &majors {
        let s = axis.transform(value);
        let (tick_a, tick_b, label_pos, halign, valign) = tick_geometry(axis, plot_area, s);
        rc.draw_line(&[tick_a, tick_b], axis.axis_line_color, 1.0, None, LineJoin::Miter, true);
        rc.draw_text(label_pos, &axis.format_value(value), text_color, &font, 0.0, halign, valign);
    }

    if let Some(title) = &axis.title {
        draw_title(rc, axis, plot_area, title, font_family, text_color);
    }
}

fn draw_gridlines(
    rc: &mut dyn RenderContext,
    axis: &Axis,
    plot_area: Rect,
    values: &[f64],
    style: LineStyle,
    color: Color,
) {
    let Some(dash) = style_dash(style) else {
        return;
    };
    for &value in values {
        let s = axis.transform(value);
        let (a, b) = if axis.is_horizontal() {
            (
                ScreenPoint::new(s, plot_area.top),
                ScreenPoint::new(s, plot_area.bottom()),
            )
        } else {
            (
                ScreenPoint::new(plot_area.left, s),
                ScreenPoint::new(plot_area.right(), s),
            )
        };
        rc.draw_line(&[a, b], color, 1.0, dash, LineJoin::Miter, true);
    }
}

// Some(None) = solid stroke, None = do not draw.
fn style_dash(style: LineStyle) -> Option<Option<&'static [f64]>> {
    match style {
        LineStyle::None => None,
        s => Some(s.dash_array()),
    }
}

fn edge_line(axis: &Axis, area: Rect) -> (ScreenPoint, ScreenPoint) {
    match axis.position {
        AxisPosition::Bottom => (
            ScreenPoint::new(area.left, area.bottom()),
            ScreenPoint::new(area.right(), area.bottom()),
        ),
        AxisPosition::Top => (
            ScreenPoint::new(area.left, area.top),
            ScreenPoint::new(area.right(), area.top),
        ),
        AxisPosition::Left => (
            ScreenPoint::new(area.left, area.top),
            ScreenPoint::new(area.left, area.bottom()),
        ),
        _ => (
            ScreenPoint::new(area.right(), area.top),
            ScreenPoint::new(area.right(), area.bottom()),
        ),
    }
}

#[allow(clippy::type_complexity)]
fn tick_geometry(
    axis: &Axis,
    area: Rect,
    s: f64,
) -> (ScreenPoint, ScreenPoint, ScreenPoint, HorizontalAlign, VerticalAlign) {
    let t = axis.tick_length;
    match axis.position {
        AxisPosition::Bottom => (
            ScreenPoint::new(s, area.bottom()),
            ScreenPoint::new(s, area.bottom() + t),
            ScreenPoint::new(s, area.bottom() + t + LABEL_GAP),
            HorizontalAlign::Center,
            VerticalAlign::Top,
        ),
        AxisPosition::Top => (
            ScreenPoint::new(s, area.top),
            ScreenPoint::new(s, area.top - t),
            ScreenPoint::new(s, area.top - t - LABEL_GAP),
            HorizontalAlign::Center,
            VerticalAlign::Bottom,
        ),
        AxisPosition::Left => (
            ScreenPoint::new(area.left, s),
            ScreenPoint::new(area.left - t, s),
            ScreenPoint::new(area.left - t - LABEL_GAP, s),
            HorizontalAlign::Right,
            VerticalAlign::Middle,
        ),
        _ => (
            ScreenPoint::new(area.right(), s),
            ScreenPoint::new(area.right() + t, s),
            ScreenPoint::new(area.right() + t + LABEL_GAP, s),
            HorizontalAlign::Left,
            VerticalAlign::Middle,
        ),
    }
}

fn draw_title(
    rc: &mut dyn RenderContext,
    axis: &Axis,
    area: Rect,
    title: &str,
    font_family: &str,
    text_color: Color,
) {
    let font = Font::new(font_family, axis.font_size, FontWeight::Normal);
    let label_room = axis.tick_length + LABEL_GAP + font.size + LABEL_GAP;
    match axis.position {
        AxisPosition::Bottom => rc.draw_text(
            ScreenPoint::new(area.left + area.width * 0.5, area.bottom() + label_room + TITLE_GAP),
            title,
            text_color,
            &font,
            0.0,
            HorizontalAlign::Center,
            VerticalAlign::Top,
        ),
        AxisPosition::Top => rc.draw_text(
            ScreenPoint::new(area.left + area.width * 0.5, area.top - label_room - TITLE_GAP),
            title,
            text_color,
            &font,
            0.0,
            HorizontalAlign::Center,
            VerticalAlign::Bottom,
        ),
        AxisPosition::Left => rc.draw_text(
            ScreenPoint::new(area.left - label_room - TITLE_GAP * 2.0, area.top + area.height * 0.5),
            title,
            text_color,
            &font,
            -90.0,
            HorizontalAlign::Center,
            VerticalAlign::Bottom,
        ),
        AxisPosition::Right => rc.draw_text(
            ScreenPoint::new(area.right() + label_room + TITLE_GAP * 2.0, area.top + area.height * 0.5),
            title,
            text_color,
            &font,
            90.0,
            HorizontalAlign::Center,
            VerticalAlign::Bottom,
        ),
        _ => {}
    }
}
