// File: crates/plot-core/src/series/mod.rs
// Summary: Series variants and the operations the model dispatches over them.

pub mod bar;
pub mod contour;
pub mod line;
pub mod scatter;

pub use bar::{BarOrientation, BarSeries};
pub use contour::ContourSeries;
pub use line::LineSeries;
pub use scatter::{MarkerType, ScatterSeries};

use crate::axis::Axis;
use crate::error::Result;
use crate::geometry::{DataPoint, Rect, ScreenPoint};
use crate::render::RenderContext;

/// Result of a nearest-point (tracker) query.
#[derive(Clone, Debug)]
pub struct TrackerHit {
    /// Nearest point in data space.
    pub data_point: DataPoint,
    /// Nearest point in screen space.
    pub position: ScreenPoint,
    /// Formatted tracker text.
    pub text: String,
}

/// A renderable dataset bound to one or two axes.
///
/// A tagged enum instead of a class hierarchy: shared behavior is free
/// functions in this module, variant behavior lives with each variant.
pub enum Series {
    Line(LineSeries),
    Scatter(ScatterSeries),
    Bar(BarSeries),
    Contour(ContourSeries),
}

impl Series {
    pub fn title(&self) -> Option<&str> {
        match self {
            Series::Line(s) => s.title.as_deref(),
            Series::Scatter(s) => s.title.as_deref(),
            Series::Bar(s) => s.title.as_deref(),
            Series::Contour(s) => s.title.as_deref(),
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Series::Line(s) => s.is_visible,
            Series::Scatter(s) => s.is_visible,
            Series::Bar(s) => s.is_visible,
            Series::Contour(s) => s.is_visible,
        }
    }

    pub fn x_axis_index(&self) -> Option<usize> {
        match self {
            Series::Line(s) => s.x_axis,
            Series::Scatter(s) => s.x_axis,
            Series::Bar(s) => s.x_axis,
            Series::Contour(s) => s.x_axis,
        }
    }

    pub fn y_axis_index(&self) -> Option<usize> {
        match self {
            Series::Line(s) => s.y_axis,
            Series::Scatter(s) => s.y_axis,
            Series::Bar(s) => s.y_axis,
            Series::Contour(s) => s.y_axis,
        }
    }

    pub(crate) fn is_bar(&self) -> bool {
        matches!(self, Series::Bar(_))
    }

    /// Resolves axis bindings: by key when set, else the model defaults.
    pub(crate) fn ensure_axes(
        &mut self,
        axes: &[Axis],
        default_x: Option<usize>,
        default_y: Option<usize>,
    ) {
        let resolve = |key: &Option<String>, default: Option<usize>| -> Option<usize> {
            if let Some(k) = key {
                axes.iter().position(|a| a.key.as_deref() == Some(k)).or(default)
            } else {
                default
            }
        };
        match self {
            Series::Line(s) => {
                s.x_axis = resolve(&s.x_axis_key, default_x);
                s.y_axis = resolve(&s.y_axis_key, default_y);
            }
            Series::Scatter(s) => {
                s.x_axis = resolve(&s.x_axis_key, default_x);
                s.y_axis = resolve(&s.y_axis_key, default_y);
            }
            Series::Bar(s) => {
                s.x_axis = resolve(&s.x_axis_key, default_x);
                s.y_axis = resolve(&s.y_axis_key, default_y);
            }
            Series::Contour(s) => {
                s.x_axis = resolve(&s.x_axis_key, default_x);
                s.y_axis = resolve(&s.y_axis_key, default_y);
            }
        }
    }

    /// Re-projects values from an attached source closure, if any.
    pub(crate) fn update_data(&mut self) -> Result<()> {
        match self {
            Series::Line(s) => {
                s.update_data();
                Ok(())
            }
            Series::Scatter(s) => {
                s.update_data();
                Ok(())
            }
            Series::Bar(s) => {
                s.update_data();
                Ok(())
            }
            Series::Contour(s) => s.update_data(),
        }
    }

    /// Filters invalid points into the per-series valid buffer.
    pub(crate) fn update_valid_data(&mut self) {
        match self {
            Series::Line(s) => s.update_valid_data(),
            Series::Scatter(s) => s.update_valid_data(),
            Series::Bar(_) | Series::Contour(_) => {}
        }
    }

    /// Computes the series min/max; stacked bars also advance the category
    /// accumulators, so the model must call this in attachment order.
    pub(crate) fn update_max_min(&mut self, axes: &mut [Axis]) -> Result<()> {
        match self {
            Series::Line(s) => {
                s.update_max_min();
                Ok(())
            }
            Series::Scatter(s) => {
                s.update_max_min();
                Ok(())
            }
            Series::Bar(s) => s.update_max_min(axes),
            Series::Contour(s) => {
                s.update_max_min();
                Ok(())
            }
        }
    }

    /// Pushes the series min/max into its bound axes via `include`.
    pub(crate) fn update_axis_max_min(&mut self, axes: &mut [Axis]) {
        let (min_x, max_x, min_y, max_y) = match self {
            Series::Line(s) => (s.min_x, s.max_x, s.min_y, s.max_y),
            Series::Scatter(s) => (s.min_x, s.max_x, s.min_y, s.max_y),
            Series::Bar(s) => (s.min_x, s.max_x, s.min_y, s.max_y),
            Series::Contour(s) => (s.min_x, s.max_x, s.min_y, s.max_y),
        };
        if let Some(xi) = self.x_axis_index() {
            axes[xi].include(min_x);
            axes[xi].include(max_x);
        }
        if let Some(yi) = self.y_axis_index() {
            axes[yi].include(min_y);
            axes[yi].include(max_y);
        }
    }

    /// Renders the series into the plot area. Bar series also mutate their
    /// category axis render accumulator, in attachment order.
    pub(crate) fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        axes: &mut [Axis],
        plot_area: Rect,
    ) -> Result<()> {
        match self {
            Series::Line(s) => s.render(rc, axes, plot_area),
            Series::Scatter(s) => s.render(rc, axes, plot_area),
            Series::Bar(s) => s.render(rc, axes, plot_area),
            Series::Contour(s) => s.render(rc, axes, plot_area),
        }
    }

    /// Draws the legend symbol centered in `symbol_box`.
    pub(crate) fn render_legend_symbol(&self, rc: &mut dyn RenderContext, symbol_box: Rect) {
        match self {
            Series::Line(s) => s.render_legend_symbol(rc, symbol_box),
            Series::Scatter(s) => s.render_legend_symbol(rc, symbol_box),
            Series::Bar(s) => s.render_legend_symbol(rc, symbol_box),
            Series::Contour(s) => s.render_legend_symbol(rc, symbol_box),
        }
    }

    /// Nearest point to a screen position, for tracking/tooltips.
    pub fn get_nearest_point(
        &self,
        point: ScreenPoint,
        interpolate: bool,
        axes: &[Axis],
    ) -> Option<TrackerHit> {
        match self {
            Series::Line(s) => s.get_nearest_point(point, interpolate, axes),
            Series::Scatter(s) => s.get_nearest_point(point, axes),
            Series::Bar(s) => s.get_nearest_point(point, axes),
            Series::Contour(s) => s.get_nearest_point(point, interpolate, axes),
        }
    }
}

/// Nearest data point by screen distance. Returns (index, screen point,
/// squared distance).
pub(crate) fn nearest_vertex(
    points: &[DataPoint],
    target: ScreenPoint,
    x_axis: &Axis,
    y_axis: &Axis,
) -> Option<(usize, ScreenPoint, f64)> {
    let mut best: Option<(usize, ScreenPoint, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        if !p.is_defined() {
            continue;
        }
        let sp = crate::axis::transform_point(p.x, p.y, x_axis, y_axis);
        let d2 = sp.distance_to_squared(target);
        if best.map_or(true, |(_, _, bd)| d2 < bd) {
            best = Some((i, sp, d2));
        }
    }
    best
}

/// Nearest point on the polyline through `points`, interpolating along
/// segments. Returns (interpolated data point, screen point, squared distance).
pub(crate) fn nearest_on_segments(
    points: &[DataPoint],
    target: ScreenPoint,
    x_axis: &Axis,
    y_axis: &Axis,
) -> Option<(DataPoint, ScreenPoint, f64)> {
    let mut best: Option<(DataPoint, ScreenPoint, f64)> = None;
    for w in points.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        if !p1.is_defined() || !p2.is_defined() {
            continue;
        }
        let s1 = crate::axis::transform_point(p1.x, p1.y, x_axis, y_axis);
        let s2 = crate::axis::transform_point(p2.x, p2.y, x_axis, y_axis);
        let dx = s2.x - s1.x;
        let dy = s2.y - s1.y;
        let len2 = dx * dx + dy * dy;
        let u = if len2 < 1e-12 {
            0.0
        } else {
            (((target.x - s1.x) * dx + (target.y - s1.y) * dy) / len2).clamp(0.0, 1.0)
        };
        let sp = ScreenPoint::new(s1.x + u * dx, s1.y + u * dy);
        let d2 = sp.distance_to_squared(target);
        if best.map_or(true, |(_, _, bd)| d2 < bd) {
            let dp = DataPoint::new(p1.x + u * (p2.x - p1.x), p1.y + u * (p2.y - p1.y));
            best = Some((dp, sp, d2));
        }
    }
    best
}

/// Default tracker text for XY series.
pub(crate) fn xy_tracker_text(title: Option<&str>, p: DataPoint) -> String {
    match title {
        Some(t) => format!("{t}\nX: {}\nY: {}", p.x, p.y),
        None => format!("X: {}\nY: {}", p.x, p.y),
    }
}
