// File: crates/plot-core/src/series/line.rs
// Summary: Polyline series with gap support, function sampling and interpolating tracker.

use crate::axis::{transform_point, Axis};
use crate::error::Result;
use crate::geometry::{DataPoint, Rect, ScreenPoint};
use crate::render::{draw_clipped_line, RenderContext};
use crate::series::{nearest_on_segments, nearest_vertex, xy_tracker_text, TrackerHit};
use crate::types::{Color, LineJoin, LineStyle};

type PointSource = Box<dyn Fn() -> Vec<DataPoint> + Send>;

/// Connected line through a point list. A `DataPoint::UNDEFINED` entry
/// breaks the polyline into separate strokes.
pub struct LineSeries {
    pub title: Option<String>,
    pub is_visible: bool,
    pub x_axis_key: Option<String>,
    pub y_axis_key: Option<String>,
    pub(crate) x_axis: Option<usize>,
    pub(crate) y_axis: Option<usize>,

    pub points: Vec<DataPoint>,
    /// Re-evaluated into `points` on every update when set.
    source: Option<PointSource>,

    /// None means "assign from the model palette on update".
    pub color: Option<Color>,
    /// None means "assign the next style from the model cycle".
    pub line_style: Option<LineStyle>,
    pub stroke_thickness: f64,
    pub line_join: LineJoin,

    /// Tracker behavior: project onto segments instead of snapping to vertices.
    pub can_track_interpolated: bool,

    pub(crate) valid_points: Vec<DataPoint>,
    pub(crate) min_x: f64,
    pub(crate) max_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_y: f64,
}

impl Default for LineSeries {
    fn default() -> Self {
        Self {
            title: None,
            is_visible: true,
            x_axis_key: None,
            y_axis_key: None,
            x_axis: None,
            y_axis: None,
            points: Vec::new(),
            source: None,
            color: None,
            line_style: None,
            stroke_thickness: 2.0,
            line_join: LineJoin::Bevel,
            can_track_interpolated: true,
            valid_points: Vec::new(),
            min_x: f64::NAN,
            max_x: f64::NAN,
            min_y: f64::NAN,
            max_y: f64::NAN,
        }
    }
}

impl LineSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: Vec<DataPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Samples `f` at `n` evenly spaced x values over [x0, x1].
    pub fn from_function(f: impl Fn(f64) -> f64, x0: f64, x1: f64, n: usize) -> Self {
        let n = n.max(2);
        let points = (0..n)
            .map(|i| {
                let x = x0 + (x1 - x0) * i as f64 / (n - 1) as f64;
                DataPoint::new(x, f(x))
            })
            .collect();
        Self::with_points(points)
    }

    /// Binds a closure that produces the point list; it replaces `points`
    /// on every model update.
    pub fn with_source(mut self, source: impl Fn() -> Vec<DataPoint> + Send + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub(crate) fn update_data(&mut self) {
        if let Some(source) = &self.source {
            self.points = source();
        }
    }

    pub(crate) fn update_valid_data(&mut self) {
        self.valid_points.clear();
        self.valid_points
            .extend(self.points.iter().copied().filter(DataPoint::is_defined));
    }

    pub(crate) fn update_max_min(&mut self) {
        self.min_x = f64::NAN;
        self.max_x = f64::NAN;
        self.min_y = f64::NAN;
        self.max_y = f64::NAN;
        for p in &self.valid_points {
            self.min_x = if self.min_x.is_nan() { p.x } else { self.min_x.min(p.x) };
            self.max_x = if self.max_x.is_nan() { p.x } else { self.max_x.max(p.x) };
            self.min_y = if self.min_y.is_nan() { p.y } else { self.min_y.min(p.y) };
            self.max_y = if self.max_y.is_nan() { p.y } else { self.max_y.max(p.y) };
        }
    }

    pub(crate) fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        axes: &mut [Axis],
        plot_area: Rect,
    ) -> Result<()> {
        let (Some(xi), Some(yi)) = (self.x_axis, self.y_axis) else {
            return Ok(());
        };
        let x_axis = &axes[xi];
        let y_axis = &axes[yi];

        let color = self.color.unwrap_or(Color::BLACK);
        let style = self.line_style.unwrap_or(LineStyle::Solid);
        if style == LineStyle::None || self.stroke_thickness <= 0.0 {
            return Ok(());
        }

        // Undefined points split the polyline into strokes.
        let mut stroke: Vec<ScreenPoint> = Vec::new();
        for p in &self.points {
            if p.is_defined() {
                stroke.push(transform_point(p.x, p.y, x_axis, y_axis));
            } else if !stroke.is_empty() {
                self.draw_stroke(rc, &stroke, plot_area, color, style);
                stroke.clear();
            }
        }
        self.draw_stroke(rc, &stroke, plot_area, color, style);
        Ok(())
    }

    fn draw_stroke(
        &self,
        rc: &mut dyn RenderContext,
        points: &[ScreenPoint],
        plot_area: Rect,
        color: Color,
        style: LineStyle,
    ) {
        if points.len() < 2 {
            return;
        }
        draw_clipped_line(
            rc,
            points,
            plot_area,
            color,
            self.stroke_thickness,
            style.dash_array(),
            self.line_join,
            false,
        );
    }

    pub(crate) fn render_legend_symbol(&self, rc: &mut dyn RenderContext, symbol_box: Rect) {
        let y = symbol_box.top + symbol_box.height * 0.5;
        rc.draw_line(
            &[
                ScreenPoint::new(symbol_box.left, y),
                ScreenPoint::new(symbol_box.right(), y),
            ],
            self.color.unwrap_or(Color::BLACK),
            self.stroke_thickness,
            self.line_style.unwrap_or(LineStyle::Solid).dash_array(),
            LineJoin::Miter,
            false,
        );
    }

    pub(crate) fn get_nearest_point(
        &self,
        point: ScreenPoint,
        interpolate: bool,
        axes: &[Axis],
    ) -> Option<TrackerHit> {
        let (xi, yi) = (self.x_axis?, self.y_axis?);
        let x_axis = &axes[xi];
        let y_axis = &axes[yi];
        let (dp, sp) = if interpolate && self.can_track_interpolated {
            let (dp, sp, _) = nearest_on_segments(&self.points, point, x_axis, y_axis)?;
            (dp, sp)
        } else {
            let (i, sp, _) = nearest_vertex(&self.valid_points, point, x_axis, y_axis)?;
            (self.valid_points[i], sp)
        };
        Some(TrackerHit {
            data_point: dp,
            position: sp,
            text: xy_tracker_text(self.title.as_deref(), dp),
        })
    }
}
