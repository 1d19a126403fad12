// File: crates/plot-core/src/series/scatter.rs
// Summary: Marker-per-point series.

use crate::axis::{transform_point, Axis};
use crate::error::Result;
use crate::geometry::{DataPoint, Rect, ScreenPoint};
use crate::render::RenderContext;
use crate::series::{nearest_vertex, xy_tracker_text, TrackerHit};
use crate::types::{Color, LineJoin};

type PointSource = Box<dyn Fn() -> Vec<DataPoint> + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarkerType {
    #[default]
    Circle,
    Square,
    Diamond,
}

/// One marker per point, no connecting line.
pub struct ScatterSeries {
    pub title: Option<String>,
    pub is_visible: bool,
    pub x_axis_key: Option<String>,
    pub y_axis_key: Option<String>,
    pub(crate) x_axis: Option<usize>,
    pub(crate) y_axis: Option<usize>,

    pub points: Vec<DataPoint>,
    source: Option<PointSource>,

    pub marker_type: MarkerType,
    /// Marker radius in px.
    pub marker_size: f64,
    /// None means "assign from the model palette on update".
    pub marker_fill: Option<Color>,
    pub marker_stroke: Option<Color>,
    pub marker_stroke_thickness: f64,

    pub(crate) valid_points: Vec<DataPoint>,
    pub(crate) min_x: f64,
    pub(crate) max_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_y: f64,
}

impl Default for ScatterSeries {
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
            marker_type: MarkerType::Circle,
            marker_size: 3.0,
            marker_fill: None,
            marker_stroke: None,
            marker_stroke_thickness: 1.0,
            valid_points: Vec::new(),
            min_x: f64::NAN,
            max_x: f64::NAN,
            min_y: f64::NAN,
            max_y: f64::NAN,
        }
    }
}

impl ScatterSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: Vec<DataPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Fn() -> Vec<DataPoint> + Send + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_marker(mut self, marker_type: MarkerType, size: f64) -> Self {
        self.marker_type = marker_type;
        self.marker_size = size;
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

        let fill = self.marker_fill.unwrap_or(Color::BLACK);
        for p in &self.valid_points {
            let sp = transform_point(p.x, p.y, x_axis, y_axis);
            // markers are small; clip whole markers at the plot boundary
            if !plot_area.contains(sp.x, sp.y) {
                continue;
            }
            self.draw_marker(rc, sp, fill);
        }
        Ok(())
    }

    fn draw_marker(&self, rc: &mut dyn RenderContext, center: ScreenPoint, fill: Color) {
        let r = self.marker_size;
        match self.marker_type {
            MarkerType::Circle => rc.draw_ellipse(
                Rect::new(center.x - r, center.y - r, 2.0 * r, 2.0 * r),
                Some(fill),
                self.marker_stroke,
                self.marker_stroke_thickness,
            ),
            MarkerType::Square => rc.draw_rectangle(
                Rect::new(center.x - r, center.y - r, 2.0 * r, 2.0 * r),
                Some(fill),
                self.marker_stroke,
                self.marker_stroke_thickness,
            ),
            MarkerType::Diamond => rc.draw_polygon(
                &[
                    ScreenPoint::new(center.x, center.y - r),
                    ScreenPoint::new(center.x + r, center.y),
                    ScreenPoint::new(center.x, center.y + r),
                    ScreenPoint::new(center.x - r, center.y),
                ],
                Some(fill),
                self.marker_stroke,
                self.marker_stroke_thickness,
                None,
                LineJoin::Miter,
                false,
            ),
        }
    }

    pub(crate) fn render_legend_symbol(&self, rc: &mut dyn RenderContext, symbol_box: Rect) {
        let center = ScreenPoint::new(
            symbol_box.left + symbol_box.width * 0.5,
            symbol_box.top + symbol_box.height * 0.5,
        );
        self.draw_marker(rc, center, self.marker_fill.unwrap_or(Color::BLACK));
    }

    pub(crate) fn get_nearest_point(&self, point: ScreenPoint, axes: &[Axis]) -> Option<TrackerHit> {
        let (xi, yi) = (self.x_axis?, self.y_axis?);
        let (i, sp, _) = nearest_vertex(&self.valid_points, point, &axes[xi], &axes[yi])?;
        let dp = self.valid_points[i];
        Some(TrackerHit {
            data_point: dp,
            position: sp,
            text: xy_tracker_text(self.title.as_deref(), dp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisPosition;

    #[test]
    fn max_min_skips_undefined_points() {
        let mut s = ScatterSeries::with_points(vec![
            DataPoint::new(1.0, -2.0),
            DataPoint::new(f64::NAN, 100.0),
            DataPoint::new(4.0, 7.0),
        ]);
        s.update_valid_data();
        s.update_max_min();
        assert_eq!((s.min_x, s.max_x), (1.0, 4.0));
        assert_eq!((s.min_y, s.max_y), (-2.0, 7.0));
    }

    #[test]
    fn nearest_point_returns_closest_marker() {
        let mut x = Axis::linear(AxisPosition::Bottom).with_range(0.0, 10.0);
        let mut y = Axis::linear(AxisPosition::Left).with_range(0.0, 10.0);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        x.update_actual_max_min();
        y.update_actual_max_min();
        x.update_transform(area);
        y.update_transform(area);

        let mut s = ScatterSeries::with_points(vec![DataPoint::new(1.0, 1.0), DataPoint::new(9.0, 9.0)]);
        s.x_axis = Some(0);
        s.y_axis = Some(1);
        s.update_valid_data();
        let hit = s
            .get_nearest_point(ScreenPoint::new(85.0, 15.0), &[x, y])
            .unwrap();
        assert_eq!(hit.data_point, DataPoint::new(9.0, 9.0));
    }
}
