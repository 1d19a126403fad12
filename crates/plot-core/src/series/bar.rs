// File: crates/plot-core/src/series/bar.rs
// Summary: Bar series: clustered and stacked bars against a category axis.

use crate::axis::{Axis, AxisKind};
use crate::error::{PlotError, Result};
use crate::geometry::{Rect, ScreenPoint};
use crate::render::{draw_clipped_rectangle, RenderContext};
use crate::series::TrackerHit;
use crate::types::{Color, LineJoin};

type ValueSource = Box<dyn Fn() -> Vec<f64> + Send>;

/// Derived from which bound axis carries the categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarOrientation {
    /// Categories on a horizontal axis, bars grow vertically.
    Vertical,
    /// Categories on a vertical axis, bars grow horizontally.
    Horizontal,
}

/// One value per category. Multiple bar series on the same category axis
/// either stack (each segment starts at the running stack top) or cluster
/// (the bar width is split between them, side by side).
pub struct BarSeries {
    pub title: Option<String>,
    pub is_visible: bool,
    pub x_axis_key: Option<String>,
    pub y_axis_key: Option<String>,
    pub(crate) x_axis: Option<usize>,
    pub(crate) y_axis: Option<usize>,

    /// One value per category; NaN skips the category without shifting
    /// later values.
    pub values: Vec<f64>,
    source: Option<ValueSource>,

    pub is_stacked: bool,
    /// Fraction of the category slot the full bar group occupies.
    pub bar_width: f64,
    /// None means "assign from the model palette on update".
    pub fill_color: Option<Color>,
    /// Fill for negative values; falls back to `fill_color`.
    pub negative_fill_color: Option<Color>,
    pub stroke_color: Color,
    pub stroke_thickness: f64,

    /// Rectangles drawn in the last render, for hit-testing. Paired with
    /// the category index.
    pub(crate) actual_bar_rects: Vec<(usize, Rect)>,

    pub(crate) min_x: f64,
    pub(crate) max_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_y: f64,
}

impl Default for BarSeries {
    fn default() -> Self {
        Self {
            title: None,
            is_visible: true,
            x_axis_key: None,
            y_axis_key: None,
            x_axis: None,
            y_axis: None,
            values: Vec::new(),
            source: None,
            is_stacked: false,
            bar_width: 0.5,
            fill_color: None,
            negative_fill_color: None,
            stroke_color: Color::BLACK,
            stroke_thickness: 0.0,
            actual_bar_rects: Vec::new(),
            min_x: f64::NAN,
            max_x: f64::NAN,
            min_y: f64::NAN,
            max_y: f64::NAN,
        }
    }
}

impl BarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: Vec<f64>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Fn() -> Vec<f64> + Send + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn stacked(mut self) -> Self {
        self.is_stacked = true;
        self
    }

    pub(crate) fn update_data(&mut self) {
        if let Some(source) = &self.source {
            self.values = source();
        }
    }

    /// (category axis, value axis, orientation); errors when the binding
    /// does not pair exactly one category axis with one value axis.
    fn resolve_axes(&self, axes: &[Axis]) -> Result<(usize, usize, BarOrientation)> {
        let xi = self.x_axis.ok_or(PlotError::MissingAxis("x"))?;
        let yi = self.y_axis.ok_or(PlotError::MissingAxis("y"))?;
        let x_cat = matches!(axes[xi].kind, AxisKind::Category(_));
        let y_cat = matches!(axes[yi].kind, AxisKind::Category(_));
        match (x_cat, y_cat) {
            (true, false) => Ok((xi, yi, BarOrientation::Vertical)),
            (false, true) => Ok((yi, xi, BarOrientation::Horizontal)),
            (true, true) => Err(PlotError::NoValueAxis),
            (false, false) => Err(PlotError::NoCategoryAxis),
        }
    }

    /// Computes the value range. Stacked series also advance the cumulative
    /// per-category extremes on the category axis, so call order matters.
    pub(crate) fn update_max_min(&mut self, axes: &mut [Axis]) -> Result<()> {
        let (ci, _, orientation) = self.resolve_axes(axes)?;

        // The range always covers the zero baseline.
        let mut min_v: f64 = 0.0;
        let mut max_v: f64 = 0.0;
        {
            let cat = axes[ci]
                .category_data_mut()
                .ok_or(PlotError::NoCategoryAxis)?;
            for (i, &v) in self.values.iter().enumerate() {
                if !v.is_finite() || i >= cat.min_value.len() {
                    continue;
                }
                if self.is_stacked {
                    cat.max_value[i] = cat.max_value[i].max(cat.max_value[i] + v);
                    cat.min_value[i] = cat.min_value[i].min(cat.min_value[i] + v);
                    min_v = min_v.min(cat.min_value[i]);
                    max_v = max_v.max(cat.max_value[i]);
                } else {
                    min_v = min_v.min(v);
                    max_v = max_v.max(v);
                }
            }
        }

        match orientation {
            BarOrientation::Vertical => {
                self.min_x = f64::NAN;
                self.max_x = f64::NAN;
                self.min_y = min_v;
                self.max_y = max_v;
            }
            BarOrientation::Horizontal => {
                self.min_x = min_v;
                self.max_x = max_v;
                self.min_y = f64::NAN;
                self.max_y = f64::NAN;
            }
        }
        Ok(())
    }

    pub(crate) fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        axes: &mut [Axis],
        plot_area: Rect,
    ) -> Result<()> {
        let (ci, vi, orientation) = self.resolve_axes(axes)?;
        let vertical = orientation == BarOrientation::Vertical;

        // Copy both transforms before borrowing the accumulator mutably.
        let cat_t = axes[ci].transform_snapshot();
        let val_t = axes[vi].transform_snapshot();

        let cat = axes[ci]
            .category_data_mut()
            .ok_or(PlotError::NoCategoryAxis)?;
        let slots = if self.is_stacked {
            1
        } else {
            cat.attached_series_count.max(1)
        };
        let actual_width = self.bar_width / slots as f64;
        let dx = cat.bar_offset - self.bar_width * 0.5;

        self.actual_bar_rects.clear();
        for (i, &v) in self.values.iter().enumerate() {
            if i >= cat.base_value.len() {
                break;
            }
            if !v.is_finite() {
                continue;
            }

            let base = if self.is_stacked && cat.base_value[i].is_finite() {
                cat.base_value[i]
            } else {
                0.0
            };
            let top = if self.is_stacked { base + v } else { v };
            let c0 = i as f64 + dx;
            let c1 = c0 + actual_width;

            let (mut p0, mut p1) = if vertical {
                (
                    ScreenPoint::new(cat_t.apply(c0), val_t.apply(base)),
                    ScreenPoint::new(cat_t.apply(c1), val_t.apply(top)),
                )
            } else {
                (
                    ScreenPoint::new(val_t.apply(base), cat_t.apply(c0)),
                    ScreenPoint::new(val_t.apply(top), cat_t.apply(c1)),
                )
            };

            // Snap to whole pixels so adjacent segments share an edge.
            p0.x = p0.x.round();
            p0.y = p0.y.round();
            p1.x = p1.x.round();
            p1.y = p1.y.round();

            // Start flush with the previous segment's snapped edge.
            let prev = cat.base_value_screen[i];
            if prev.is_finite() {
                match (self.is_stacked, vertical) {
                    (true, true) => p0.y = prev,
                    (true, false) => p0.x = prev,
                    (false, true) => p0.x = prev,
                    (false, false) => p0.y = prev,
                }
            }

            if self.is_stacked {
                cat.base_value[i] = top;
                cat.base_value_screen[i] = if vertical { p1.y } else { p1.x };
            } else {
                cat.base_value_screen[i] = if vertical { p1.x } else { p1.y };
            }

            let rect = Rect::from_points(p0.x, p0.y, p1.x, p1.y);
            let fill = if v < 0.0 {
                self.negative_fill_color.or(self.fill_color)
            } else {
                self.fill_color
            }
            .unwrap_or(Color::BLACK);
            let stroke = (self.stroke_thickness > 0.0).then_some(self.stroke_color);

            self.actual_bar_rects.push((i, rect));
            draw_clipped_rectangle(rc, rect, plot_area, Some(fill), stroke, self.stroke_thickness);
        }

        // Side-by-side series each claim their slot in order.
        if !self.is_stacked {
            cat.bar_offset += actual_width;
        }
        Ok(())
    }

    pub(crate) fn render_legend_symbol(&self, rc: &mut dyn RenderContext, symbol_box: Rect) {
        rc.draw_polygon(
            &[
                ScreenPoint::new(symbol_box.left, symbol_box.top),
                ScreenPoint::new(symbol_box.right(), symbol_box.top),
                ScreenPoint::new(symbol_box.right(), symbol_box.bottom()),
                ScreenPoint::new(symbol_box.left, symbol_box.bottom()),
            ],
            Some(self.fill_color.unwrap_or(Color::BLACK)),
            (self.stroke_thickness > 0.0).then_some(self.stroke_color),
            self.stroke_thickness,
            None,
            LineJoin::Miter,
            true,
        );
    }

    /// A hit is reported only for points inside a bar rectangle.
    pub(crate) fn get_nearest_point(&self, point: ScreenPoint, axes: &[Axis]) -> Option<TrackerHit> {
        let (ci, _, orientation) = self.resolve_axes(axes).ok()?;
        let cat = axes[ci].category_data()?;

        let hit_for = |index: usize, position: ScreenPoint| {
            let value = self.values.get(index).copied().unwrap_or(f64::NAN);
            let label = cat.label_for(index);
            let dp = match orientation {
                BarOrientation::Vertical => crate::geometry::DataPoint::new(index as f64, value),
                BarOrientation::Horizontal => crate::geometry::DataPoint::new(value, index as f64),
            };
            TrackerHit {
                data_point: dp,
                position,
                text: match &self.title {
                    Some(t) => format!("{t}\n{label}: {value}"),
                    None => format!("{label}: {value}"),
                },
            }
        };

        for &(index, rect) in &self.actual_bar_rects {
            if rect.contains(point.x, point.y) {
                return Some(hit_for(index, point));
            }
        }
        None
    }
}
