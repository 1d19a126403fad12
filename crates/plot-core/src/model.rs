// File: crates/plot-core/src/model.rs
// Summary: The plot model: owns axes/series/annotations, runs the update pipeline,
//          lays out margins and renders everything through a render context.

use crate::annotation::Annotation;
use crate::axis::{renderer, Axis, AxisKind, AxisPosition};
use crate::error::{PlotError, Result};
use crate::geometry::{Rect, ScreenPoint, ScreenVector, Thickness};
use crate::render::RenderContext;
use crate::series::{Series, TrackerHit};
use crate::types::{
    default_palette, Color, Font, FontWeight, HorizontalAlign, LineStyle, VerticalAlign,
};

/// Coordinate system of the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlotType {
    /// Independent x and y scales.
    #[default]
    Xy,
    /// Equal x and y scales (the wider range wins).
    Cartesian,
    /// Angle/magnitude axes; defaults are synthesized when absent.
    Polar,
}

const LEGEND_PADDING: f64 = 4.0;
const LEGEND_SYMBOL_WIDTH: f64 = 20.0;
const LEGEND_ROW_HEIGHT: f64 = 18.0;

/// Root of a plot: axes, series and annotations plus the update/render
/// pipeline that ties them together.
///
/// `update` resolves data into axis ranges; `render` lays out margins and
/// draws. Rendering the same update twice produces identical output.
pub struct PlotModel {
    pub plot_type: PlotType,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub title_font_size: f64,
    pub subtitle_font_size: f64,
    pub font_family: String,
    pub text_color: Color,
    pub background: Option<Color>,
    /// Space between the outer edge and everything else.
    pub padding: Thickness,
    /// Space reserved around the plot area for axis furniture;
    /// NaN components are measured from the tick labels.
    pub plot_margins: Thickness,
    pub is_legend_visible: bool,
    /// Colors handed to series that do not set their own.
    pub default_colors: Vec<Color>,

    pub axes: Vec<Axis>,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,

    // Cursor into default_colors; advances once per auto-colored series and
    // survives updates so colors stay stable.
    color_cursor: usize,

    plot_area: Rect,
    default_x_axis: Option<usize>,
    default_y_axis: Option<usize>,
    updating: bool,
    updated: bool,
}

impl Default for PlotModel {
    fn default() -> Self {
        Self {
            plot_type: PlotType::Xy,
            title: None,
            subtitle: None,
            title_font_size: 18.0,
            subtitle_font_size: 13.0,
            font_family: "sans-serif".to_string(),
            text_color: Color::BLACK,
            background: None,
            padding: Thickness::uniform(8.0),
            plot_margins: Thickness::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
            is_legend_visible: true,
            default_colors: default_palette(),
            axes: Vec::new(),
            series: Vec::new(),
            annotations: Vec::new(),
            color_cursor: 0,
            plot_area: Rect::default(),
            default_x_axis: None,
            default_y_axis: None,
            updating: false,
            updated: false,
        }
    }
}

impl PlotModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_axis(&mut self, axis: Axis) {
        self.axes.push(axis);
        self.updated = false;
    }

    pub fn add_series(&mut self, series: impl Into<Series>) {
        self.series.push(series.into());
        self.updated = false;
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
        self.updated = false;
    }

    /// Plot area of the last render, in device pixels.
    pub fn plot_area(&self) -> Rect {
        self.plot_area
    }

    /// Runs the update pipeline: default axes, series data refresh, range
    /// accumulation and actual-range resolution.
    ///
    /// Pass `update_data: false` to recompute ranges and transforms without
    /// re-evaluating series data sources (e.g. after pan/zoom).
    pub fn update(&mut self, update_data: bool) -> Result<()> {
        if self.updating {
            return Err(PlotError::ReentrantUpdate);
        }
        self.updating = true;
        let result = self.update_inner(update_data);
        self.updating = false;
        self.updated = result.is_ok();
        result
    }

    fn update_inner(&mut self, update_data: bool) -> Result<()> {
        self.ensure_default_axes();
        self.default_x_axis = self
            .axes
            .iter()
            .position(|a| a.is_horizontal() || a.position == AxisPosition::Angle);
        self.default_y_axis = self
            .axes
            .iter()
            .position(|a| a.is_vertical() || a.position == AxisPosition::Magnitude);

        for s in &mut self.series {
            s.ensure_axes(&self.axes, self.default_x_axis, self.default_y_axis);
        }

        if update_data {
            for s in &mut self.series {
                s.update_data()?;
            }
        }

        self.assign_default_colors();

        for a in &mut self.axes {
            a.reset_data_range();
        }
        self.sync_category_axes();

        for s in &mut self.series {
            s.update_valid_data();
        }

        // Stacked accumulation depends on series order, so this stays a
        // plain in-order loop.
        for s in &mut self.series {
            if s.is_visible() {
                s.update_max_min(&mut self.axes)?;
                s.update_axis_max_min(&mut self.axes);
            }
        }

        for a in &mut self.axes {
            a.update_actual_max_min();
        }
        Ok(())
    }

    /// Adds a bottom/left axis pair when series exist but axes are missing.
    /// A bar series gets a category axis as its default bottom axis.
    fn ensure_default_axes(&mut self) {
        if self.series.is_empty() {
            return;
        }
        if self.plot_type == PlotType::Polar {
            if !self.axes.iter().any(|a| a.position == AxisPosition::Angle) {
                self.axes.push(Axis::angle());
            }
            if !self
                .axes
                .iter()
                .any(|a| a.position == AxisPosition::Magnitude)
            {
                self.axes.push(Axis::magnitude());
            }
            return;
        }
        let has_x = self
            .axes
            .iter()
            .any(|a| a.is_horizontal() || a.position == AxisPosition::Angle);
        let has_y = self
            .axes
            .iter()
            .any(|a| a.is_vertical() || a.position == AxisPosition::Magnitude);
        let has_category = self
            .axes
            .iter()
            .any(|a| matches!(a.kind, AxisKind::Category(_)));
        if !has_x {
            if !has_category && self.series.iter().any(Series::is_bar) {
                self.axes
                    .push(Axis::category(AxisPosition::Bottom, Vec::<String>::new()));
            } else {
                self.axes.push(Axis::linear(AxisPosition::Bottom));
            }
        }
        if !has_y {
            self.axes.push(Axis::linear(AxisPosition::Left));
        }
    }

    fn assign_default_colors(&mut self) {
        if self.default_colors.is_empty() {
            return;
        }
        let n = self.default_colors.len();
        for s in self.series.iter_mut() {
            let next = self.default_colors[self.color_cursor % n];
            // A fresh line style only pairs with a freshly assigned color,
            // once the palette has wrapped.
            let next_style = LineStyle::CYCLE[(self.color_cursor / n) % LineStyle::CYCLE.len()];
            let assigned = match s {
                Series::Line(l) => {
                    if l.line_style.is_none() {
                        l.line_style =
                            Some(if l.color.is_none() { next_style } else { LineStyle::Solid });
                    }
                    if l.color.is_none() {
                        l.color = Some(next);
                        true
                    } else {
                        false
                    }
                }
                Series::Scatter(sc) => {
                    if sc.marker_fill.is_none() {
                        sc.marker_fill = Some(next);
                        true
                    } else {
                        false
                    }
                }
                Series::Bar(b) => {
                    if b.fill_color.is_none() {
                        b.fill_color = Some(next);
                        true
                    } else {
                        false
                    }
                }
                Series::Contour(c) => {
                    if c.color.is_none() {
                        c.color = Some(next);
                        true
                    } else {
                        false
                    }
                }
            };
            if assigned {
                self.color_cursor += 1;
            }
        }
    }

    /// Prepares every category axis for this update: pads labels to the
    /// longest attached value list, clears the stacking accumulator and
    /// counts the clustered series sharing the bar width.
    fn sync_category_axes(&mut self) {
        let mut value_len = vec![0usize; self.axes.len()];
        let mut clustered = vec![0usize; self.axes.len()];
        for s in &self.series {
            let Series::Bar(b) = s else { continue };
            if !b.is_visible {
                continue;
            }
            let (Some(xi), Some(yi)) = (b.x_axis, b.y_axis) else {
                continue;
            };
            let ci = if matches!(self.axes[xi].kind, AxisKind::Category(_)) {
                xi
            } else if matches!(self.axes[yi].kind, AxisKind::Category(_)) {
                yi
            } else {
                continue;
            };
            value_len[ci] = value_len[ci].max(b.values.len());
            if !b.is_stacked {
                clustered[ci] += 1;
            }
        }
        for (i, a) in self.axes.iter_mut().enumerate() {
            if let Some(c) = a.category_data_mut() {
                c.sync_with_value_count(value_len[i]);
                c.attached_series_count = clustered[i];
            }
        }
    }

    /// Renders the whole plot into `rc` at the given device size.
    /// Updates first if the model is stale.
    pub fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        width: f64,
        height: f64,
    ) -> Result<()> {
        if !self.updated {
            self.update(true)?;
        }

        let full = Rect::new(0.0, 0.0, width, height);
        if let Some(bg) = self.background {
            rc.draw_rectangle(full, Some(bg), None, 0.0);
        }

        let mut available = full.deflate(self.padding);
        let title_height = self.title_block_height();
        available.top += title_height;
        available.height = (available.height - title_height).max(0.0);

        // First pass with provisional transforms, so tick labels exist to
        // measure; then the real layout.
        self.prepare_axes(available);
        let margins = self.auto_margins(rc, available);
        let area = available.deflate(margins);
        self.prepare_axes(area);
        if self.plot_type == PlotType::Cartesian {
            self.enforce_cartesian(area);
        }

        for a in &mut self.axes {
            if let Some(c) = a.category_data_mut() {
                c.reset_render_accumulator();
            }
        }

        for a in &self.axes {
            renderer::render_axis(rc, a, area, &self.font_family, self.text_color);
        }

        {
            let Self { axes, series, .. } = self;
            for s in series.iter_mut() {
                if s.is_visible() {
                    s.render(rc, axes, area)?;
                }
            }
        }

        if let (Some(xi), Some(yi)) = (self.default_x_axis, self.default_y_axis) {
            for a in &self.annotations {
                a.render(rc, &self.axes[xi], &self.axes[yi], area, &self.font_family);
            }
        }

        if self.is_legend_visible {
            self.render_legend(rc, area);
        }
        self.render_titles(rc, full);

        self.plot_area = area;
        Ok(())
    }

    /// Widens the range of whichever default axis is zoomed in tighter so
    /// both end up with the same pixels-per-unit scale.
    fn enforce_cartesian(&mut self, area: Rect) {
        let (Some(xi), Some(yi)) = (self.default_x_axis, self.default_y_axis) else {
            return;
        };
        if self.axes[xi].is_logarithmic() || self.axes[yi].is_logarithmic() {
            return;
        }
        let sx = self.axes[xi].scale().abs();
        let sy = self.axes[yi].scale().abs();
        if !sx.is_finite() || !sy.is_finite() || sx == sy {
            return;
        }
        let target = sx.min(sy);
        for (i, extent) in [(xi, area.width), (yi, area.height)] {
            let a = &mut self.axes[i];
            if a.scale().abs() > target {
                let mid = 0.5 * (a.actual_minimum + a.actual_maximum);
                let half = extent / target * 0.5;
                a.actual_minimum = mid - half;
                a.actual_maximum = mid + half;
                a.update_transform(area);
                a.update_intervals(area);
            }
        }
    }

    fn prepare_axes(&mut self, area: Rect) {
        for a in &mut self.axes {
            a.update_transform(area);
            a.update_intervals(area);
        }
    }

    fn title_block_height(&self) -> f64 {
        let mut h = 0.0;
        if self.title.is_some() {
            h += self.title_font_size + 4.0;
        }
        if self.subtitle.is_some() {
            h += self.subtitle_font_size + 4.0;
        }
        h
    }

    fn auto_margins(&self, rc: &dyn RenderContext, area: Rect) -> Thickness {
        let mut m = Thickness::uniform(10.0);
        for a in &self.axes {
            let needed = renderer::required_margin(rc, a, &self.font_family, &a.major_tick_values());
            match a.position {
                AxisPosition::Left => m.left = m.left.max(needed),
                AxisPosition::Right => m.right = m.right.max(needed),
                AxisPosition::Top => m.top = m.top.max(needed),
                AxisPosition::Bottom => m.bottom = m.bottom.max(needed),
                _ => {}
            }
        }
        // measured margins never consume the whole area; cap each side at a
        // third of the available extent so the plot area stays non-empty
        let cap_x = area.width / 3.0;
        let cap_y = area.height / 3.0;
        m.left = m.left.min(cap_x);
        m.right = m.right.min(cap_x);
        m.top = m.top.min(cap_y);
        m.bottom = m.bottom.min(cap_y);
        // explicit margins override the measured ones
        if self.plot_margins.left.is_finite() {
            m.left = self.plot_margins.left;
        }
        if self.plot_margins.top.is_finite() {
            m.top = self.plot_margins.top;
        }
        if self.plot_margins.right.is_finite() {
            m.right = self.plot_margins.right;
        }
        if self.plot_margins.bottom.is_finite() {
            m.bottom = self.plot_margins.bottom;
        }
        m
    }

    fn render_titles(&self, rc: &mut dyn RenderContext, full: Rect) {
        let center_x = full.left + full.width * 0.5;
        let mut y = full.top + self.padding.top;
        if let Some(title) = &self.title {
            let font = Font::new(&self.font_family, self.title_font_size, FontWeight::Bold);
            rc.draw_text(
                ScreenPoint::new(center_x, y),
                title,
                self.text_color,
                &font,
                0.0,
                HorizontalAlign::Center,
                VerticalAlign::Top,
            );
            y += self.title_font_size + 4.0;
        }
        if let Some(subtitle) = &self.subtitle {
            let font = Font::new(&self.font_family, self.subtitle_font_size, FontWeight::Normal);
            rc.draw_text(
                ScreenPoint::new(center_x, y),
                subtitle,
                self.text_color,
                &font,
                0.0,
                HorizontalAlign::Center,
                VerticalAlign::Top,
            );
        }
    }

    fn render_legend(&self, rc: &mut dyn RenderContext, area: Rect) {
        let font = Font::new(&self.font_family, 12.0, FontWeight::Normal);
        let entries: Vec<(usize, &str)> = self
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_visible())
            .filter_map(|(i, s)| s.title().map(|t| (i, t)))
            .collect();
        if entries.is_empty() {
            return;
        }

        let text_width = entries
            .iter()
            .map(|(_, t)| rc.measure_text(t, &font).width)
            .fold(0.0, f64::max);
        let w = LEGEND_PADDING * 3.0 + LEGEND_SYMBOL_WIDTH + text_width;
        let h = LEGEND_PADDING * 2.0 + entries.len() as f64 * LEGEND_ROW_HEIGHT;
        let box_rect = Rect::new(area.right() - w - 8.0, area.top + 8.0, w, h);

        rc.draw_rectangle(
            box_rect,
            Some(Color::from_argb(0xcc, 0xff, 0xff, 0xff)),
            Some(Color::from_rgb(0x80, 0x80, 0x80)),
            1.0,
        );

        for (row, (i, title)) in entries.iter().enumerate() {
            let y = box_rect.top + LEGEND_PADDING + row as f64 * LEGEND_ROW_HEIGHT;
            let symbol = Rect::new(
                box_rect.left + LEGEND_PADDING,
                y + 4.0,
                LEGEND_SYMBOL_WIDTH,
                LEGEND_ROW_HEIGHT - 8.0,
            );
            self.series[*i].render_legend_symbol(rc, symbol);
            rc.draw_text(
                ScreenPoint::new(symbol.right() + LEGEND_PADDING, y + LEGEND_ROW_HEIGHT * 0.5),
                title,
                self.text_color,
                &font,
                0.0,
                HorizontalAlign::Left,
                VerticalAlign::Middle,
            );
        }
    }

    /// Pans the default axis pair by a screen-space drag vector.
    pub fn pan(&mut self, delta: ScreenVector) {
        if let Some(i) = self.default_x_axis {
            self.axes[i].pan(delta.x);
        }
        if let Some(i) = self.default_y_axis {
            self.axes[i].pan(delta.y);
        }
    }

    /// The axes a screen point interacts with: inside the plot area both
    /// defaults respond; over an axis band only that axis responds.
    pub fn get_axes_from_point(&self, point: ScreenPoint) -> (Option<usize>, Option<usize>) {
        let area = self.plot_area;
        if area.contains(point.x, point.y) {
            return (self.default_x_axis, self.default_y_axis);
        }
        let mut x = None;
        let mut y = None;
        for (i, a) in self.axes.iter().enumerate() {
            match a.position {
                AxisPosition::Bottom if point.y > area.bottom() => x = x.or(Some(i)),
                AxisPosition::Top if point.y < area.top => x = x.or(Some(i)),
                AxisPosition::Left if point.x < area.left => y = y.or(Some(i)),
                AxisPosition::Right if point.x > area.right() => y = y.or(Some(i)),
                _ => {}
            }
        }
        (x, y)
    }

    /// The topmost series within `limit` px of `point`, walking series in
    /// reverse draw order so the one painted last wins ties. A negative
    /// limit matches nothing.
    pub fn get_series_from_point(
        &self,
        point: ScreenPoint,
        limit: f64,
    ) -> Option<(usize, TrackerHit)> {
        if limit < 0.0 {
            return None;
        }
        let limit2 = limit * limit;
        for (i, s) in self.series.iter().enumerate().rev() {
            if !s.is_visible() {
                continue;
            }
            if let Some(hit) = s.get_nearest_point(point, true, &self.axes) {
                if hit.position.distance_to_squared(point) <= limit2 {
                    return Some((i, hit));
                }
            }
        }
        None
    }
}

impl From<crate::series::LineSeries> for Series {
    fn from(s: crate::series::LineSeries) -> Self {
        Series::Line(s)
    }
}

impl From<crate::series::ScatterSeries> for Series {
    fn from(s: crate::series::ScatterSeries) -> Self {
        Series::Scatter(s)
    }
}

impl From<crate::series::BarSeries> for Series {
    fn from(s: crate::series::BarSeries) -> Self {
        Series::Bar(s)
    }
}

impl From<crate::series::ContourSeries> for Series {
    fn from(s: crate::series::ContourSeries) -> Self {
        Series::Contour(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DataPoint;
    use crate::series::{BarSeries, LineSeries};

    #[test]
    fn update_creates_default_axes() {
        let mut m = PlotModel::new();
        m.add_series(LineSeries::with_points(vec![DataPoint::new(0.0, 1.0)]));
        m.update(true).unwrap();
        assert_eq!(m.axes.len(), 2);
        assert!(m.axes[0].is_horizontal());
        assert!(m.axes[1].is_vertical());
    }

    #[test]
    fn bar_series_gets_a_default_category_axis() {
        let mut m = PlotModel::new();
        m.add_series(BarSeries::with_values(vec![1.0, 2.0, 3.0]));
        m.update(true).unwrap();
        let cat = m.axes.iter().find(|a| a.category_data().is_some()).unwrap();
        assert_eq!(cat.category_data().unwrap().len(), 3);
        // half-unit margins around the three categories
        assert_eq!(cat.actual_minimum, -0.5);
        assert_eq!(cat.actual_maximum, 2.5);
    }

    #[test]
    fn default_colors_are_assigned_in_order_and_stay_stable() {
        let mut m = PlotModel::new();
        m.add_series(LineSeries::new());
        m.add_series(LineSeries::new());
        m.update(true).unwrap();
        let palette = default_palette();
        let c0 = match &m.series[0] {
            Series::Line(l) => l.color.unwrap(),
            _ => unreachable!(),
        };
        let c1 = match &m.series[1] {
            Series::Line(l) => l.color.unwrap(),
            _ => unreachable!(),
        };
        assert_eq!(c0, palette[0]);
        assert_eq!(c1, palette[1]);

        m.add_series(LineSeries::new());
        m.update(true).unwrap();
        let c2 = match &m.series[2] {
            Series::Line(l) => l.color.unwrap(),
            _ => unreachable!(),
        };
        assert_eq!(c2, palette[2]);
    }

    #[test]
    fn explicit_series_color_does_not_advance_the_cursor() {
        let mut m = PlotModel::new();
        m.add_series(LineSeries::new().with_color(Color::RED));
        m.add_series(LineSeries::new());
        m.update(true).unwrap();
        let c1 = match &m.series[1] {
            Series::Line(l) => l.color.unwrap(),
            _ => unreachable!(),
        };
        assert_eq!(c1, default_palette()[0]);
    }

    #[test]
    fn reentrant_update_is_an_error() {
        let mut m = PlotModel::new();
        m.updating = true;
        assert!(matches!(m.update(true), Err(PlotError::ReentrantUpdate)));
    }

    #[test]
    fn invisible_series_are_excluded_from_ranges() {
        let mut m = PlotModel::new();
        let mut hidden = LineSeries::with_points(vec![DataPoint::new(0.0, 1000.0)]);
        hidden.is_visible = false;
        m.add_series(hidden);
        m.add_series(LineSeries::with_points(vec![
            DataPoint::new(0.0, 0.0),
            DataPoint::new(1.0, 1.0),
        ]));
        m.update(true).unwrap();
        assert!(m.axes[1].actual_maximum < 100.0);
    }

    #[test]
    fn update_with_keyed_axes_binds_series() {
        let mut m = PlotModel::new();
        m.add_axis(Axis::linear(AxisPosition::Bottom).with_key("x"));
        m.add_axis(Axis::linear(AxisPosition::Left).with_key("y1"));
        m.add_axis(Axis::linear(AxisPosition::Right).with_key("y2"));
        let mut s = LineSeries::with_points(vec![DataPoint::new(0.0, 5.0)]);
        s.y_axis_key = Some("y2".to_string());
        m.add_series(s);
        m.update(true).unwrap();
        assert_eq!(m.series[0].y_axis_index(), Some(2));
    }

    #[test]
    fn negative_hit_limit_matches_nothing() {
        let m = PlotModel::new();
        assert!(m
            .get_series_from_point(ScreenPoint::new(0.0, 0.0), -1.0)
            .is_none());
    }
}
