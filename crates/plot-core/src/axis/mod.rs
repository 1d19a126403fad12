// File: crates/plot-core/src/axis/mod.rs
// Summary: Axis model: data<->screen transforms, auto-ranging, padding, pan/zoom.

pub mod category;
pub mod renderer;
pub mod tick;

use crate::geometry::{Rect, ScreenPoint};
use crate::types::{Color, LineStyle};

pub use category::CategoryData;

/// Where the axis is drawn. `Angle` and `Magnitude` are the non-cartesian
/// positions used by polar plots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
    Angle,
    Magnitude,
}

/// Axis variant. Shared behavior lives on `Axis`; the variant only carries
/// what differs (category state, log-space transforms, date formatting).
#[derive(Clone, Debug)]
pub enum AxisKind {
    Linear,
    Logarithmic,
    Category(CategoryData),
    DateTime,
}

/// Copyable snapshot of an axis transform, for series that need to map
/// coordinates while holding other axis state mutably.
#[derive(Clone, Copy, Debug)]
pub struct AxisTransform {
    scale: f64,
    offset: f64,
    log: bool,
}

impl AxisTransform {
    pub fn apply(&self, value: f64) -> f64 {
        let v = if self.log { value.log10() } else { value };
        (v - self.offset) * self.scale
    }
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub kind: AxisKind,
    pub position: AxisPosition,
    /// Optional identifier; series bind to it instead of the default axis.
    pub key: Option<String>,
    pub title: Option<String>,

    /// User-set range; NaN means "auto".
    pub minimum: f64,
    pub maximum: f64,
    /// Hard bounds on the actual range regardless of data or padding.
    pub absolute_minimum: f64,
    pub absolute_maximum: f64,
    /// Fraction of the data range added below/above when auto-ranging.
    pub minimum_padding: f64,
    pub maximum_padding: f64,
    /// The actual range is widened around its midpoint to at least this.
    pub minimum_range: f64,

    /// Tick spacing; NaN means auto.
    pub major_step: f64,
    pub minor_step: f64,

    pub major_gridline_style: LineStyle,
    pub minor_gridline_style: LineStyle,
    pub major_gridline_color: Color,
    pub minor_gridline_color: Color,
    pub tick_length: f64,
    pub axis_line_color: Color,
    pub font_size: f64,

    /// Resolved range after `update_actual_max_min`.
    pub actual_minimum: f64,
    pub actual_maximum: f64,
    pub(crate) actual_major_step: f64,
    pub(crate) actual_minor_step: f64,

    // Derived affine transform (pre-transformed space for log axes).
    scale: f64,
    offset: f64,
    // Screen endpoints of the axis after update_transform.
    pub(crate) screen_min: ScreenPoint,
    pub(crate) screen_max: ScreenPoint,
    // Center used by the magnitude/angle transform pair.
    pub(crate) screen_mid: ScreenPoint,

    // Range accumulated from series via include().
    data_minimum: f64,
    data_maximum: f64,

    transform_ready: bool,
}

impl Axis {
    fn with_kind(kind: AxisKind, position: AxisPosition) -> Self {
        let category = matches!(kind, AxisKind::Category(_));
        Self {
            kind,
            position,
            key: None,
            title: None,
            minimum: f64::NAN,
            maximum: f64::NAN,
            absolute_minimum: f64::NEG_INFINITY,
            absolute_maximum: f64::INFINITY,
            // Category axes sit flush against their half-unit margins.
            minimum_padding: if category { 0.0 } else { 0.01 },
            maximum_padding: if category { 0.0 } else { 0.01 },
            minimum_range: 0.0,
            major_step: f64::NAN,
            minor_step: f64::NAN,
            major_gridline_style: LineStyle::Solid,
            minor_gridline_style: LineStyle::None,
            major_gridline_color: Color::from_rgb(0xd0, 0xd0, 0xd5),
            minor_gridline_color: Color::from_rgb(0xe8, 0xe8, 0xec),
            tick_length: 5.0,
            axis_line_color: Color::BLACK,
            font_size: 12.0,
            actual_minimum: f64::NAN,
            actual_maximum: f64::NAN,
            actual_major_step: f64::NAN,
            actual_minor_step: f64::NAN,
            scale: f64::NAN,
            offset: f64::NAN,
            screen_min: ScreenPoint::default(),
            screen_max: ScreenPoint::default(),
            screen_mid: ScreenPoint::default(),
            data_minimum: f64::NAN,
            data_maximum: f64::NAN,
            transform_ready: false,
        }
    }

    pub fn linear(position: AxisPosition) -> Self {
        Self::with_kind(AxisKind::Linear, position)
    }

    pub fn logarithmic(position: AxisPosition) -> Self {
        let mut a = Self::with_kind(AxisKind::Logarithmic, position);
        a.absolute_minimum = f64::MIN_POSITIVE;
        a
    }

    pub fn category<S: Into<String>>(position: AxisPosition, labels: Vec<S>) -> Self {
        Self::with_kind(
            AxisKind::Category(CategoryData::new(labels.into_iter().map(Into::into).collect())),
            position,
        )
    }

    pub fn date_time(position: AxisPosition) -> Self {
        Self::with_kind(AxisKind::DateTime, position)
    }

    pub fn angle() -> Self {
        let mut a = Self::with_kind(AxisKind::Linear, AxisPosition::Angle);
        a.minimum = 0.0;
        a.maximum = 360.0;
        a
    }

    pub fn magnitude() -> Self {
        let mut a = Self::with_kind(AxisKind::Linear, AxisPosition::Magnitude);
        a.minimum_padding = 0.0;
        a
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn with_absolute_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.absolute_minimum = minimum;
        self.absolute_maximum = maximum;
        self
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self.position, AxisPosition::Top | AxisPosition::Bottom)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self.position, AxisPosition::Left | AxisPosition::Right)
    }

    /// An axis that takes part in the cartesian x/y plane.
    pub fn is_xy_axis(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    pub fn is_polar(&self) -> bool {
        matches!(self.position, AxisPosition::Angle | AxisPosition::Magnitude)
    }

    pub fn is_logarithmic(&self) -> bool {
        matches!(self.kind, AxisKind::Logarithmic)
    }

    pub fn category_data(&self) -> Option<&CategoryData> {
        match &self.kind {
            AxisKind::Category(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn category_data_mut(&mut self) -> Option<&mut CategoryData> {
        match &mut self.kind {
            AxisKind::Category(c) => Some(c),
            _ => None,
        }
    }

    /// The derived scale (pixels per pre-transformed data unit).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    fn pre(&self, v: f64) -> f64 {
        if self.is_logarithmic() {
            v.log10()
        } else {
            v
        }
    }

    #[inline]
    fn post(&self, v: f64) -> f64 {
        if self.is_logarithmic() {
            10f64.powf(v)
        } else {
            v
        }
    }

    /// Maps a data value to a screen coordinate along this axis.
    ///
    /// Precondition: `update_transform` has run for the current plot area.
    pub fn transform(&self, value: f64) -> f64 {
        debug_assert!(self.transform_ready, "axis transform used before update_transform");
        (self.pre(value) - self.offset) * self.scale
    }

    /// Maps a screen coordinate back to a data value. Exact inverse of
    /// `transform` up to floating-point tolerance.
    pub fn inverse_transform(&self, screen: f64) -> f64 {
        debug_assert!(self.transform_ready, "axis transform used before update_transform");
        self.post(screen / self.scale + self.offset)
    }

    pub(crate) fn transform_snapshot(&self) -> AxisTransform {
        debug_assert!(self.transform_ready, "axis transform used before update_transform");
        AxisTransform {
            scale: self.scale,
            offset: self.offset,
            log: self.is_logarithmic(),
        }
    }

    /// Widens the accumulated data range to cover `value`.
    /// NaN and infinities are ignored; log axes also ignore non-positive values.
    pub fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if self.is_logarithmic() && value <= 0.0 {
            return;
        }
        self.data_minimum = if self.data_minimum.is_nan() {
            value
        } else {
            self.data_minimum.min(value)
        };
        self.data_maximum = if self.data_maximum.is_nan() {
            value
        } else {
            self.data_maximum.max(value)
        };
    }

    /// Clears the accumulated data range; run at the start of every update.
    pub(crate) fn reset_data_range(&mut self) {
        self.data_minimum = f64::NAN;
        self.data_maximum = f64::NAN;
    }

    /// Resolves the actual range from user range, data range with padding,
    /// absolute clamping and minimum-range widening.
    pub fn update_actual_max_min(&mut self) {
        // Category axes span half a unit beyond the first and last category.
        if let AxisKind::Category(c) = &self.kind {
            let n = c.labels.len().max(1) as f64;
            self.data_minimum = -0.5;
            self.data_maximum = n - 0.5;
        }

        let (data_min, data_max) = self.padded_data_range();

        self.actual_minimum = if self.minimum.is_nan() { data_min } else { self.minimum };
        self.actual_maximum = if self.maximum.is_nan() { data_max } else { self.maximum };

        if self.is_logarithmic() {
            if !(self.actual_minimum > 0.0) {
                self.actual_minimum = if self.actual_maximum > 1.0 {
                    self.actual_maximum / 100.0
                } else {
                    1.0
                };
            }
            if !(self.actual_maximum > self.actual_minimum) {
                self.actual_maximum = self.actual_minimum * 100.0;
            }
        }

        self.clamp_actual_to_absolute();

        // Degenerate range (single value or empty data): substitute a
        // synthetic span so the scale never becomes zero. The span must
        // still respect the absolute bounds; when extending upward runs
        // into the absolute maximum, extend downward instead.
        if !(self.actual_maximum > self.actual_minimum) {
            if self.actual_minimum.is_finite() {
                self.actual_maximum = self.actual_minimum + 100.0;
            } else {
                self.actual_minimum = 0.0;
                self.actual_maximum = 100.0;
            }
            self.clamp_actual_to_absolute();
            if !(self.actual_maximum > self.actual_minimum) {
                self.actual_minimum = self.actual_maximum - 100.0;
                self.clamp_actual_to_absolute();
            }
        }

        if self.minimum_range > 0.0 && self.actual_maximum - self.actual_minimum < self.minimum_range {
            let mid = (self.actual_maximum + self.actual_minimum) * 0.5;
            self.actual_minimum = mid - self.minimum_range * 0.5;
            self.actual_maximum = mid + self.minimum_range * 0.5;
            self.clamp_actual_to_absolute();
        }
    }

    fn padded_data_range(&self) -> (f64, f64) {
        if self.data_minimum.is_nan() || self.data_maximum.is_nan() {
            return (0.0, 100.0);
        }
        let range = self.data_maximum - self.data_minimum;
        if self.is_logarithmic() {
            // Padding in decades keeps the transform well-behaved.
            let ld = self.data_maximum.log10() - self.data_minimum.log10();
            (
                10f64.powf(self.data_minimum.log10() - ld * self.minimum_padding),
                10f64.powf(self.data_maximum.log10() + ld * self.maximum_padding),
            )
        } else {
            (
                self.data_minimum - range * self.minimum_padding,
                self.data_maximum + range * self.maximum_padding,
            )
        }
    }

    fn clamp_actual_to_absolute(&mut self) {
        if self.actual_minimum < self.absolute_minimum {
            self.actual_minimum = self.absolute_minimum;
        }
        if self.actual_maximum > self.absolute_maximum {
            self.actual_maximum = self.absolute_maximum;
        }
    }

    /// Computes the affine transform mapping the actual range onto the plot
    /// area edge for this axis position.
    pub fn update_transform(&mut self, plot_area: Rect) {
        let a = self.pre(self.actual_minimum);
        let b = self.pre(self.actual_maximum);
        let span = b - a;

        match self.position {
            AxisPosition::Top | AxisPosition::Bottom => {
                self.scale = plot_area.width / span;
                self.offset = a - plot_area.left / self.scale;
                self.screen_min = ScreenPoint::new(plot_area.left, plot_area.top);
                self.screen_max = ScreenPoint::new(plot_area.right(), plot_area.bottom());
            }
            AxisPosition::Left | AxisPosition::Right => {
                // Screen Y grows downward, so the scale sign flips.
                self.scale = -plot_area.height / span;
                self.offset = a - plot_area.bottom() / self.scale;
                self.screen_min = ScreenPoint::new(plot_area.left, plot_area.top);
                self.screen_max = ScreenPoint::new(plot_area.right(), plot_area.bottom());
            }
            AxisPosition::Angle => {
                // Value -> angle in radians, full turn over the actual range.
                self.scale = std::f64::consts::TAU / span;
                self.offset = a;
                self.screen_mid = plot_area.center();
            }
            AxisPosition::Magnitude => {
                let radius = 0.5 * plot_area.width.min(plot_area.height);
                self.scale = radius / span;
                self.offset = a;
                self.screen_mid = plot_area.center();
            }
        }
        self.transform_ready = true;
    }

    /// Chooses actual major/minor steps when the user left them auto.
    pub fn update_intervals(&mut self, plot_area: Rect) {
        let available = if self.is_horizontal() {
            plot_area.width
        } else if self.is_vertical() {
            plot_area.height
        } else {
            0.5 * plot_area.width.min(plot_area.height)
        };

        let range = self.pre(self.actual_maximum) - self.pre(self.actual_minimum);
        let auto = match &self.kind {
            AxisKind::Logarithmic => tick::log_interval(range, available),
            AxisKind::DateTime => tick::date_time_interval(range, available),
            AxisKind::Category(_) => 1.0,
            AxisKind::Linear => {
                let max_label = if self.is_horizontal() { 60.0 } else { 30.0 };
                tick::nice_interval(range, available, max_label)
            }
        };

        self.actual_major_step = if self.major_step.is_nan() { auto } else { self.major_step };
        self.actual_minor_step = if self.minor_step.is_nan() {
            tick::minor_from_major(self.actual_major_step, &self.kind)
        } else {
            self.minor_step
        };
    }

    /// Major tick positions in data space for the current range/steps.
    pub fn major_tick_values(&self) -> Vec<f64> {
        let (a, b) = (self.pre(self.actual_minimum), self.pre(self.actual_maximum));
        tick::tick_values(a, b, self.actual_major_step)
            .into_iter()
            .map(|v| self.post(v))
            .collect()
    }

    /// Minor tick positions, excluding values that coincide with majors.
    pub fn minor_tick_values(&self) -> Vec<f64> {
        let (a, b) = (self.pre(self.actual_minimum), self.pre(self.actual_maximum));
        let majors = tick::tick_values(a, b, self.actual_major_step);
        tick::tick_values(a, b, self.actual_minor_step)
            .into_iter()
            .filter(|v| {
                !majors
                    .iter()
                    .any(|m| (m - v).abs() < self.actual_minor_step * 1e-3)
            })
            .map(|v| self.post(v))
            .collect()
    }

    /// Formats a tick value for display (category label, timestamp, number).
    pub fn format_value(&self, value: f64) -> String {
        match &self.kind {
            AxisKind::Category(c) => {
                let i = value.round() as i64;
                if i >= 0 && (i as usize) < c.labels.len() {
                    c.labels[i as usize].clone()
                } else {
                    String::new()
                }
            }
            AxisKind::DateTime => tick::format_date_time(value, self.actual_major_step),
            _ => tick::format_number(value, self.actual_major_step),
        }
    }

    /// Shifts the visible range by a screen-space delta, clamped to the
    /// absolute bounds. The range span is preserved.
    pub fn pan(&mut self, delta_px: f64) {
        let d = delta_px / self.scale;
        let mut new_min = self.pre(self.actual_minimum) - d;
        let mut new_max = self.pre(self.actual_maximum) - d;
        let span = new_max - new_min;

        let abs_min = if self.is_logarithmic() {
            self.pre(self.absolute_minimum.max(f64::MIN_POSITIVE))
        } else {
            self.absolute_minimum
        };
        let abs_max = self.pre(self.absolute_maximum);
        if new_min < abs_min {
            new_min = abs_min;
            new_max = new_min + span;
        }
        if new_max > abs_max {
            new_max = abs_max;
            new_min = new_max - span;
        }

        self.minimum = self.post(new_min);
        self.maximum = self.post(new_max);
        self.actual_minimum = self.minimum;
        self.actual_maximum = self.maximum;
    }

    /// Sets the visible range explicitly, clamped to the absolute bounds.
    pub fn zoom(&mut self, minimum: f64, maximum: f64) {
        let lo = minimum.min(maximum).max(self.absolute_minimum);
        let hi = minimum.max(maximum).min(self.absolute_maximum);
        self.minimum = lo;
        self.maximum = hi;
        self.actual_minimum = lo;
        self.actual_maximum = hi;
    }

    /// Zooms around a data-space point by the given factor (>1 zooms in).
    pub fn zoom_at(&mut self, factor: f64, x: f64) {
        let px = self.pre(x);
        let new_min = px - (px - self.pre(self.actual_minimum)) / factor;
        let new_max = px + (self.pre(self.actual_maximum) - px) / factor;
        self.zoom(self.post(new_min), self.post(new_max));
    }

    /// Clears the user range back to auto.
    pub fn reset(&mut self) {
        self.minimum = f64::NAN;
        self.maximum = f64::NAN;
    }
}

/// Maps a data point to screen space through an axis pair, handling the
/// polar (magnitude/angle) combination.
pub fn transform_point(x: f64, y: f64, x_axis: &Axis, y_axis: &Axis) -> ScreenPoint {
    if x_axis.is_polar() || y_axis.is_polar() {
        let (magnitude, angle, m_axis) = if x_axis.position == AxisPosition::Magnitude {
            (x_axis.transform(x), y_axis.transform(y), x_axis)
        } else {
            (y_axis.transform(y), x_axis.transform(x), y_axis)
        };
        let mid = m_axis.screen_mid;
        return ScreenPoint::new(mid.x + magnitude * angle.cos(), mid.y - magnitude * angle.sin());
    }
    ScreenPoint::new(x_axis.transform(x), y_axis.transform(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 400.0)
    }

    #[test]
    fn transform_maps_range_to_plot_edges() {
        let mut a = Axis::linear(AxisPosition::Left).with_range(0.0, 100.0);
        a.update_actual_max_min();
        a.update_transform(area());
        assert!((a.transform(0.0) - 400.0).abs() < 1e-9);
        assert!((a.transform(100.0) - 0.0).abs() < 1e-9);
        assert!((a.transform(50.0) - 200.0).abs() < 0.5);
    }

    #[test]
    fn inverse_transform_round_trips() {
        let mut a = Axis::linear(AxisPosition::Bottom).with_range(-3.0, 17.0);
        a.update_actual_max_min();
        a.update_transform(area());
        for v in [-3.0, 0.0, 4.2, 16.99] {
            assert!((a.inverse_transform(a.transform(v)) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn log_round_trips() {
        let mut a = Axis::logarithmic(AxisPosition::Left).with_range(1.0, 1000.0);
        a.update_actual_max_min();
        a.update_transform(area());
        for v in [1.0, 10.0, 450.0, 999.0] {
            assert!((a.inverse_transform(a.transform(v)) - v).abs() / v < 1e-9);
        }
    }

    #[test]
    fn degenerate_range_gets_synthetic_span() {
        let mut a = Axis::linear(AxisPosition::Left);
        a.include(5.0);
        a.update_actual_max_min();
        assert!(a.actual_maximum > a.actual_minimum);
    }

    #[test]
    fn empty_axis_defaults_to_0_100() {
        let mut a = Axis::linear(AxisPosition::Left);
        a.update_actual_max_min();
        assert_eq!(a.actual_minimum, 0.0);
        assert_eq!(a.actual_maximum, 100.0);
    }

    #[test]
    fn absolute_bounds_clamp_actual_range() {
        let mut a = Axis::linear(AxisPosition::Left)
            .with_range(-50.0, 150.0)
            .with_absolute_range(0.0, 100.0);
        a.update_actual_max_min();
        assert_eq!(a.actual_minimum, 0.0);
        assert_eq!(a.actual_maximum, 100.0);
    }

    #[test]
    fn degenerate_range_at_the_absolute_bound_stays_clamped() {
        let mut a = Axis::linear(AxisPosition::Left).with_absolute_range(0.0, 10.0);
        a.include(10.0);
        a.update_actual_max_min();
        assert!(a.actual_minimum >= 0.0);
        assert!(a.actual_maximum <= 10.0);
        assert!(a.actual_maximum > a.actual_minimum);
    }

    #[test]
    fn include_ignores_invalid_values() {
        let mut a = Axis::linear(AxisPosition::Left);
        a.include(f64::NAN);
        a.include(f64::INFINITY);
        a.include(1.0);
        a.include(9.0);
        a.update_actual_max_min();
        assert!(a.actual_minimum <= 1.0 && a.actual_minimum > 0.5);
        assert!(a.actual_maximum >= 9.0 && a.actual_maximum < 9.5);
    }

    #[test]
    fn pan_preserves_span_and_clamps() {
        let mut a = Axis::linear(AxisPosition::Bottom)
            .with_range(0.0, 10.0)
            .with_absolute_range(0.0, 20.0);
        a.update_actual_max_min();
        a.update_transform(area());
        // 400 px wide, 10 units: scale 40 px/unit. Pan +40 px moves -1 unit.
        a.pan(40.0);
        assert!((a.actual_minimum + 1.0).abs() < 1e-9 || a.actual_minimum == 0.0);
        // panning far left clamps to the absolute minimum
        a.pan(10_000.0);
        assert_eq!(a.actual_minimum, 0.0);
        assert!((a.actual_maximum - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_at_keeps_center_value() {
        let mut a = Axis::linear(AxisPosition::Bottom).with_range(0.0, 100.0);
        a.update_actual_max_min();
        a.update_transform(area());
        a.zoom_at(2.0, 50.0);
        assert!((a.actual_minimum - 25.0).abs() < 1e-9);
        assert!((a.actual_maximum - 75.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_auto_range() {
        let mut a = Axis::linear(AxisPosition::Bottom);
        a.include(0.0);
        a.include(10.0);
        a.zoom(2.0, 4.0);
        a.reset();
        a.update_actual_max_min();
        assert!(a.actual_minimum <= 0.0);
        assert!(a.actual_maximum >= 10.0);
    }

    #[test]
    fn actual_range_is_ordered_after_update() {
        let mut a = Axis::linear(AxisPosition::Left).with_range(10.0, 10.0);
        a.update_actual_max_min();
        assert!(a.actual_minimum <= a.actual_maximum);
    }
}
