// File: crates/plot-core/src/annotation.rs
// Summary: Text and guide-line annotations drawn over the plot area.

use crate::axis::{transform_point, Axis};
use crate::geometry::{DataPoint, Rect, ScreenPoint};
use crate::render::{draw_clipped_line, RenderContext};
use crate::types::{Color, Font, FontWeight, HorizontalAlign, LineJoin, LineStyle, VerticalAlign};

/// A guide line in data space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GuideLine {
    /// Horizontal line at a y value.
    Horizontal(f64),
    /// Vertical line at an x value.
    Vertical(f64),
    /// `y = slope * x + intercept`, spanning the visible x range.
    Slope { slope: f64, intercept: f64 },
}

#[derive(Clone, Debug)]
pub struct LineAnnotation {
    pub line: GuideLine,
    pub color: Color,
    pub stroke_thickness: f64,
    pub line_style: LineStyle,
    /// Optional caption drawn near the end of the line.
    pub text: Option<String>,
}

impl LineAnnotation {
    pub fn horizontal(y: f64) -> Self {
        Self {
            line: GuideLine::Horizontal(y),
            color: Color::from_rgb(0x60, 0x60, 0x60),
            stroke_thickness: 1.0,
            line_style: LineStyle::Dash,
            text: None,
        }
    }

    pub fn vertical(x: f64) -> Self {
        Self {
            line: GuideLine::Vertical(x),
            ..Self::horizontal(0.0)
        }
    }

    pub fn slope(slope: f64, intercept: f64) -> Self {
        Self {
            line: GuideLine::Slope { slope, intercept },
            ..Self::horizontal(0.0)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct TextAnnotation {
    /// Anchor in data space.
    pub position: DataPoint,
    pub text: String,
    pub color: Color,
    pub font_size: f64,
    pub rotation: f64,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Fill drawn behind the text (unrotated).
    pub background: Option<Color>,
}

impl TextAnnotation {
    pub fn new(position: DataPoint, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            color: Color::BLACK,
            font_size: 12.0,
            rotation: 0.0,
            horizontal_align: HorizontalAlign::Center,
            vertical_align: VerticalAlign::Middle,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }
}

pub enum Annotation {
    Line(LineAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    pub(crate) fn render(
        &self,
        rc: &mut dyn RenderContext,
        x_axis: &Axis,
        y_axis: &Axis,
        plot_area: Rect,
        font_family: &str,
    ) {
        match self {
            Annotation::Line(a) => {
                let (p0, p1) = match a.line {
                    GuideLine::Horizontal(y) => {
                        let s = y_axis.transform(y);
                        (
                            ScreenPoint::new(plot_area.left, s),
                            ScreenPoint::new(plot_area.right(), s),
                        )
                    }
                    GuideLine::Vertical(x) => {
                        let s = x_axis.transform(x);
                        (
                            ScreenPoint::new(s, plot_area.top),
                            ScreenPoint::new(s, plot_area.bottom()),
                        )
                    }
                    GuideLine::Slope { slope, intercept } => {
                        let x0 = x_axis.actual_minimum;
                        let x1 = x_axis.actual_maximum;
                        (
                            transform_point(x0, slope * x0 + intercept, x_axis, y_axis),
                            transform_point(x1, slope * x1 + intercept, x_axis, y_axis),
                        )
                    }
                };
                draw_clipped_line(
                    rc,
                    &[p0, p1],
                    plot_area,
                    a.color,
                    a.stroke_thickness,
                    a.line_style.dash_array(),
                    LineJoin::Miter,
                    true,
                );
                if let Some(text) = &a.text {
                    let font = Font::new(font_family, 11.0, FontWeight::Normal);
                    let (pos, halign, valign) = match a.line {
                        GuideLine::Horizontal(_) | GuideLine::Slope { .. } => (
                            ScreenPoint::new(p1.x - 4.0, p1.y - 4.0),
                            HorizontalAlign::Right,
                            VerticalAlign::Bottom,
                        ),
                        GuideLine::Vertical(_) => (
                            ScreenPoint::new(p0.x + 4.0, p0.y + 4.0),
                            HorizontalAlign::Left,
                            VerticalAlign::Top,
                        ),
                    };
                    rc.draw_text(pos, text, a.color, &font, 0.0, halign, valign);
                }
            }
            Annotation::Text(a) => {
                let pos = transform_point(a.position.x, a.position.y, x_axis, y_axis);
                let font = Font::new(font_family, a.font_size, FontWeight::Normal);
                if let Some(bg) = a.background {
                    let size = rc.measure_text(&a.text, &font);
                    let left = match a.horizontal_align {
                        HorizontalAlign::Left => pos.x,
                        HorizontalAlign::Center => pos.x - size.width * 0.5,
                        HorizontalAlign::Right => pos.x - size.width,
                    };
                    let top = match a.vertical_align {
                        VerticalAlign::Top => pos.y,
                        VerticalAlign::Middle => pos.y - size.height * 0.5,
                        VerticalAlign::Bottom => pos.y - size.height,
                    };
                    rc.draw_rectangle(
                        Rect::new(left - 2.0, top - 2.0, size.width + 4.0, size.height + 4.0),
                        Some(bg),
                        None,
                        0.0,
                    );
                }
                rc.draw_text(
                    pos,
                    &a.text,
                    a.color,
                    &font,
                    a.rotation,
                    a.horizontal_align,
                    a.vertical_align,
                );
            }
        }
    }
}
