// File: crates/plot-core/tests/common/mod.rs
// Purpose: Recording render context for primitive-level assertions.

use plot_core::{
    Color, Font, HorizontalAlign, LineJoin, Rect, RenderContext, ScreenPoint, Size, VerticalAlign,
};

#[derive(Clone, Debug)]
pub enum Op {
    Line {
        points: Vec<ScreenPoint>,
        stroke: Color,
    },
    Polygon {
        points: Vec<ScreenPoint>,
        fill: Option<Color>,
    },
    Ellipse {
        rect: Rect,
        fill: Option<Color>,
    },
    Rectangle {
        rect: Rect,
        fill: Option<Color>,
    },
    Text {
        position: ScreenPoint,
        text: String,
    },
}

/// Records every primitive instead of drawing; text measurement uses the
/// same character heuristic as the SVG backend.
#[derive(Default)]
pub struct RecordingContext {
    pub ops: Vec<Op>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bounding boxes of filled polygons with the given fill color.
    pub fn filled_polygon_bounds(&self, color: Color) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Polygon {
                    points,
                    fill: Some(f),
                } if *f == color => Some(bounds(points)),
                _ => None,
            })
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Line { .. }))
            .count()
    }
}

pub fn bounds(points: &[ScreenPoint]) -> Rect {
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

impl RenderContext for RecordingContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        _thickness: f64,
        _dash: Option<&[f64]>,
        _join: LineJoin,
        _aliased: bool,
    ) {
        self.ops.push(Op::Line {
            points: points.to_vec(),
            stroke,
        });
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        _stroke: Option<Color>,
        _thickness: f64,
        _dash: Option<&[f64]>,
        _join: LineJoin,
        _aliased: bool,
    ) {
        self.ops.push(Op::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Option<Color>, _stroke: Option<Color>, _thickness: f64) {
        self.ops.push(Op::Ellipse { rect, fill });
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Option<Color>, _stroke: Option<Color>, _thickness: f64) {
        self.ops.push(Op::Rectangle { rect, fill });
    }

    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        _color: Color,
        _font: &Font,
        _rotation: f64,
        _halign: HorizontalAlign,
        _valign: VerticalAlign,
    ) {
        self.ops.push(Op::Text {
            position,
            text: text.to_string(),
        });
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        Size::new(text.chars().count() as f64 * font.size * 0.6, font.size)
    }
}
