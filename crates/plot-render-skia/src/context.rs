// File: crates/plot-render-skia/src/context.rs
// Summary: RenderContext implementation drawing onto a Skia canvas.

use plot_core::{
    Color, Font, HorizontalAlign, LineJoin, Rect, RenderContext, ScreenPoint, Size, VerticalAlign,
};
use skia_safe as skia;

use crate::text::TextShaper;

pub struct SkiaRenderContext<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
}

impl<'a> SkiaRenderContext<'a> {
    pub fn new(canvas: &'a skia::Canvas, shaper: &'a TextShaper) -> Self {
        Self { canvas, shaper }
    }
}

pub(crate) fn to_skia_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_skia_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_xywh(r.left as f32, r.top as f32, r.width as f32, r.height as f32)
}

fn stroke_paint(
    color: Color,
    thickness: f64,
    dash: Option<&[f64]>,
    join: LineJoin,
    aliased: bool,
) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(!aliased);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_color(to_skia_color(color));
    paint.set_stroke_width(thickness as f32);
    paint.set_stroke_join(match join {
        LineJoin::Miter => skia::paint::Join::Miter,
        LineJoin::Round => skia::paint::Join::Round,
        LineJoin::Bevel => skia::paint::Join::Bevel,
    });
    if let Some(pattern) = dash {
        // Dash arrays arrive in units of line thickness
        let intervals: Vec<f32> = pattern
            .iter()
            .map(|d| (d * thickness.max(1.0)) as f32)
            .collect();
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    paint
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia_color(color));
    paint
}

fn polyline_path(points: &[ScreenPoint], close: bool) -> skia::Path {
    let mut path = skia::Path::new();
    if let Some(first) = points.first() {
        path.move_to((first.x as f32, first.y as f32));
        for p in &points[1..] {
            path.line_to((p.x as f32, p.y as f32));
        }
        if close {
            path.close();
        }
    }
    path
}

impl RenderContext for SkiaRenderContext<'_> {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    ) {
        if points.len() < 2 || thickness <= 0.0 {
            return;
        }
        let path = polyline_path(points, false);
        let paint = stroke_paint(stroke, thickness, dash, join, aliased);
        self.canvas.draw_path(&path, &paint);
    }

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        stroke: Option<Color>,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    ) {
        if points.len() < 3 {
            return;
        }
        let path = polyline_path(points, true);
        if let Some(color) = fill {
            self.canvas.draw_path(&path, &fill_paint(color));
        }
        if let Some(color) = stroke {
            if thickness > 0.0 {
                let paint = stroke_paint(color, thickness, dash, join, aliased);
                self.canvas.draw_path(&path, &paint);
            }
        }
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64) {
        let oval = to_skia_rect(rect);
        if let Some(color) = fill {
            self.canvas.draw_oval(oval, &fill_paint(color));
        }
        if let Some(color) = stroke {
            if thickness > 0.0 {
                let paint = stroke_paint(color, thickness, None, LineJoin::Miter, false);
                self.canvas.draw_oval(oval, &paint);
            }
        }
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64) {
        let r = to_skia_rect(rect);
        if let Some(color) = fill {
            self.canvas.draw_rect(r, &fill_paint(color));
        }
        if let Some(color) = stroke {
            if thickness > 0.0 {
                let paint = stroke_paint(color, thickness, None, LineJoin::Miter, false);
                self.canvas.draw_rect(r, &paint);
            }
        }
    }

    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        color: Color,
        font: &Font,
        rotation: f64,
        halign: HorizontalAlign,
        valign: VerticalAlign,
    ) {
        let paragraph = self.shaper.layout(text, font, to_skia_color(color));
        let width = paragraph.longest_line();
        let height = paragraph.height();
        let dx = match halign {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => -width * 0.5,
            HorizontalAlign::Right => -width,
        };
        let dy = match valign {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => -height * 0.5,
            VerticalAlign::Bottom => -height,
        };

        self.canvas.save();
        self.canvas.translate((position.x as f32, position.y as f32));
        if rotation != 0.0 {
            self.canvas.rotate(rotation as f32, None);
        }
        paragraph.paint(self.canvas, (dx, dy));
        self.canvas.restore();
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        let (w, h) = self.shaper.measure(text, font);
        Size::new(f64::from(w), f64::from(h))
    }
}
