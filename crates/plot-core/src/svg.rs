// File: crates/plot-core/src/svg.rs
// Summary: Render context that writes SVG markup, and the file exporter on top.

use std::io::Write;

use crate::error::Result;
use crate::geometry::{Rect, ScreenPoint, Size};
use crate::model::PlotModel;
use crate::render::RenderContext;
use crate::types::{Color, Font, HorizontalAlign, LineJoin, VerticalAlign};

// Width heuristic for a proportional font, in em per character. Used when
// there is no real text engine behind the context.
const CHAR_WIDTH_EM: f64 = 0.6;

fn num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds an SVG fragment (or document) from render calls.
///
/// Text measurement is a character-count heuristic, which is what keeps this
/// backend free of font dependencies; layout done here matches what a browser
/// shows to within a few pixels for common fonts.
pub struct SvgRenderContext {
    width: f64,
    height: f64,
    body: String,
}

impl SvgRenderContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// The complete markup. `is_document` adds the XML prolog so the output
    /// stands alone as an .svg file.
    pub fn to_svg(&self, is_document: bool) -> String {
        let mut out = String::new();
        if is_document {
            out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        }
        out.push_str(&format!(
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            w = num(self.width),
            h = num(self.height),
        ));
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn push_stroke_attrs(
        attrs: &mut String,
        stroke: Color,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    ) {
        attrs.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke.to_hex(),
            num(thickness)
        ));
        if stroke.opacity() < 1.0 {
            attrs.push_str(&format!(" stroke-opacity=\"{}\"", num(stroke.opacity())));
        }
        if let Some(dash) = dash {
            // dash arrays are specified in thickness units
            let scaled: Vec<String> = dash.iter().map(|d| num(d * thickness)).collect();
            attrs.push_str(&format!(" stroke-dasharray=\"{}\"", scaled.join(",")));
        }
        let join = match join {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        };
        attrs.push_str(&format!(" stroke-linejoin=\"{join}\""));
        if aliased {
            attrs.push_str(" shape-rendering=\"crispEdges\"");
        }
    }

    fn fill_attr(fill: Option<Color>) -> String {
        match fill {
            Some(c) if c.opacity() < 1.0 => {
                format!(" fill=\"{}\" fill-opacity=\"{}\"", c.to_hex(), num(c.opacity()))
            }
            Some(c) => format!(" fill=\"{}\"", c.to_hex()),
            None => " fill=\"none\"".to_string(),
        }
    }

    fn points_attr(points: &[ScreenPoint]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RenderContext for SvgRenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    ) {
        if points.len() < 2 {
            return;
        }
        let mut attrs = String::from(" fill=\"none\"");
        Self::push_stroke_attrs(&mut attrs, stroke, thickness, dash, join, aliased);
        self.body.push_str(&format!(
            "<polyline points=\"{}\"{attrs}/>\n",
            Self::points_attr(points)
        ));
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
        let mut attrs = Self::fill_attr(fill);
        if let Some(stroke) = stroke {
            Self::push_stroke_attrs(&mut attrs, stroke, thickness, dash, join, aliased);
        }
        self.body.push_str(&format!(
            "<polygon points=\"{}\"{attrs}/>\n",
            Self::points_attr(points)
        ));
    }

    fn draw_ellipse(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64) {
        let mut attrs = Self::fill_attr(fill);
        if let Some(stroke) = stroke {
            Self::push_stroke_attrs(&mut attrs, stroke, thickness, None, LineJoin::Miter, false);
        }
        self.body.push_str(&format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>\n",
            num(rect.left + rect.width * 0.5),
            num(rect.top + rect.height * 0.5),
            num(rect.width * 0.5),
            num(rect.height * 0.5),
        ));
    }

    fn draw_rectangle(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64) {
        let mut attrs = Self::fill_attr(fill);
        if let Some(stroke) = stroke {
            Self::push_stroke_attrs(&mut attrs, stroke, thickness, None, LineJoin::Miter, true);
        }
        self.body.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>\n",
            num(rect.left),
            num(rect.top),
            num(rect.width),
            num(rect.height),
        ));
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
        if text.is_empty() {
            return;
        }
        let anchor = match halign {
            HorizontalAlign::Left => "start",
            HorizontalAlign::Center => "middle",
            HorizontalAlign::Right => "end",
        };
        // dy shifts the baseline to fake vertical alignment
        let dy = match valign {
            VerticalAlign::Top => font.size * 0.9,
            VerticalAlign::Middle => font.size * 0.35,
            VerticalAlign::Bottom => 0.0,
        };
        let transform = if rotation != 0.0 {
            format!(
                " transform=\"rotate({} {} {})\"",
                num(rotation),
                num(position.x),
                num(position.y)
            )
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" dy=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\"{transform}>{}</text>\n",
            num(position.x),
            num(position.y),
            num(dy),
            escape(&font.family),
            num(font.size),
            font.weight.to_css(),
            color.to_hex(),
            escape(text),
        ));
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        Size::new(
            text.chars().count() as f64 * font.size * CHAR_WIDTH_EM,
            font.size,
        )
    }
}

/// Renders a model to SVG markup.
pub struct SvgExporter;

impl SvgExporter {
    /// Renders `model` at the given size. `is_document` includes the XML
    /// prolog for standalone .svg files; omit it when inlining into HTML.
    pub fn export_to_string(
        model: &mut PlotModel,
        width: f64,
        height: f64,
        is_document: bool,
    ) -> Result<String> {
        let mut rc = SvgRenderContext::new(width, height);
        model.render(&mut rc, width, height)?;
        Ok(rc.to_svg(is_document))
    }

    /// Renders `model` and writes a standalone document to `writer`.
    pub fn export(
        model: &mut PlotModel,
        width: f64,
        height: f64,
        writer: &mut impl Write,
    ) -> Result<()> {
        let svg = Self::export_to_string(model, width, height, true)?;
        writer.write_all(svg.as_bytes())?;
        Ok(())
    }
}
