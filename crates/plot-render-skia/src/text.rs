// File: crates/plot-render-skia/src/text.rs
// Summary: Text shaper over Skia textlayout with family fallback defaults.

use plot_core::{Font, FontWeight};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &Font, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size((font.size as f32).max(1.0));
        ts.set_color(color);
        let weight = match font.weight {
            FontWeight::Normal => skia::font_style::Weight::NORMAL,
            FontWeight::Bold => skia::font_style::Weight::BOLD,
        };
        ts.set_font_style(skia::FontStyle::new(
            weight,
            skia::font_style::Width::NORMAL,
            skia::font_style::Slant::Upright,
        ));
        // The requested family first, then platform-spanning fallbacks
        ts.set_font_families(&[
            font.family.as_str(),
            "Segoe UI",
            "Arial",
            "Helvetica",
            "Roboto",
            "DejaVu Sans",
            "sans-serif",
        ]);
        ts
    }

    pub fn layout(&self, text: &str, font: &Font, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(font, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Width of the longest line and total height, in pixels.
    pub fn measure(&self, text: &str, font: &Font) -> (f32, f32) {
        let p = self.layout(text, font, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line(), p.height())
    }
}
