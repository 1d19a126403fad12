// File: crates/plot-core/src/types.rs
// Summary: Shared style types (colors, line styles, fonts, alignment).

/// An RGBA color with 8 bits per channel.
///
/// Absent fill/stroke is expressed as `Option<Color>`, never a sentinel
/// color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const ORANGE: Color = Color::from_rgb(255, 165, 0);
    pub const YELLOW: Color = Color::from_rgb(255, 255, 0);
    pub const GREEN: Color = Color::from_rgb(0, 128, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const INDIGO: Color = Color::from_rgb(75, 0, 130);
    pub const VIOLET: Color = Color::from_rgb(238, 130, 238);
    pub const GRAY: Color = Color::from_rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::from_rgb(211, 211, 211);

    /// Hex string for SVG (`#rrggbb`).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opacity in [0, 1] for SVG attributes.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// Default series palette, assigned in attachment order to series
/// without an explicit color.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::from_rgb(0x4e, 0x9a, 0x06),
        Color::from_rgb(0xc8, 0x8d, 0x00),
        Color::from_rgb(0xcc, 0x00, 0x00),
        Color::from_rgb(0x20, 0x4a, 0x87),
        Color::RED,
        Color::ORANGE,
        Color::YELLOW,
        Color::GREEN,
        Color::BLUE,
        Color::INDIGO,
        Color::VIOLET,
    ]
}

/// Stroke dash pattern presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    None,
}

impl LineStyle {
    /// Dash array in units of line thickness, or `None` for a solid stroke.
    pub fn dash_array(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid | LineStyle::None => None,
            LineStyle::Dash => Some(&[4.0, 1.0]),
            LineStyle::Dot => Some(&[1.0, 1.0]),
            LineStyle::DashDot => Some(&[4.0, 1.0, 1.0, 1.0]),
            LineStyle::DashDotDot => Some(&[4.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
        }
    }

    /// The cycle used by the default line-style cursor. `None` is excluded.
    pub(crate) const CYCLE: [LineStyle; 5] = [
        LineStyle::Solid,
        LineStyle::Dash,
        LineStyle::Dot,
        LineStyle::DashDot,
        LineStyle::DashDotDot,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn to_css(&self) -> u32 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Bold => 700,
        }
    }
}

/// Font request passed to the render context.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64, weight: FontWeight) -> Self {
        Self {
            family: family.into(),
            size,
            weight,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 12.0, FontWeight::Normal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(Color::from_rgb(0x4e, 0x9a, 0x06).to_hex(), "#4e9a06");
    }

    #[test]
    fn palette_has_eleven_entries() {
        assert_eq!(default_palette().len(), 11);
    }
}
