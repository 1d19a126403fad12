// File: crates/plot-core/src/geometry.rs
// Summary: Geometric value types shared by the whole library (data/screen points, rects).

/// A point in data space.
///
/// `DataPoint::UNDEFINED` is a sentinel meaning "break the series here";
/// line series render a gap at an undefined point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    /// Sentinel marking a break in a series.
    pub const UNDEFINED: DataPoint = DataPoint {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point is defined when both coordinates are finite.
    pub fn is_defined(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in device pixel space. Purely derived, never authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        self.distance_to_squared(other).sqrt()
    }

    pub fn distance_to_squared(&self, other: ScreenPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A displacement in device pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScreenVector {
    pub x: f64,
    pub y: f64,
}

impl ScreenVector {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a normalized rectangle from two corner points, regardless of
    /// which corner comes first.
    pub fn from_points(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Shrinks the rectangle by a thickness on each side.
    pub fn deflate(&self, t: Thickness) -> Self {
        Self {
            left: self.left + t.left,
            top: self.top + t.top,
            width: (self.width - t.left - t.right).max(0.0),
            height: (self.height - t.top - t.bottom).max(0.0),
        }
    }
}

/// Per-side spacing, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
}

/// A width/height pair, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_points_normalizes() {
        let a = Rect::from_points(10.0, 20.0, 2.0, 4.0);
        let b = Rect::from_points(2.0, 4.0, 10.0, 20.0);
        assert_eq!(a, b);
        assert_eq!(a.left, 2.0);
        assert_eq!(a.top, 4.0);
        assert_eq!(a.right(), 10.0);
        assert_eq!(a.bottom(), 20.0);
    }

    #[test]
    fn undefined_point_is_not_defined() {
        assert!(!DataPoint::UNDEFINED.is_defined());
        assert!(!DataPoint::new(f64::INFINITY, 0.0).is_defined());
        assert!(DataPoint::new(0.0, 0.0).is_defined());
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(10.1, 5.0));
    }
}
