// File: crates/plot-core/src/lib.rs
// Summary: Core library entry point; exports the public API for plot construction and export.

pub mod annotation;
pub mod axis;
pub mod error;
pub mod geometry;
pub mod model;
pub mod render;
pub mod series;
pub mod svg;
pub mod types;

pub use annotation::{Annotation, GuideLine, LineAnnotation, TextAnnotation};
pub use axis::{Axis, AxisKind, AxisPosition, CategoryData};
pub use error::{PlotError, Result};
pub use geometry::{DataPoint, Rect, ScreenPoint, ScreenVector, Size, Thickness};
pub use model::{PlotModel, PlotType};
pub use render::RenderContext;
pub use series::{
    BarOrientation, BarSeries, ContourSeries, LineSeries, MarkerType, ScatterSeries, Series,
    TrackerHit,
};
pub use svg::{SvgExporter, SvgRenderContext};
pub use types::{
    default_palette, Color, Font, FontWeight, HorizontalAlign, LineJoin, LineStyle, VerticalAlign,
};
