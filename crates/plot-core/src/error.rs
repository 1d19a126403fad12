// File: crates/plot-core/src/error.rs
// Summary: Library error type; configuration errors are fatal, bad data is tolerated upstream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// A bar series was rendered or range-updated without a resolvable
    /// category axis.
    #[error("no category axis defined for bar series")]
    NoCategoryAxis,

    /// A bar series resolved a category axis but no value axis.
    #[error("no value axis defined for bar series")]
    NoValueAxis,

    /// A series operation ran before the model assigned its axes.
    #[error("series has no resolved {0} axis (model update has not run)")]
    MissingAxis(&'static str),

    /// `update` was called from within an `update` already in progress.
    #[error("re-entrant call to PlotModel::update")]
    ReentrantUpdate,

    /// A contour series has no data grid or mismatched coordinate vectors.
    #[error("contour grid is empty or inconsistent: {0}")]
    InvalidGrid(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;
