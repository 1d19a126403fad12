// File: crates/plot-core/src/axis/category.rs
// Summary: Category axis state: labels and the per-category stacking accumulator.

/// State owned by a category axis.
///
/// The accumulator fields (`base_value`, `base_value_screen`, `bar_offset`)
/// are mutated by bar-family series in attachment order during range update
/// and render, and reset exactly once per model update.
#[derive(Clone, Debug, Default)]
pub struct CategoryData {
    /// One label per category; padded with index strings when series carry
    /// more values than labels.
    pub labels: Vec<String>,

    /// Number of visible bar-family series bound to this axis; clustered
    /// series divide the bar width between them.
    pub(crate) attached_series_count: usize,

    /// Running horizontal cursor for clustered (side-by-side) bars,
    /// advanced after each non-stacked series renders.
    pub(crate) bar_offset: f64,

    /// Per-category running stack top in data space (NaN until the first
    /// stacked segment lands).
    pub(crate) base_value: Vec<f64>,

    /// Per-category screen coordinate of the stack top, used to keep
    /// pixel-snapped segments flush.
    pub(crate) base_value_screen: Vec<f64>,

    /// Per-category cumulative extremes for stacked range computation.
    pub(crate) min_value: Vec<f64>,
    pub(crate) max_value: Vec<f64>,
}

impl CategoryData {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            ..Default::default()
        }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Grows the label list to `count` categories (index strings for the
    /// missing ones) and resets the stacking accumulator. Called once per
    /// model update, before any series touches the accumulator.
    pub(crate) fn sync_with_value_count(&mut self, count: usize) {
        while self.labels.len() < count {
            self.labels.push(self.labels.len().to_string());
        }
        let n = self.labels.len();
        self.base_value = vec![f64::NAN; n];
        self.base_value_screen = vec![f64::NAN; n];
        self.min_value = vec![0.0; n];
        self.max_value = vec![0.0; n];
        self.bar_offset = 0.0;
        self.attached_series_count = 0;
    }

    /// Clears the per-render stacking state (stack tops and the clustered
    /// slot cursor) so repeated renders of the same update are identical.
    /// `attached_series_count` is owned by the update pass and survives.
    pub(crate) fn reset_render_accumulator(&mut self) {
        let n = self.labels.len();
        self.base_value = vec![f64::NAN; n];
        self.base_value_screen = vec![f64::NAN; n];
        self.bar_offset = 0.0;
    }

    /// The category label used in tracker text.
    pub(crate) fn label_for(&self, index: usize) -> String {
        self.labels.get(index).cloned().unwrap_or_else(|| index.to_string())
    }
}
