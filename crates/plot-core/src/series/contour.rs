// File: crates/plot-core/src/series/contour.rs
// Summary: Iso-line series over a 2D grid (marching-triangles cell walk).

use crate::axis::{tick, transform_point, Axis};
use crate::error::{PlotError, Result};
use crate::geometry::{DataPoint, Rect, ScreenPoint};
use crate::render::{draw_clipped_line, RenderContext};
use crate::series::{nearest_on_segments, TrackerHit};
use crate::types::{Color, Font, FontWeight, HorizontalAlign, LineStyle, VerticalAlign};

type GridSource = Box<dyn Fn() -> Vec<Vec<f64>> + Send>;

/// One joined iso-line at a single level.
#[derive(Clone, Debug)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<DataPoint>,
}

/// Iso-lines of `data[row][col]` sampled at `row_coordinates` (y) by
/// `column_coordinates` (x).
pub struct ContourSeries {
    pub title: Option<String>,
    pub is_visible: bool,
    pub x_axis_key: Option<String>,
    pub y_axis_key: Option<String>,
    pub(crate) x_axis: Option<usize>,
    pub(crate) y_axis: Option<usize>,

    /// Grid values, one inner vec per row.
    pub data: Vec<Vec<f64>>,
    /// Y coordinate of each row.
    pub row_coordinates: Vec<f64>,
    /// X coordinate of each column.
    pub column_coordinates: Vec<f64>,
    source: Option<GridSource>,

    /// Explicit levels; when empty they are derived from the data range.
    pub contour_levels: Vec<f64>,
    /// Level spacing for derived levels; NaN picks a nice step for ~10 lines.
    pub contour_level_step: f64,

    /// None means "assign from the model palette on update".
    pub color: Option<Color>,
    pub stroke_thickness: f64,
    pub line_style: LineStyle,
    /// Draw the level value at the midpoint of each iso-line.
    pub label_contours: bool,
    pub font_size: f64,

    pub(crate) contours: Vec<Contour>,
    pub(crate) min_x: f64,
    pub(crate) max_x: f64,
    pub(crate) min_y: f64,
    pub(crate) max_y: f64,
}

impl Default for ContourSeries {
    fn default() -> Self {
        Self {
            title: None,
            is_visible: true,
            x_axis_key: None,
            y_axis_key: None,
            x_axis: None,
            y_axis: None,
            data: Vec::new(),
            row_coordinates: Vec::new(),
            column_coordinates: Vec::new(),
            source: None,
            contour_levels: Vec::new(),
            contour_level_step: f64::NAN,
            color: None,
            stroke_thickness: 1.0,
            line_style: LineStyle::Solid,
            label_contours: false,
            font_size: 10.0,
            contours: Vec::new(),
            min_x: f64::NAN,
            max_x: f64::NAN,
            min_y: f64::NAN,
            max_y: f64::NAN,
        }
    }
}

impl ContourSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(rows: Vec<f64>, columns: Vec<f64>, data: Vec<Vec<f64>>) -> Self {
        Self {
            row_coordinates: rows,
            column_coordinates: columns,
            data,
            ..Self::default()
        }
    }

    /// Samples `f(x, y)` over the given coordinate vectors.
    pub fn from_function(
        f: impl Fn(f64, f64) -> f64,
        rows: Vec<f64>,
        columns: Vec<f64>,
    ) -> Self {
        let data = rows
            .iter()
            .map(|&y| columns.iter().map(|&x| f(x, y)).collect())
            .collect();
        Self::with_grid(rows, columns, data)
    }

    pub fn with_source(mut self, source: impl Fn() -> Vec<Vec<f64>> + Send + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_levels(mut self, levels: Vec<f64>) -> Self {
        self.contour_levels = levels;
        self
    }

    /// Joined iso-lines from the last update.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub(crate) fn update_data(&mut self) -> Result<()> {
        if let Some(source) = &self.source {
            self.data = source();
        }
        self.validate_grid()?;
        self.calculate_contours();
        Ok(())
    }

    /// An empty grid is fine (nothing to draw); a grid whose shape does not
    /// match the coordinate vectors is a configuration error.
    fn validate_grid(&self) -> Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        if self.data.len() != self.row_coordinates.len() {
            return Err(PlotError::InvalidGrid(format!(
                "{} data rows but {} row coordinates",
                self.data.len(),
                self.row_coordinates.len()
            )));
        }
        for (j, row) in self.data.iter().enumerate() {
            if row.len() != self.column_coordinates.len() {
                return Err(PlotError::InvalidGrid(format!(
                    "row {} has {} values but there are {} column coordinates",
                    j,
                    row.len(),
                    self.column_coordinates.len()
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn update_max_min(&mut self) {
        self.min_x = self.column_coordinates.iter().copied().fold(f64::NAN, f64::min);
        self.max_x = self.column_coordinates.iter().copied().fold(f64::NAN, f64::max);
        self.min_y = self.row_coordinates.iter().copied().fold(f64::NAN, f64::min);
        self.max_y = self.row_coordinates.iter().copied().fold(f64::NAN, f64::max);
    }

    fn actual_levels(&self) -> Vec<f64> {
        if !self.contour_levels.is_empty() {
            return self.contour_levels.clone();
        }
        let mut lo = f64::NAN;
        let mut hi = f64::NAN;
        for row in &self.data {
            for &v in row {
                if v.is_finite() {
                    lo = if lo.is_nan() { v } else { lo.min(v) };
                    hi = if hi.is_nan() { v } else { hi.max(v) };
                }
            }
        }
        if !(hi > lo) {
            return Vec::new();
        }
        let step = if self.contour_level_step.is_finite() && self.contour_level_step > 0.0 {
            self.contour_level_step
        } else {
            tick::nice_step((hi - lo) / 10.0)
        };
        let mut levels = Vec::new();
        let mut level = (lo / step).ceil() * step;
        while level <= hi {
            levels.push(level);
            level += step;
        }
        levels
    }

    fn calculate_contours(&mut self) {
        self.contours.clear();
        let levels = self.actual_levels();
        if levels.is_empty()
            || self.row_coordinates.len() < 2
            || self.column_coordinates.len() < 2
        {
            return;
        }
        let mut segments: Vec<Vec<(DataPoint, DataPoint)>> = vec![Vec::new(); levels.len()];
        conrec(
            &self.data,
            &self.row_coordinates,
            &self.column_coordinates,
            &levels,
            &mut |li, a, b| segments[li].push((a, b)),
        );

        let x_span = self.column_coordinates.last().unwrap() - self.column_coordinates[0];
        let y_span = self.row_coordinates.last().unwrap() - self.row_coordinates[0];
        let eps = 1e-6 * (x_span.abs() + y_span.abs()).max(1.0);

        for (li, segs) in segments.into_iter().enumerate() {
            for points in join_segments(segs, eps) {
                self.contours.push(Contour {
                    level: levels[li],
                    points,
                });
            }
        }
    }

    pub(crate) fn render(
        &mut self,
        rc: &mut dyn RenderContext,
        axes: &mut [Axis],
        plot_area: Rect,
    ) -> Result<()> {
        let (Some(xi), Some(yi)) = (self.x_axis, self.y_axis) else {
            return Ok(());
        };
        let x_axis = &axes[xi];
        let y_axis = &axes[yi];
        let color = self.color.unwrap_or(Color::BLACK);

        for contour in &self.contours {
            let screen: Vec<ScreenPoint> = contour
                .points
                .iter()
                .map(|p| transform_point(p.x, p.y, x_axis, y_axis))
                .collect();
            draw_clipped_line(
                rc,
                &screen,
                plot_area,
                color,
                self.stroke_thickness,
                self.line_style.dash_array(),
                crate::types::LineJoin::Bevel,
                false,
            );
            if self.label_contours && !screen.is_empty() {
                let mid = screen[screen.len() / 2];
                if plot_area.contains(mid.x, mid.y) {
                    let font = Font::new("sans-serif", self.font_size, FontWeight::Normal);
                    rc.draw_text(
                        mid,
                        &tick::format_number(contour.level, self.contour_level_step),
                        color,
                        &font,
                        0.0,
                        HorizontalAlign::Center,
                        VerticalAlign::Middle,
                    );
                }
            }
        }
        Ok(())
    }

    pub(crate) fn render_legend_symbol(&self, rc: &mut dyn RenderContext, symbol_box: Rect) {
        let y = symbol_box.top + symbol_box.height * 0.5;
        rc.draw_line(
            &[
                ScreenPoint::new(symbol_box.left, y),
                ScreenPoint::new(symbol_box.right(), y),
            ],
            self.color.unwrap_or(Color::BLACK),
            self.stroke_thickness,
            self.line_style.dash_array(),
            crate::types::LineJoin::Miter,
            false,
        );
    }

    pub(crate) fn get_nearest_point(
        &self,
        point: ScreenPoint,
        interpolate: bool,
        axes: &[Axis],
    ) -> Option<TrackerHit> {
        let (xi, yi) = (self.x_axis?, self.y_axis?);
        let x_axis = &axes[xi];
        let y_axis = &axes[yi];
        let mut best: Option<(f64, DataPoint, ScreenPoint, f64)> = None;
        for contour in &self.contours {
            let candidate = if interpolate {
                nearest_on_segments(&contour.points, point, x_axis, y_axis)
            } else {
                crate::series::nearest_vertex(&contour.points, point, x_axis, y_axis)
                    .map(|(i, sp, d2)| (contour.points[i], sp, d2))
            };
            if let Some((dp, sp, d2)) = candidate {
                if best.map_or(true, |(_, _, _, bd)| d2 < bd) {
                    best = Some((contour.level, dp, sp, d2));
                }
            }
        }
        let (level, dp, sp, _) = best?;
        Some(TrackerHit {
            data_point: dp,
            position: sp,
            text: match &self.title {
                Some(t) => format!("{t}\nlevel {level}\nX: {}\nY: {}", dp.x, dp.y),
                None => format!("level {level}\nX: {}\nY: {}", dp.x, dp.y),
            },
        })
    }
}

// Case table for the four triangles of a grid cell, indexed by the signs of
// the level-relative values at (m1, center, m3).
const CASTAB: [[[u8; 3]; 3]; 3] = [
    [[0, 0, 8], [0, 2, 5], [7, 6, 9]],
    [[0, 3, 4], [1, 3, 1], [4, 3, 0]],
    [[9, 6, 7], [5, 2, 0], [8, 0, 0]],
];

/// Walks every grid cell and emits one line segment per triangle crossed by
/// each level: `emit(level_index, a, b)`.
fn conrec(
    data: &[Vec<f64>],
    rows: &[f64],
    columns: &[f64],
    levels: &[f64],
    emit: &mut impl FnMut(usize, DataPoint, DataPoint),
) {
    let sign = |v: f64| -> usize {
        if v > 0.0 {
            2
        } else if v < 0.0 {
            0
        } else {
            1
        }
    };

    for j in 0..rows.len().saturating_sub(1) {
        for i in 0..columns.len().saturating_sub(1) {
            // corner order: (i,j) (i+1,j) (i+1,j+1) (i,j+1)
            let im = [i, i + 1, i + 1, i];
            let jm = [j, j, j + 1, j + 1];
            let corners: Vec<f64> = (0..4).map(|m| data[jm[m]][im[m]]).collect();
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let dmin = corners.iter().copied().fold(f64::INFINITY, f64::min);
            let dmax = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            for (li, &level) in levels.iter().enumerate() {
                if level < dmin || level > dmax {
                    continue;
                }
                // h[1..=4] are the corners, h[0] the cell center.
                let mut h = [0.0f64; 5];
                let mut xh = [0.0f64; 5];
                let mut yh = [0.0f64; 5];
                for m in 1..=4 {
                    h[m] = corners[m - 1] - level;
                    xh[m] = columns[im[m - 1]];
                    yh[m] = rows[jm[m - 1]];
                }
                h[0] = 0.25 * (h[1] + h[2] + h[3] + h[4]);
                xh[0] = 0.5 * (columns[i] + columns[i + 1]);
                yh[0] = 0.5 * (rows[j] + rows[j + 1]);

                let sect = |p1: usize, p2: usize| -> DataPoint {
                    DataPoint::new(
                        (h[p2] * xh[p1] - h[p1] * xh[p2]) / (h[p2] - h[p1]),
                        (h[p2] * yh[p1] - h[p1] * yh[p2]) / (h[p2] - h[p1]),
                    )
                };
                let vertex = |p: usize| DataPoint::new(xh[p], yh[p]);

                for m in 1..=4 {
                    let m1 = m;
                    let m2 = 0;
                    let m3 = if m == 4 { 1 } else { m + 1 };
                    let case = CASTAB[sign(h[m1])][sign(h[m2])][sign(h[m3])];
                    let seg = match case {
                        1 => Some((vertex(m1), vertex(m2))),
                        2 => Some((vertex(m2), vertex(m3))),
                        3 => Some((vertex(m3), vertex(m1))),
                        4 => Some((vertex(m1), sect(m2, m3))),
                        5 => Some((vertex(m2), sect(m3, m1))),
                        6 => Some((vertex(m3), sect(m1, m2))),
                        7 => Some((sect(m1, m2), sect(m2, m3))),
                        8 => Some((sect(m2, m3), sect(m3, m1))),
                        9 => Some((sect(m3, m1), sect(m1, m2))),
                        _ => None,
                    };
                    if let Some((a, b)) = seg {
                        emit(li, a, b);
                    }
                }
            }
        }
    }
}

/// Chains raw segments into polylines, matching endpoints within `eps`.
fn join_segments(mut segments: Vec<(DataPoint, DataPoint)>, eps: f64) -> Vec<Vec<DataPoint>> {
    let close = |a: DataPoint, b: DataPoint| (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps;
    let mut result = Vec::new();

    while let Some((a, b)) = segments.pop() {
        let mut line = vec![a, b];
        loop {
            let head = line[0];
            let tail = *line.last().unwrap();
            let mut extended = false;
            let mut k = 0;
            while k < segments.len() {
                let (p, q) = segments[k];
                if close(tail, p) {
                    line.push(q);
                } else if close(tail, q) {
                    line.push(p);
                } else if close(head, p) {
                    line.insert(0, q);
                } else if close(head, q) {
                    line.insert(0, p);
                } else {
                    k += 1;
                    continue;
                }
                segments.swap_remove(k);
                extended = true;
            }
            if !extended {
                break;
            }
        }
        result.push(line);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // f(x, y) = x on a unit grid: the level-0.5 iso-line is the vertical x = 0.5.
    fn ramp() -> ContourSeries {
        ContourSeries::from_function(|x, _| x, vec![0.0, 1.0], vec![0.0, 1.0])
            .with_levels(vec![0.5])
    }

    #[test]
    fn ramp_produces_vertical_iso_line() {
        let mut s = ramp();
        s.update_data().unwrap();
        assert_eq!(s.contours.len(), 1);
        let c = &s.contours[0];
        assert_eq!(c.level, 0.5);
        assert!(c.points.iter().all(|p| (p.x - 0.5).abs() < 1e-9));
        let ys: Vec<f64> = c.points.iter().map(|p| p.y).collect();
        assert!(ys.iter().copied().fold(f64::INFINITY, f64::min) < 1e-9);
        assert!(ys.iter().copied().fold(f64::NEG_INFINITY, f64::max) > 1.0 - 1e-9);
    }

    #[test]
    fn levels_derive_from_data_range_when_unset() {
        let mut s = ContourSeries::from_function(
            |x, y| x + y,
            (0..5).map(f64::from).collect(),
            (0..5).map(f64::from).collect(),
        );
        s.update_data().unwrap();
        assert!(!s.contours.is_empty());
        let mut levels: Vec<f64> = s.contours.iter().map(|c| c.level).collect();
        levels.dedup();
        assert!(levels.len() >= 4, "expected several derived levels, got {levels:?}");
    }

    #[test]
    fn max_min_comes_from_the_coordinate_vectors() {
        let mut s = ContourSeries::with_grid(
            vec![-2.0, 3.0],
            vec![1.0, 7.0],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
        );
        s.update_max_min();
        assert_eq!((s.min_x, s.max_x), (1.0, 7.0));
        assert_eq!((s.min_y, s.max_y), (-2.0, 3.0));
    }

    #[test]
    fn join_chains_shared_endpoints() {
        let p = |x: f64, y: f64| DataPoint::new(x, y);
        let joined = join_segments(
            vec![(p(0.0, 0.0), p(1.0, 0.0)), (p(2.0, 0.0), p(1.0, 0.0))],
            1e-9,
        );
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].len(), 3);
    }

    #[test]
    fn non_finite_cells_are_skipped() {
        let mut s = ContourSeries::with_grid(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![0.0, f64::NAN], vec![1.0, 1.0]],
        );
        s.contour_levels = vec![0.5];
        s.update_data().unwrap();
        assert!(s.contours.is_empty());
    }
}
