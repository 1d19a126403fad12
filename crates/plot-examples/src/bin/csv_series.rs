// File: crates/plot-examples/src/bin/csv_series.rs
// Summary: Loads a time/value CSV and renders it on a date-time axis.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use plot_core::axis::tick::date_time_to_value;
use plot_core::{Axis, AxisPosition, DataPoint, LineSeries, PlotModel, SvgExporter};
use std::path::Path;

fn main() -> Result<()> {
    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/series.csv".to_string());
    let path = Path::new(&raw);
    println!("Using input file: {}", path.display());

    let points = load_csv(path).with_context(|| format!("failed to load '{}'", path.display()))?;
    println!("Loaded {} rows", points.len());
    if points.is_empty() {
        anyhow::bail!("no rows loaded; expected time,value columns");
    }

    let mut model = PlotModel::new().with_title("CSV series");
    model.add_axis(Axis::date_time(AxisPosition::Bottom));
    model.add_axis(Axis::linear(AxisPosition::Left));
    model.add_series(LineSeries::with_points(points).with_title(
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("series"),
    ));

    let out = std::path::PathBuf::from("target/out");
    std::fs::create_dir_all(&out)?;
    let svg_path = out.join("csv_series.svg");
    let mut file = std::fs::File::create(&svg_path)?;
    SvgExporter::export(&mut model, 900.0, 500.0, &mut file)?;
    println!("Wrote {}", svg_path.display());

    Ok(())
}

/// Reads `time,value` records; the time column accepts RFC 3339 stamps,
/// `YYYY-MM-DD` dates, or epoch seconds/milliseconds.
fn load_csv(path: &Path) -> Result<Vec<DataPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    println!("Headers: {:?}", headers);

    let find = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = find(&["time", "timestamp", "date", "datetime"]).unwrap_or(0);
    let i_value = find(&["value", "v", "y", "close"]).unwrap_or(1);

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let t = rec.get(i_time).and_then(parse_time);
        let v = rec
            .get(i_value)
            .and_then(|s| s.trim().parse::<f64>().ok());
        if let (Some(t), Some(v)) = (t, v) {
            out.push(DataPoint::new(t, v));
        }
    }
    Ok(out)
}

fn parse_time(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = s.parse::<DateTime<Utc>>() {
        return Some(date_time_to_value(t));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let t = d.and_hms_opt(0, 0, 0)?.and_utc();
        return Some(date_time_to_value(t));
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0); // epoch ms -> sec
        }
        return Some(n as f64);
    }
    None
}
