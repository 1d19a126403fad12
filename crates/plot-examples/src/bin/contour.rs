// File: crates/plot-examples/src/bin/contour.rs
// Summary: Contour plot of a two-dimensional scalar field.

use anyhow::Result;
use plot_core::{ContourSeries, PlotModel, SvgExporter};

fn main() -> Result<()> {
    let mut model = PlotModel::new().with_title("Saddle surface");
    model.is_legend_visible = false;

    let coords: Vec<f64> = (0..60).map(|i| -2.0 + 4.0 * i as f64 / 59.0).collect();
    let mut series = ContourSeries::from_function(|x, y| x * x - y * y, coords.clone(), coords);
    series.label_contours = true;
    model.add_series(series);

    let out = std::path::PathBuf::from("target/out");
    std::fs::create_dir_all(&out)?;
    let path = out.join("contour.svg");
    let mut file = std::fs::File::create(&path)?;
    SvgExporter::export(&mut model, 700.0, 700.0, &mut file)?;
    println!("Wrote {}", path.display());

    Ok(())
}
